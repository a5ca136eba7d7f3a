use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{Project, StoreError, ViewMode};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::project::*;
use crate::models::shared::{validate_images, validate_reorder_ids, validate_title};
use crate::state::AppState;

/// Slug source used when a project is created with a blank title.
const UNTITLED: &str = "untitled";

fn project_not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("Project '{slug}' not found"))
}

/// Apply `edit` to the draft of `slug`, seeding the draft from the published
/// record first when only that exists.
async fn edit_draft<F>(state: &AppState, slug: &str, edit: F) -> Result<Project, AppError>
where
    F: FnOnce(&mut Project) -> Result<(), StoreError>,
{
    if state.projects.open_draft(slug).await?.is_none() {
        return Err(project_not_found(slug));
    }
    state
        .projects
        .modify_draft(slug, edit)
        .await?
        .ok_or_else(|| project_not_found(slug))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Admin Projects",
    operation_id = "listDraftProjects",
    summary = "List project drafts",
    description = "Returns every draft, most recently updated first.",
    responses(
        (status = 200, description = "Drafts", body = ProjectListResponse),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state))]
pub async fn list_drafts(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let data = state.projects.list_drafts().await?;
    Ok(Json(ProjectListResponse { data }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Admin Projects",
    operation_id = "createProject",
    summary = "Create a project draft",
    description = "Creates a draft with a slug derived from the title, unique across drafts and published projects. A blank title yields an `untitled` slug.",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Draft created", body = Project),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 413, description = "Drafts would exceed the storage ceiling (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state, payload), fields(title = %payload.title))]
pub async fn create_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_title(&payload.title)?;
    validate_images(&payload.images)?;

    let title = payload.title.trim().to_string();
    let slug_source = if title.is_empty() { UNTITLED } else { &title };

    let project = state
        .projects
        .create_with_unique_slug(slug_source, |slug, now| {
            Project::new(
                slug,
                title.clone(),
                payload.description_html,
                payload.images,
                now,
            )
        })
        .await?;

    tracing::info!(slug = %project.slug, "Created project draft");
    Ok((StatusCode::CREATED, Json(project)))
}

#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Admin Projects",
    operation_id = "openProject",
    summary = "Open a project for editing",
    description = "Returns the draft. When only a published project exists, a draft copy of it is created first.",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Editable draft", body = Project),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state))]
pub async fn open_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Project>, AppError> {
    state
        .projects
        .view(ViewMode::Editing, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| project_not_found(&slug))
}

#[utoipa::path(
    patch,
    path = "/{slug}",
    tag = "Admin Projects",
    operation_id = "updateProject",
    summary = "Save draft edits",
    description = "Updates the title and/or description of the draft. The slug never changes.",
    params(("slug" = String, Path, description = "Project slug")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Draft updated", body = Project),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
        (status = 413, description = "Drafts would exceed the storage ceiling (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state, payload))]
pub async fn update_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    AppJson(payload): AppJson<UpdateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    if let Some(title) = &payload.title {
        validate_title(title)?;
    }

    let project = edit_draft(&state, &slug, |project| {
        if let Some(title) = payload.title {
            project.title = title.trim().to_string();
        }
        if let Some(description_html) = payload.description_html {
            project.description_html = description_html;
        }
        Ok(())
    })
    .await?;

    Ok(Json(project))
}

#[utoipa::path(
    post,
    path = "/{slug}/images",
    tag = "Admin Projects",
    operation_id = "appendProjectImages",
    summary = "Append images to a draft",
    description = "Adds images after the existing ones. Image ids must be unique within the project.",
    params(("slug" = String, Path, description = "Project slug")),
    request_body = AppendImagesRequest,
    responses(
        (status = 200, description = "Images appended", body = Project),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
        (status = 413, description = "Drafts would exceed the storage ceiling (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state, payload), fields(count = payload.images.len()))]
pub async fn append_images(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    AppJson(payload): AppJson<AppendImagesRequest>,
) -> Result<Json<Project>, AppError> {
    if payload.images.is_empty() {
        return Err(AppError::Validation("images must not be empty".into()));
    }
    validate_images(&payload.images)?;

    let project = edit_draft(&state, &slug, |project| {
        project.append_images(payload.images)
    })
    .await?;
    Ok(Json(project))
}

#[utoipa::path(
    put,
    path = "/{slug}/images/reorder",
    tag = "Admin Projects",
    operation_id = "reorderProjectImages",
    summary = "Reorder a draft's images",
    description = "The id list must contain every current image id exactly once. Display order follows the list.",
    params(("slug" = String, Path, description = "Project slug")),
    request_body = ReorderImagesRequest,
    responses(
        (status = 200, description = "Images reordered", body = Project),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state, payload))]
pub async fn reorder_images(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    AppJson(payload): AppJson<ReorderImagesRequest>,
) -> Result<Json<Project>, AppError> {
    validate_reorder_ids(&payload.image_ids, "image id")?;

    let project = edit_draft(&state, &slug, |project| {
        project.reorder_images(&payload.image_ids)
    })
    .await?;
    Ok(Json(project))
}

#[utoipa::path(
    patch,
    path = "/{slug}/images/{image_id}",
    tag = "Admin Projects",
    operation_id = "updateProjectImage",
    summary = "Set an image caption",
    params(
        ("slug" = String, Path, description = "Project slug"),
        ("image_id" = String, Path, description = "Image id"),
    ),
    request_body = UpdateImageRequest,
    responses(
        (status = 200, description = "Caption updated", body = Project),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Project or image not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state, payload))]
pub async fn update_image(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path((slug, image_id)): Path<(String, String)>,
    AppJson(payload): AppJson<UpdateImageRequest>,
) -> Result<Json<Project>, AppError> {
    let alt = payload.alt.filter(|alt| !alt.trim().is_empty());

    let project = edit_draft(&state, &slug, |project| {
        if project.set_image_alt(&image_id, alt) {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("Image '{image_id}'")))
        }
    })
    .await?;
    Ok(Json(project))
}

#[utoipa::path(
    delete,
    path = "/{slug}/images/{image_id}",
    tag = "Admin Projects",
    operation_id = "deleteProjectImage",
    summary = "Delete an image from a draft",
    params(
        ("slug" = String, Path, description = "Project slug"),
        ("image_id" = String, Path, description = "Image id"),
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Project or image not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state))]
pub async fn delete_image(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path((slug, image_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    edit_draft(&state, &slug, |project| {
        if project.delete_image(&image_id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("Image '{image_id}'")))
        }
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{slug}/publish",
    tag = "Admin Projects",
    operation_id = "publishProject",
    summary = "Publish a project draft",
    description = "Uploads inline images to the media host when one is configured, writes the migrated URLs back to the draft, then copies the draft into the published set. Failed uploads keep their inline value and never block publishing. The draft is kept.",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Published snapshot", body = Project),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "No draft with this slug (NOT_FOUND)", body = ErrorBody),
        (status = 413, description = "Published set would exceed the storage ceiling (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state))]
pub async fn publish_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Project>, AppError> {
    let project = state
        .projects
        .publish(&slug, &state.pipeline)
        .await?
        .ok_or_else(|| project_not_found(&slug))?;

    tracing::info!(slug = %project.slug, "Published project");
    Ok(Json(project))
}

/// Catch-all for unmatched paths under `/admin`. Credentials are checked
/// before anything else, so unknown admin paths are challenged like known ones.
pub async fn admin_fallback(_admin: AdminUser) -> AppError {
    AppError::NotFound("Admin route not found".into())
}
