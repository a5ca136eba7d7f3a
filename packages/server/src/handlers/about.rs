use axum::Json;
use axum::extract::State;
use common::About;
use common::content::ABOUT_SLUG;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::about::SaveAboutRequest;
use crate::state::AppState;

fn apply(about: &mut About, payload: SaveAboutRequest) {
    about.name = payload.name;
    about.tagline = payload.tagline;
    about.bio = payload.bio;
    about.avatar_url = payload.avatar_url.filter(|url| !url.trim().is_empty());
    about.experiences = payload.experiences;
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Admin About",
    operation_id = "getAboutDraft",
    summary = "Get the About draft",
    description = "Returns the draft profile, seeded from the published profile when no draft exists, or an empty profile when neither exists.",
    responses(
        (status = 200, description = "About draft", body = About),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state))]
pub async fn get_about_draft(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<About>, AppError> {
    let about = state
        .about
        .open_draft(ABOUT_SLUG)
        .await?
        .unwrap_or_else(|| About::empty(ABOUT_SLUG));
    Ok(Json(about))
}

#[utoipa::path(
    put,
    path = "/",
    tag = "Admin About",
    operation_id = "saveAboutDraft",
    summary = "Save the About draft",
    description = "Replaces the draft profile, seeding it from the published profile first so its creation time is kept. The published profile is unchanged until published.",
    request_body = SaveAboutRequest,
    responses(
        (status = 200, description = "Draft saved", body = About),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 413, description = "Draft would exceed the storage ceiling (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state, payload), fields(experiences = payload.experiences.len()))]
pub async fn save_about_draft(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SaveAboutRequest>,
) -> Result<Json<About>, AppError> {
    if payload
        .experiences
        .iter()
        .any(|exp| exp.id.trim().is_empty() || exp.company.trim().is_empty())
    {
        return Err(AppError::Validation(
            "Every experience needs an id and a company".into(),
        ));
    }

    // Seeding from the published profile keeps its createdAt.
    if state.about.open_draft(ABOUT_SLUG).await?.is_none() {
        let mut fresh = About::empty(ABOUT_SLUG);
        fresh.meta.created_at = state.about.now();
        state.about.create_draft(fresh).await?;
    }

    let saved = state
        .about
        .modify_draft(ABOUT_SLUG, |about| {
            apply(about, payload);
            Ok(())
        })
        .await?
        .ok_or_else(|| AppError::NotFound("About draft not found".into()))?;
    Ok(Json(saved))
}

#[utoipa::path(
    post,
    path = "/publish",
    tag = "Admin About",
    operation_id = "publishAbout",
    summary = "Publish the About draft",
    description = "Migrates inline avatar and logo images to the media host when configured, then copies the draft into the published profile.",
    responses(
        (status = 200, description = "Published profile", body = About),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "No About draft (NOT_FOUND)", body = ErrorBody),
        (status = 413, description = "Profile would exceed the storage ceiling (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state))]
pub async fn publish_about(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<About>, AppError> {
    let about = state
        .about
        .publish(ABOUT_SLUG, &state.pipeline)
        .await?
        .ok_or_else(|| AppError::NotFound("About draft not found".into()))?;

    tracing::info!("Published About profile");
    Ok(Json(about))
}
