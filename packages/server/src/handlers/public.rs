use std::convert::Infallible;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use common::content::ABOUT_SLUG;
use common::{About, Project};
use futures::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::project::ProjectListResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Projects",
    operation_id = "listPublishedProjects",
    summary = "List published projects",
    description = "Returns every published project, most recently published first. Draft edits are never visible here.",
    responses(
        (status = 200, description = "Published projects", body = ProjectListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let data = state.projects.list_published().await?;
    Ok(Json(ProjectListResponse { data }))
}

#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Projects",
    operation_id = "getPublishedProject",
    summary = "Get a published project",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Published project", body = Project),
        (status = 404, description = "No published project with this slug (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Project>, AppError> {
    state
        .projects
        .get_published(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Project '{slug}' not found")))
}

#[utoipa::path(
    get,
    path = "/events",
    tag = "Projects",
    operation_id = "streamContentChanges",
    summary = "Stream content change notices",
    description = "Server-sent events. Each `changed` event carries `{kind, partition}` and no record data; clients re-read the affected list. A `resync` event means notices were dropped and everything should be re-read.",
    responses(
        (status = 200, description = "Event stream", body = String, content_type = "text/event-stream"),
    ),
)]
#[instrument(skip(state))]
pub async fn stream_changes(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let projects = BroadcastStream::new(state.projects.subscribe());
    let about = BroadcastStream::new(state.about.subscribe());

    let events = projects.merge(about).map(|notice| {
        let event = match notice {
            Ok(changed) => Event::default()
                .event("changed")
                .json_data(changed)
                .unwrap_or_else(|_| Event::default().event("resync")),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Change stream lagged");
                Event::default().event("resync")
            }
        };
        Ok(event)
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "About",
    operation_id = "getPublishedAbout",
    summary = "Get the published About profile",
    description = "Returns an empty profile when nothing has been published yet.",
    responses(
        (status = 200, description = "Published About profile", body = About),
    ),
)]
#[instrument(skip(state))]
pub async fn get_about(State(state): State<AppState>) -> Result<Json<About>, AppError> {
    let about = state
        .about
        .get_published(ABOUT_SLUG)
        .await?
        .unwrap_or_else(|| About::empty(ABOUT_SLUG));
    Ok(Json(about))
}
