use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::{about, admin, contact, public, uploads};
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/projects", project_routes())
        .nest("/about", about_routes())
        .nest("/contact", contact_routes())
        .nest("/admin", admin_routes(config))
}

fn project_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(public::list_projects))
        .routes(routes!(public::stream_changes))
        .routes(routes!(public::get_project))
}

fn about_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(public::get_about))
}

fn contact_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(contact::send_contact))
}

fn admin_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    // Editor JSON can carry inline images, so it gets the upload limit too.
    OpenApiRouter::new()
        .nest("/projects", admin_project_routes())
        .nest("/about", admin_about_routes())
        .nest("/uploads", upload_routes())
        .fallback(admin::admin_fallback)
        .layer(uploads::upload_body_limit(config.upload.max_bytes))
}

fn admin_project_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(admin::list_drafts, admin::create_project))
        .routes(routes!(admin::open_project, admin::update_project))
        .routes(routes!(admin::append_images))
        .routes(routes!(admin::reorder_images))
        .routes(routes!(admin::update_image, admin::delete_image))
        .routes(routes!(admin::publish_project))
}

fn admin_about_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(about::get_about_draft, about::save_about_draft))
        .routes(routes!(about::publish_about))
}

fn upload_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(uploads::upload_images))
}
