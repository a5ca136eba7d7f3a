use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::ImageRef;
use common::media::encode_data_uri;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::models::project::UploadImagesResponse;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Admin Uploads",
    operation_id = "uploadImages",
    summary = "Upload images",
    description = "Accepts one or more `file` parts with `image/*` content types. With a media host configured each image is uploaded and referenced by its hosted URL; otherwise, or when that upload fails, the image is returned as an inline `data:` URI to be migrated on publish. The returned references are not attached to any project.",
    request_body(content_type = "multipart/form-data", description = "One or more `file` parts, each an image"),
    responses(
        (status = 201, description = "Images accepted", body = UploadImagesResponse),
        (status = 400, description = "Missing file or non-image content type (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (AUTH_REQUIRED, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 413, description = "Upload exceeds the body limit"),
    ),
    security(("basic" = [])),
)]
#[instrument(skip(_admin, state, multipart))]
pub async fn upload_images(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let mime = field.content_type().unwrap_or_default().to_string();
        if !mime.starts_with("image/") {
            return Err(AppError::Validation(format!(
                "Only image uploads are accepted, got '{mime}'"
            )));
        }
        let data = field
            .bytes()
            .await
            .map_err(multipart_error)?;
        if data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".into()));
        }
        files.push((mime, data.to_vec()));
    }

    if files.is_empty() {
        return Err(AppError::Validation("Missing 'file' field".into()));
    }

    let mut images = Vec::with_capacity(files.len());
    for (mime, bytes) in files {
        let inline = encode_data_uri(&mime, &bytes);
        let url = match state.pipeline.media_host() {
            Some(host) => match host.upload(&inline).await {
                Ok(hosted) => hosted,
                Err(e) => {
                    tracing::warn!(error = %e, "Image upload failed, returning inline data");
                    inline
                }
            },
            None => inline,
        };
        images.push(ImageRef {
            id: uuid::Uuid::new_v4().to_string(),
            url,
            alt: None,
            width: None,
            height: None,
        });
    }

    Ok((StatusCode::CREATED, Json(UploadImagesResponse { images })))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::UploadTooLarge
    } else {
        AppError::Validation(format!("Multipart error: {}", err.body_text()))
    }
}

/// Body limit layer for the admin routes.
pub fn upload_body_limit(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes)
}
