use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use common::StoreError;
use common::storage::StorageError;
use serde::Serialize;

/// Challenge sent with every 401 from the admin gate.
pub const ADMIN_CHALLENGE: &str = r#"Basic realm="Admin Area""#;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `AUTH_REQUIRED`,
    /// `INVALID_CREDENTIALS`, `NOT_FOUND`, `PAYLOAD_TOO_LARGE`,
    /// `ADMIN_NOT_CONFIGURED`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Title must be at most 256 characters")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    AuthRequired,
    InvalidCredentials,
    NotFound(String),
    /// A partition write would exceed the storage ceiling.
    PayloadTooLarge {
        actual: u64,
        limit: u64,
    },
    /// A request body went over the configured upload limit.
    UploadTooLarge,
    AdminNotConfigured,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::AuthRequired => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "AUTH_REQUIRED",
                    message: "Authentication required".into(),
                },
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "INVALID_CREDENTIALS",
                    message: "Invalid credentials".into(),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::PayloadTooLarge { actual, limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody {
                    code: "PAYLOAD_TOO_LARGE",
                    message: format!(
                        "Content too large to store ({actual} > {limit} bytes); configure a media host or reduce image sizes"
                    ),
                },
            ),
            AppError::UploadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody {
                    code: "PAYLOAD_TOO_LARGE",
                    message: "Upload exceeds the size limit".into(),
                },
            ),
            AppError::AdminNotConfigured => {
                tracing::error!("Admin credentials are not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "ADMIN_NOT_CONFIGURED",
                        message: "Admin credentials not configured".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let challenge = matches!(self, AppError::AuthRequired | AppError::InvalidCredentials);

        let (status, body) = self.status_and_body();
        let mut response = (status, Json(body)).into_response();

        if challenge {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(ADMIN_CHALLENGE),
            );
        }
        response
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SizeLimitExceeded { actual, limit } => {
                AppError::PayloadTooLarge { actual, limit }
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(format!("{what} not found")),
            StoreError::InvalidReorder(_)
            | StoreError::DuplicateImage(_)
            | StoreError::SlugChanged(_) => {
                AppError::Validation(err.to_string())
            }
            StoreError::Storage(e) => e.into(),
        }
    }
}
