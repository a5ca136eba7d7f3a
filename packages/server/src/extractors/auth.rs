use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Basic;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured admin credentials in an
/// `Authorization: Basic …` header.
///
/// Add this as the first parameter of every admin handler.
pub struct AdminUser;

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (user, password) = state
            .config
            .admin
            .credentials()
            .ok_or(AppError::AdminNotConfigured)?;

        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::AuthRequired)?;

        if basic.username() != user || basic.password() != password {
            tracing::warn!(user = basic.username(), "Rejected admin credentials");
            return Err(AppError::InvalidCredentials);
        }

        Ok(AdminUser)
    }
}
