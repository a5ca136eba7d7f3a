use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::instrument;

use crate::mail::ContactMessage;
use crate::models::contact::{ContactRequest, ContactResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Contact",
    operation_id = "sendContactMessage",
    summary = "Relay a contact form message",
    description = "Sends the visitor's message to the site owner by email. Responds with an `{ok, msg}` or `{ok, error}` envelope. The message is sent at most once; there is no retry.",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message sent", body = ContactResponse),
        (status = 400, description = "A field is missing or blank", body = ContactResponse),
        (status = 500, description = "Unreadable body, mail relay not configured or provider failure", body = ContactResponse),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn send_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> (StatusCode, Json<ContactResponse>) {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(e) => {
            tracing::warn!(error = %e.body_text(), "Unreadable contact request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::failed("Failed to send message.")),
            );
        }
    };

    let contact = ContactMessage {
        name: payload.name.trim().to_string(),
        email: payload.email.trim().to_string(),
        message: payload.message.trim().to_string(),
    };
    if contact.name.is_empty() || contact.email.is_empty() || contact.message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse::failed(
                "Please provide your name, email and message.",
            )),
        );
    }

    let Some(mailer) = &state.mailer else {
        tracing::error!("Contact relay is not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ContactResponse::failed("Mail server not configured.")),
        );
    };

    match mailer.send(&contact).await {
        Ok(()) => {
            tracing::info!("Relayed contact message");
            (StatusCode::OK, Json(ContactResponse::sent()))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to relay contact message");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::failed("Failed to send message.")),
            )
        }
    }
}
