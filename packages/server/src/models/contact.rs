use serde::{Deserialize, Serialize};

/// Contact form submission. Every field is required and must not be blank.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ContactRequest {
    #[serde(default)]
    #[schema(example = "Ada")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "Hello! I'd like to talk about a project.")]
    pub message: String,
}

/// Envelope returned by the contact endpoint, on success and failure alike.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ContactResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Thank you!")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            ok: true,
            msg: Some("Thank you!".into()),
            error: None,
        }
    }

    pub fn failed(error: &str) -> Self {
        Self {
            ok: false,
            msg: None,
            error: Some(error.into()),
        }
    }
}
