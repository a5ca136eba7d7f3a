use common::content::Experience;
use serde::Deserialize;

/// Request body for saving the About draft. Replaces the whole profile.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveAboutRequest {
    #[schema(example = "Kreo")]
    pub name: Option<String>,
    #[schema(example = "Designer and builder")]
    pub tagline: Option<String>,
    pub bio: Option<String>,
    /// Hosted URL or inline `data:` blob.
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
}
