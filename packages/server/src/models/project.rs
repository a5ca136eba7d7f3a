use common::{ImageRef, Project};
use serde::{Deserialize, Serialize};

/// Request body for creating a project draft.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Project title, at most 256 characters. The slug is derived from it.
    #[schema(example = "My Project")]
    pub title: String,
    /// Rich-text description, stored verbatim.
    #[serde(rename = "descriptionHTML", default)]
    #[schema(example = "<p>What I built and why.</p>")]
    pub description_html: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Request body for saving draft edits. Absent fields are left unchanged.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[schema(example = "My Project (v2)")]
    pub title: Option<String>,
    #[serde(rename = "descriptionHTML")]
    pub description_html: Option<String>,
}

/// Request body for appending images to a draft.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AppendImagesRequest {
    pub images: Vec<ImageRef>,
}

/// Request body for reordering a draft's images.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderImagesRequest {
    /// Every current image id, in the desired display order.
    #[schema(example = json!(["img-2", "img-1"]))]
    pub image_ids: Vec<String>,
}

/// Request body for setting an image caption. `null` or absent clears it.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateImageRequest {
    #[serde(default)]
    #[schema(example = "Front elevation")]
    pub alt: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectListResponse {
    pub data: Vec<Project>,
}

/// Images produced by an upload, in the order the files were sent.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadImagesResponse {
    pub images: Vec<ImageRef>,
}
