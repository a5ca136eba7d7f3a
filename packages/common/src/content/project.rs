use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ContentKind, ContentRecord, RecordMeta};
use crate::store::StoreError;

/// One image attached to a project. Position in the list is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ImageRef {
    /// Caller-generated opaque token, unique within the project.
    #[schema(example = "0b7e1c1a-6f0e-4a53-9d1c-3c1b7b0f2e11")]
    pub id: String,
    /// Hosted URL or an inline `data:` blob.
    #[schema(example = "https://res.cloudinary.com/demo/image/upload/v1/portfolio/cover.webp")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Same value as `slug`.
    pub id: String,
    #[schema(example = "my-project")]
    pub slug: String,
    #[schema(example = "My Project")]
    pub title: String,
    /// Rich-text editor output, stored and rendered verbatim.
    #[serde(rename = "descriptionHTML", default)]
    #[schema(example = "<p>A short write-up.</p>")]
    pub description_html: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl Project {
    pub fn new(
        slug: String,
        title: String,
        description_html: String,
        images: Vec<ImageRef>,
        now: i64,
    ) -> Self {
        Self {
            id: slug.clone(),
            slug,
            title,
            description_html,
            images,
            meta: RecordMeta::new_draft(now),
        }
    }

    /// Reorder images to match `ids`, which must name every current image exactly once.
    pub fn reorder_images(&mut self, ids: &[String]) -> Result<(), StoreError> {
        if ids.len() != self.images.len() {
            return Err(StoreError::InvalidReorder(format!(
                "expected {} image ids, got {}",
                self.images.len(),
                ids.len()
            )));
        }

        let mut seen = HashSet::new();
        let mut reordered = Vec::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id.as_str()) {
                return Err(StoreError::InvalidReorder(format!(
                    "duplicate image id {id}"
                )));
            }
            let image = self
                .images
                .iter()
                .find(|img| &img.id == id)
                .ok_or_else(|| StoreError::InvalidReorder(format!("unknown image id {id}")))?;
            reordered.push(image.clone());
        }

        self.images = reordered;
        Ok(())
    }

    /// Append `images` after the existing ones. Ids must stay unique within the project.
    pub fn append_images(&mut self, images: Vec<ImageRef>) -> Result<(), StoreError> {
        let mut ids: HashSet<String> = self.images.iter().map(|img| img.id.clone()).collect();
        for image in &images {
            if !ids.insert(image.id.clone()) {
                return Err(StoreError::DuplicateImage(image.id.clone()));
            }
        }
        self.images.extend(images);
        Ok(())
    }

    /// Remove the image with `image_id`. Returns whether anything was removed.
    pub fn delete_image(&mut self, image_id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|img| img.id != image_id);
        self.images.len() != before
    }

    /// Set or clear the caption of one image. Returns whether the image exists.
    pub fn set_image_alt(&mut self, image_id: &str, alt: Option<String>) -> bool {
        match self.images.iter_mut().find(|img| img.id == image_id) {
            Some(img) => {
                img.alt = alt;
                true
            }
            None => false,
        }
    }
}

impl ContentRecord for Project {
    const KIND: ContentKind = ContentKind::Projects;
    const DRAFT_KEY: &'static str = "kreo:draft:projects";
    const PUBLISHED_KEY: &'static str = "kreo:published:projects";
    const SLUG_FALLBACK: &'static str = "project";

    fn slug(&self) -> &str {
        &self.slug
    }

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn media_urls(&self) -> Vec<&str> {
        self.images.iter().map(|img| img.url.as_str()).collect()
    }

    fn media_urls_mut(&mut self) -> Vec<&mut String> {
        self.images.iter_mut().map(|img| &mut img.url).collect()
    }
}
