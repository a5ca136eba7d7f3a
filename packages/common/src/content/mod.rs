//! Record types kept in the content store.

mod about;
mod project;

pub use about::{ABOUT_SLUG, About, Experience};
pub use project::{ImageRef, Project};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Which content family a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Projects,
    About,
}

/// Informational lifecycle flag. Partition membership is what actually counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Draft,
    Published,
}

/// Bookkeeping shared by every record. Timestamps are milliseconds since the epoch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordMeta {
    pub status: RecordStatus,
    #[schema(example = 1735689600000_i64)]
    pub created_at: i64,
    #[schema(example = 1735689600000_i64)]
    pub updated_at: i64,
    /// Only set on records in the published partition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
}

impl RecordMeta {
    pub fn new_draft(now: i64) -> Self {
        Self {
            status: RecordStatus::Draft,
            created_at: now,
            updated_at: now,
            published_at: None,
        }
    }
}

/// A record that can live in a [`ContentStore`](crate::store::ContentStore).
pub trait ContentRecord: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: ContentKind;
    const DRAFT_KEY: &'static str;
    const PUBLISHED_KEY: &'static str;
    /// Slug used when a title normalizes to nothing.
    const SLUG_FALLBACK: &'static str;

    fn slug(&self) -> &str;
    fn meta(&self) -> &RecordMeta;
    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Every media URL the record references, in a stable order.
    fn media_urls(&self) -> Vec<&str>;

    /// Mutable access to the same URLs, in the same order as [`Self::media_urls`].
    fn media_urls_mut(&mut self) -> Vec<&mut String>;
}
