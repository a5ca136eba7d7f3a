//! Media sanitization applied to a draft before it is published.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;

use crate::content::ContentRecord;
use crate::media::{MediaHost, is_inline_blob};

/// Inline blob to hosted URL, for every blob that uploaded successfully.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MediaMigration {
    replacements: HashMap<String, String>,
}

impl MediaMigration {
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    /// Rewrite every URL in `record` that still holds a migrated blob.
    /// Returns the number of URLs changed.
    pub fn apply<R: ContentRecord>(&self, record: &mut R) -> usize {
        let mut changed = 0;
        for url in record.media_urls_mut() {
            if let Some(hosted) = self.replacements.get(url.as_str()) {
                *url = hosted.clone();
                changed += 1;
            }
        }
        changed
    }
}

/// Moves inline `data:` images to the media host, when one is configured.
#[derive(Clone, Default)]
pub struct PublishPipeline {
    media: Option<Arc<dyn MediaHost>>,
}

impl PublishPipeline {
    pub fn new(media: Option<Arc<dyn MediaHost>>) -> Self {
        Self { media }
    }

    /// A pipeline with no media host: publishing leaves inline blobs in place.
    pub fn without_media() -> Self {
        Self::default()
    }

    pub fn media_host(&self) -> Option<&Arc<dyn MediaHost>> {
        self.media.as_ref()
    }

    /// Upload every distinct inline blob in `record`, concurrently.
    ///
    /// A failed upload is logged and left out of the result, so the caller
    /// keeps the inline value for that image.
    pub async fn migrate<R: ContentRecord>(&self, record: &R) -> MediaMigration {
        let Some(media) = &self.media else {
            return MediaMigration::default();
        };

        let blobs: HashSet<&str> = record
            .media_urls()
            .into_iter()
            .filter(|url| is_inline_blob(url))
            .collect();
        if blobs.is_empty() {
            return MediaMigration::default();
        }

        let uploads = blobs.into_iter().map(|blob| async move {
            match media.upload(blob).await {
                Ok(hosted) => Some((blob.to_string(), hosted)),
                Err(e) => {
                    tracing::error!(
                        slug = record.slug(),
                        error = %e,
                        "Failed to upload inline image, keeping inline value"
                    );
                    None
                }
            }
        });

        let replacements = join_all(uploads).await.into_iter().flatten().collect();
        MediaMigration { replacements }
    }
}
