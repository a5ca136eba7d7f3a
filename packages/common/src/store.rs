//! Draft / published partitioned record store.
//!
//! Each [`ContentStore`] keeps two independent slug-keyed maps, persisted
//! whole under the record type's draft and published keys. Every mutation
//! reads the full partition, changes one entry and writes the full map back.
//! Within one process those cycles are serialized by a write lock; nothing
//! coordinates separate processes sharing the same backend.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{Mutex, broadcast};

use crate::clock::MonotonicClock;
use crate::content::{ContentKind, ContentRecord, RecordStatus};
use crate::publish::PublishPipeline;
use crate::slug::unique_slug;
use crate::storage::{PartitionMap, PartitionStorage, StorageError};

const NOTICE_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid reorder: {0}")]
    InvalidReorder(String),

    #[error("image id '{0}' is already used in this project")]
    DuplicateImage(String),

    #[error("slug of '{0}' cannot be changed")]
    SlugChanged(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Draft,
    Published,
}

/// Emitted after a partition is rewritten. Carries no record data; listeners re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartitionChanged {
    pub kind: ContentKind,
    pub partition: Partition,
}

/// Which side of the store a page is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Published snapshot only.
    Public,
    /// The editable draft, seeded from the published snapshot if needed.
    Editing,
}

pub struct ContentStore<R> {
    storage: PartitionStorage,
    clock: Arc<MonotonicClock>,
    write_lock: Mutex<()>,
    notices: broadcast::Sender<PartitionChanged>,
    _record: PhantomData<fn() -> R>,
}

impl<R: ContentRecord> ContentStore<R> {
    pub fn new(storage: PartitionStorage, clock: Arc<MonotonicClock>) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            storage,
            clock,
            write_lock: Mutex::new(()),
            notices,
            _record: PhantomData,
        }
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Receive a notice after every partition write made through this store.
    pub fn subscribe(&self) -> broadcast::Receiver<PartitionChanged> {
        self.notices.subscribe()
    }

    async fn drafts(&self) -> Result<PartitionMap<R>, StorageError> {
        self.storage.read_map(R::DRAFT_KEY).await
    }

    async fn published(&self) -> Result<PartitionMap<R>, StorageError> {
        self.storage.read_map(R::PUBLISHED_KEY).await
    }

    async fn write(&self, partition: Partition, map: &PartitionMap<R>) -> Result<(), StorageError> {
        let key = match partition {
            Partition::Draft => R::DRAFT_KEY,
            Partition::Published => R::PUBLISHED_KEY,
        };
        self.storage.write_map(key, map).await?;
        // No subscribers is fine.
        let _ = self.notices.send(PartitionChanged {
            kind: R::KIND,
            partition,
        });
        Ok(())
    }

    /// Published records, most recently published first.
    pub async fn list_published(&self) -> Result<Vec<R>, StorageError> {
        let mut records: Vec<R> = self.published().await?.into_values().collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.meta().published_at.unwrap_or(0)));
        Ok(records)
    }

    /// Draft records, most recently updated first.
    pub async fn list_drafts(&self) -> Result<Vec<R>, StorageError> {
        let mut records: Vec<R> = self.drafts().await?.into_values().collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.meta().updated_at));
        Ok(records)
    }

    pub async fn get_draft(&self, slug: &str) -> Result<Option<R>, StorageError> {
        Ok(self.drafts().await?.remove(slug))
    }

    pub async fn get_published(&self, slug: &str) -> Result<Option<R>, StorageError> {
        Ok(self.published().await?.remove(slug))
    }

    /// Insert or overwrite the draft at `record.slug()`, refreshing `updatedAt`.
    ///
    /// Slug uniqueness is the caller's concern; see [`Self::create_with_unique_slug`].
    pub async fn create_draft(&self, mut record: R) -> Result<R, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut drafts = self.drafts().await?;
        record.meta_mut().updated_at = self.now();
        drafts.insert(record.slug().to_string(), record.clone());
        self.write(Partition::Draft, &drafts).await?;
        Ok(record)
    }

    /// Same upsert as [`Self::create_draft`]; there is no existence check.
    pub async fn update_draft(&self, record: R) -> Result<R, StorageError> {
        self.create_draft(record).await
    }

    /// Apply `edit` to the draft at `slug` and persist it.
    ///
    /// Returns `Ok(None)` without writing when no such draft exists. An edit
    /// that changes the slug is rejected and nothing is written.
    pub async fn modify_draft<F>(&self, slug: &str, edit: F) -> Result<Option<R>, StoreError>
    where
        F: FnOnce(&mut R) -> Result<(), StoreError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut drafts = self.drafts().await?;
        let Some(mut record) = drafts.remove(slug) else {
            return Ok(None);
        };

        edit(&mut record)?;
        if record.slug() != slug {
            return Err(StoreError::SlugChanged(slug.to_string()));
        }

        record.meta_mut().updated_at = self.now();
        drafts.insert(slug.to_string(), record.clone());
        self.write(Partition::Draft, &drafts).await?;
        Ok(Some(record))
    }

    /// A slug derived from `title` that is free in both partitions right now.
    pub async fn generate_unique_slug(&self, title: &str) -> Result<String, StorageError> {
        let drafts = self.drafts().await?;
        let published = self.published().await?;
        Ok(unique_slug(title, R::SLUG_FALLBACK, |candidate| {
            drafts.contains_key(candidate) || published.contains_key(candidate)
        }))
    }

    /// Generate a slug for `title` and insert the draft built from it, under
    /// one lock so concurrent callers cannot receive the same slug.
    pub async fn create_with_unique_slug<F>(&self, title: &str, build: F) -> Result<R, StorageError>
    where
        F: FnOnce(String, i64) -> R,
    {
        let _guard = self.write_lock.lock().await;
        let mut drafts = self.drafts().await?;
        let published = self.published().await?;
        let slug = unique_slug(title, R::SLUG_FALLBACK, |candidate| {
            drafts.contains_key(candidate) || published.contains_key(candidate)
        });

        let record = build(slug.clone(), self.now());
        drafts.insert(slug, record.clone());
        self.write(Partition::Draft, &drafts).await?;
        Ok(record)
    }

    /// The draft at `slug`, creating it from the published snapshot when only
    /// that exists. `None` when neither partition has the slug.
    pub async fn open_draft(&self, slug: &str) -> Result<Option<R>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut drafts = self.drafts().await?;
        if let Some(draft) = drafts.get(slug) {
            return Ok(Some(draft.clone()));
        }

        let Some(mut record) = self.published().await?.remove(slug) else {
            return Ok(None);
        };
        let meta = record.meta_mut();
        meta.status = RecordStatus::Draft;
        meta.published_at = None;
        meta.updated_at = self.now();

        drafts.insert(slug.to_string(), record.clone());
        self.write(Partition::Draft, &drafts).await?;
        Ok(Some(record))
    }

    /// Resolve a page view: the published record, or the editable draft.
    pub async fn view(&self, mode: ViewMode, slug: &str) -> Result<Option<R>, StorageError> {
        match mode {
            ViewMode::Public => self.get_published(slug).await,
            ViewMode::Editing => self.open_draft(slug).await,
        }
    }

    /// Copy the draft at `slug` into the published partition.
    ///
    /// Inline images are migrated through `pipeline` first and the migrated
    /// URLs are written back to the draft as well. Uploads happen outside the
    /// write lock; only URLs still holding the uploaded blob are replaced.
    /// Returns `Ok(None)` and writes nothing when there is no draft. The draft
    /// is never removed.
    pub async fn publish(
        &self,
        slug: &str,
        pipeline: &PublishPipeline,
    ) -> Result<Option<R>, StorageError> {
        let Some(draft) = self.get_draft(slug).await? else {
            return Ok(None);
        };
        let migration = pipeline.migrate(&draft).await;

        let _guard = self.write_lock.lock().await;
        let mut drafts = self.drafts().await?;
        let Some(current) = drafts.get_mut(slug) else {
            return Ok(None);
        };

        if migration.apply(current) > 0 {
            current.meta_mut().updated_at = self.now();
            let sanitized = current.clone();
            self.write(Partition::Draft, &drafts).await?;
            tracing::info!(slug, migrated = migration.len(), "Migrated inline media before publish");
            return self.commit_published(sanitized).await.map(Some);
        }

        let snapshot = current.clone();
        self.commit_published(snapshot).await.map(Some)
    }

    async fn commit_published(&self, mut record: R) -> Result<R, StorageError> {
        let mut published = self.published().await?;
        let meta = record.meta_mut();
        meta.status = RecordStatus::Published;
        meta.published_at = Some(self.now());

        published.insert(record.slug().to_string(), record.clone());
        self.write(Partition::Published, &published).await?;
        Ok(record)
    }
}
