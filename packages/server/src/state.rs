use std::path::PathBuf;
use std::sync::Arc;

use common::clock::MonotonicClock;
use common::media::MediaHost;
use common::publish::PublishPipeline;
use common::storage::filesystem::FilesystemKvStore;
use common::storage::{KeyValueStore, PartitionStorage, StorageError};
use common::{About, ContentStore, Project};

use crate::config::AppConfig;
use crate::mail::ResendMailer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub projects: Arc<ContentStore<Project>>,
    pub about: Arc<ContentStore<About>>,
    pub pipeline: Arc<PublishPipeline>,
    /// `None` when the mail API key or destination is missing.
    pub mailer: Option<Arc<ResendMailer>>,
}

impl AppState {
    /// Build state over the configured data directory.
    pub async fn from_config(config: AppConfig) -> Result<Self, StorageError> {
        let kv = FilesystemKvStore::new(PathBuf::from(&config.storage.data_dir)).await?;
        Ok(Self::with_backend(config, Arc::new(kv)))
    }

    /// Build state over an arbitrary key-value backend.
    pub fn with_backend(config: AppConfig, kv: Arc<dyn KeyValueStore>) -> Self {
        let client = reqwest::Client::new();
        let storage = PartitionStorage::new(kv, config.storage.max_partition_bytes);
        let clock = Arc::new(MonotonicClock::new());

        let media: Option<Arc<dyn MediaHost>> = match config.media.host(client.clone()) {
            Some(host) => {
                tracing::info!(upload_url = host.upload_url(), "Media host enabled");
                Some(Arc::new(host))
            }
            None => {
                tracing::warn!("Media host not configured, images will stay inline");
                None
            }
        };
        let mailer = ResendMailer::from_config(&config.mail, client).map(Arc::new);

        Self {
            projects: Arc::new(ContentStore::new(storage.clone(), clock.clone())),
            about: Arc::new(ContentStore::new(storage, clock)),
            pipeline: Arc::new(PublishPipeline::new(media)),
            mailer,
            config: Arc::new(config),
        }
    }
}
