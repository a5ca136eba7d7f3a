use serde::Deserialize;

use crate::media::CloudinaryHost;
use crate::storage::DEFAULT_MAX_PARTITION_BYTES;

/// Content storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per partition. Default: "./data".
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Ceiling for one serialized partition, in bytes. Default: 4.5 MiB.
    #[serde(default = "default_max_partition_bytes")]
    pub max_partition_bytes: u64,
}

fn default_data_dir() -> String {
    "./data".into()
}
fn default_max_partition_bytes() -> u64 {
    DEFAULT_MAX_PARTITION_BYTES
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_partition_bytes: default_max_partition_bytes(),
        }
    }
}

/// External media host configuration.
///
/// The host is only enabled when both `cloud_name` and `upload_preset` are set;
/// otherwise inline images stay inline.
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    #[serde(default)]
    pub cloud_name: Option<String>,
    #[serde(default)]
    pub upload_preset: Option<String>,
    /// Upload API base. Default: "https://api.cloudinary.com/v1_1".
    #[serde(default = "default_media_api_base")]
    pub api_base: String,
    /// Target folder on the host. Default: "portfolio".
    #[serde(default = "default_media_folder")]
    pub folder: Option<String>,
}

fn default_media_api_base() -> String {
    "https://api.cloudinary.com/v1_1".into()
}
fn default_media_folder() -> Option<String> {
    Some("portfolio".into())
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            upload_preset: None,
            api_base: default_media_api_base(),
            folder: default_media_folder(),
        }
    }
}

impl MediaConfig {
    /// Build the configured host, or `None` when the host is not configured.
    pub fn host(&self, client: reqwest::Client) -> Option<CloudinaryHost> {
        let cloud_name = self.cloud_name.as_deref().filter(|s| !s.is_empty())?;
        let preset = self.upload_preset.as_deref().filter(|s| !s.is_empty())?;
        Some(CloudinaryHost::new(
            client,
            &self.api_base,
            cloud_name,
            preset,
            self.folder.clone(),
        ))
    }
}
