use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::StorageError;
use super::traits::KeyValueStore;

/// Default ceiling for one serialized partition: 4.5 MiB.
pub const DEFAULT_MAX_PARTITION_BYTES: u64 = 4_718_592;

/// A whole partition: slug to record.
pub type PartitionMap<R> = BTreeMap<String, R>;

/// JSON mapping persistence on top of a [`KeyValueStore`], with a byte-size guard.
#[derive(Clone)]
pub struct PartitionStorage {
    kv: Arc<dyn KeyValueStore>,
    max_bytes: u64,
}

impl PartitionStorage {
    pub fn new(kv: Arc<dyn KeyValueStore>, max_bytes: u64) -> Self {
        Self { kv, max_bytes }
    }

    /// Read the mapping stored under `key`.
    ///
    /// An absent key and a value that does not parse both read as an empty
    /// mapping. The two cases are indistinguishable to the caller.
    pub async fn read_map<R>(&self, key: &str) -> Result<PartitionMap<R>, StorageError>
    where
        R: DeserializeOwned,
    {
        let Some(raw) = self.kv.get(key).await? else {
            return Ok(PartitionMap::new());
        };

        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored partition is unreadable, treating as empty");
                Ok(PartitionMap::new())
            }
        }
    }

    /// Serialize and store `map` under `key`.
    ///
    /// Refuses the write with [`StorageError::SizeLimitExceeded`] when the JSON
    /// encoding is larger than the ceiling; the previously stored value is kept.
    pub async fn write_map<R>(&self, key: &str, map: &PartitionMap<R>) -> Result<(), StorageError>
    where
        R: Serialize,
    {
        let encoded = serde_json::to_string(map)?;
        let actual = encoded.len() as u64;
        if actual > self.max_bytes {
            tracing::warn!(
                key,
                actual,
                limit = self.max_bytes,
                "Refusing oversized partition write; configure a media host or shrink images"
            );
            return Err(StorageError::SizeLimitExceeded {
                actual,
                limit: self.max_bytes,
            });
        }
        self.kv.set(key, &encoded).await
    }
}
