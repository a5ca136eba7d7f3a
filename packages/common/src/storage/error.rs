use thiserror::Error;

/// Errors that can occur while persisting a partition.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The serialized partition exceeds the configured ceiling.
    #[error("partition exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },

    /// The storage key cannot be mapped onto the backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// Whether this is the capacity error callers are expected to surface to the user.
    pub fn is_capacity(&self) -> bool {
        matches!(self, Self::SizeLimitExceeded { .. })
    }
}
