//! External media hosting and inline `data:` blob helpers.

mod cloudinary;

pub use cloudinary::CloudinaryHost;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media host request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("media host rejected upload with status {0}")]
    Status(u16),

    #[error("media host response has no secure_url")]
    MissingSecureUrl,
}

/// Somewhere inline image data can be moved to, yielding a stable public URL.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Upload a `data:` URI and return the hosted HTTPS URL.
    async fn upload(&self, data_uri: &str) -> Result<String, MediaError>;
}

/// Whether `url` embeds its content instead of pointing at it.
pub fn is_inline_blob(url: &str) -> bool {
    url.starts_with("data:")
}

/// Encode raw bytes as a base64 `data:` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
