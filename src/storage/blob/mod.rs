//! Blob storage for uploaded product photos.

pub mod fs;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persists uploaded bytes under a caller-provided name.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `content` under `name`, replacing any previous blob with the
    /// same name. Resolves only once the bytes are fully written; returns the
    /// number of bytes stored.
    async fn write(&self, name: &str, content: &[u8]) -> Result<u64, BlobError>;
}
