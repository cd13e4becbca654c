//! Filesystem blob store rooted at the configured uploads directory.

use super::{BlobError, BlobStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Creates the root directory if needed and roots the store there.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, BlobError> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn write(&self, name: &str, content: &[u8]) -> Result<u64, BlobError> {
        let path = self.root.join(name);
        tokio::fs::write(&path, content).await?;
        Ok(content.len() as u64)
    }
}
