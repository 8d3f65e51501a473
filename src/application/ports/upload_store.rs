use async_trait::async_trait;
use bytes::Bytes;

/// Persists uploaded files. Returns the relative path the upload was
/// stored under.
#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn store(&self, filename: &str, data: Bytes) -> Result<String, UploadStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("upload failed: {0}")]
    UploadFailed(String),
}
