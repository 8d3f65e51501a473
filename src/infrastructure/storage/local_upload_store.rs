use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use uuid::Uuid;

use crate::application::ports::{UploadStore, UploadStoreError};

/// Stores uploads under a fixed directory. Names are uuid-prefixed so
/// two clients uploading "notes.pdf" never overwrite each other.
pub struct LocalUploadStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalUploadStore {
    pub fn new(base_path: PathBuf) -> Result<Self, UploadStoreError> {
        std::fs::create_dir_all(&base_path).map_err(UploadStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| UploadStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }

    fn storage_name(filename: &str) -> String {
        let safe: String = filename
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}-{}", Uuid::new_v4(), safe)
    }
}

#[async_trait::async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(&self, filename: &str, data: Bytes) -> Result<String, UploadStoreError> {
        let name = Self::storage_name(filename);
        let path = StorePath::from(name.as_str());

        self.inner
            .put(&path, PutPayload::from(data))
            .await
            .map_err(|e| UploadStoreError::UploadFailed(e.to_string()))?;

        tracing::debug!(stored_as = %name, "Upload persisted");

        Ok(name)
    }
}
