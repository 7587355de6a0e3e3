use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::{ObjectLocation, ObjectMetadata, ObjectStore, StoreError};

/// Filesystem-backed object store. Buckets map to subdirectories under the
/// root; each written object gets a `.meta.json` sidecar carrying the content
/// type and metadata that a real object store would hold natively.
pub struct FsObjectStore {
    root: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct Sidecar {
    content_type: String,
    metadata: ObjectMetadata,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, location: &ObjectLocation) -> Result<PathBuf, StoreError> {
        validate_relative(&location.bucket)?;
        validate_relative(&location.key)?;
        Ok(self.root.join(&location.bucket).join(&location.key))
    }
}

/// Reject absolute paths and traversal components so a key cannot escape
/// the store root.
fn validate_relative(part: &str) -> Result<(), StoreError> {
    let path = Path::new(part);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if part.is_empty() || escapes {
        return Err(StoreError::InvalidKey(part.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn fetch_bytes(&self, location: &ObjectLocation) -> Result<Vec<u8>, StoreError> {
        let path = self.object_path(location)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(location.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn store_bytes(
        &self,
        location: &ObjectLocation,
        bytes: Vec<u8>,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> Result<(), StoreError> {
        let path = self.object_path(location)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let byte_count = bytes.len();
        tokio::fs::write(&path, bytes).await?;

        let sidecar = Sidecar {
            content_type: content_type.to_string(),
            metadata: metadata.clone(),
        };
        let mut sidecar_path = path.clone().into_os_string();
        sidecar_path.push(".meta.json");
        let sidecar_path = PathBuf::from(sidecar_path);
        tokio::fs::write(&sidecar_path, serde_json::to_vec_pretty(&sidecar)?).await?;

        debug!(location = %location, bytes = byte_count, "stored object");
        Ok(())
    }

    fn name(&self) -> &str {
        "filesystem object store"
    }
}
