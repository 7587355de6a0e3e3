pub mod error;
pub mod providers;
pub mod types;

pub use error::StoreError;
pub use types::{ObjectLocation, ObjectMetadata};

use async_trait::async_trait;
use std::sync::Arc;

/// Object store port. The real backing store (cloud bucket, filesystem,
/// memory) is an implementation detail behind this trait; the handler only
/// reads one blob and writes N blobs per invocation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn fetch_bytes(&self, location: &ObjectLocation) -> Result<Vec<u8>, StoreError>;

    async fn store_bytes(
        &self,
        location: &ObjectLocation,
        bytes: Vec<u8>,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> Result<(), StoreError>;

    fn name(&self) -> &str;
}

pub type DynObjectStore = Arc<dyn ObjectStore>;
