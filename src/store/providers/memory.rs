use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{ObjectLocation, ObjectMetadata, ObjectStore, StoreError};

/// One object held by the in-memory store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
    pub metadata: ObjectMetadata,
}

/// In-memory object store for tests and local experiments.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<ObjectLocation, StoredObject>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an input object, bypassing the `ObjectStore` write path.
    pub async fn seed(&self, location: ObjectLocation, data: Vec<u8>) {
        self.objects.write().await.insert(
            location,
            StoredObject {
                data,
                content_type: String::new(),
                metadata: ObjectMetadata::default(),
            },
        );
    }

    pub async fn get(&self, location: &ObjectLocation) -> Option<StoredObject> {
        self.objects.read().await.get(location).cloned()
    }

    /// Keys stored under the given bucket, sorted.
    pub async fn keys_in(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .read()
            .await
            .keys()
            .filter(|location| location.bucket == bucket)
            .map(|location| location.key.clone())
            .collect();
        keys.sort();
        keys
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn fetch_bytes(&self, location: &ObjectLocation) -> Result<Vec<u8>, StoreError> {
        self.objects
            .read()
            .await
            .get(location)
            .map(|object| object.data.clone())
            .ok_or_else(|| StoreError::NotFound(location.to_string()))
    }

    async fn store_bytes(
        &self,
        location: &ObjectLocation,
        bytes: Vec<u8>,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> Result<(), StoreError> {
        self.objects.write().await.insert(
            location.clone(),
            StoredObject {
                data: bytes,
                content_type: content_type.to_string(),
                metadata: metadata.clone(),
            },
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "in-memory object store"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_of_missing_object_is_not_found() {
        let store = MemoryObjectStore::new();
        let result = store
            .fetch_bytes(&ObjectLocation::new("bucket", "nothing.png"))
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn stored_objects_keep_content_type_and_metadata() {
        let store = MemoryObjectStore::new();
        let location = ObjectLocation::new("out", "photo_webp_deadbeef.webp");
        let metadata = ObjectMetadata {
            original_key: "photo.jpg".to_string(),
            processed_by: "proc".to_string(),
            request_id: "r-9".to_string(),
            processing_time_ms: 3,
        };

        store
            .store_bytes(&location, vec![7, 7], "image/webp", &metadata)
            .await
            .unwrap();

        let stored = store.get(&location).await.unwrap();
        assert_eq!(stored.content_type, "image/webp");
        assert_eq!(stored.metadata, metadata);
        assert_eq!(store.keys_in("out").await, ["photo_webp_deadbeef.webp"]);
    }
}
