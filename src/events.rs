use serde::{Deserialize, Serialize};

/// Storage-event notification, matching the wire shape the object store's
/// event delivery produces (one `Records` array, one object per record).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

impl StorageEvent {
    /// Convenience constructor for a single-object event.
    pub fn for_object(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            records: vec![EventRecord {
                storage: StorageEntity {
                    bucket: BucketRef {
                        name: bucket.into(),
                    },
                    object: ObjectRef {
                        key: key.into(),
                        size: None,
                    },
                },
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "s3")]
    pub storage: StorageEntity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageEntity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRef {
    /// URL-encoded key as delivered in the notification.
    pub key: String,
    /// Declared object size in bytes; absent in some notification variants.
    #[serde(default)]
    pub size: Option<u64>,
}

impl ObjectRef {
    /// Notification keys are URL-encoded with `+` for spaces. A key that
    /// fails percent-decoding is used as-is.
    pub fn decoded_key(&self) -> String {
        let plus_decoded = self.key.replace('+', " ");
        match urlencoding::decode(&plus_decoded) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => plus_decoded,
        }
    }
}

/// Identity of the invocation, supplied by the invoking infrastructure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub request_id: String,
    pub function_name: String,
}

impl RequestContext {
    /// Placeholder identity used when no context accompanies the call.
    pub const LOCAL: &'static str = "local";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_notification_json() {
        let event: StorageEvent = serde_json::from_value(json!({
            "Records": [
                {
                    "s3": {
                        "bucket": { "name": "uploads" },
                        "object": { "key": "photos/cat.jpg", "size": 2048 }
                    }
                }
            ]
        }))
        .unwrap();

        assert_eq!(event.records.len(), 1);
        let record = &event.records[0];
        assert_eq!(record.storage.bucket.name, "uploads");
        assert_eq!(record.storage.object.key, "photos/cat.jpg");
        assert_eq!(record.storage.object.size, Some(2048));
    }

    #[test]
    fn missing_records_array_means_empty_batch() {
        let event: StorageEvent = serde_json::from_value(json!({})).unwrap();
        assert!(event.records.is_empty());
    }

    #[test]
    fn size_is_optional() {
        let event: StorageEvent = serde_json::from_value(json!({
            "Records": [
                { "s3": { "bucket": { "name": "b" }, "object": { "key": "k.png" } } }
            ]
        }))
        .unwrap();
        assert_eq!(event.records[0].storage.object.size, None);
    }

    #[test]
    fn decoded_key_applies_unquote_plus_semantics() {
        let object = ObjectRef {
            key: "my+photos/summer%20trip%281%29.jpg".to_string(),
            size: None,
        };
        assert_eq!(object.decoded_key(), "my photos/summer trip(1).jpg");
    }

    #[test]
    fn plain_keys_pass_through() {
        let object = ObjectRef {
            key: "dir/plain.png".to_string(),
            size: None,
        };
        assert_eq!(object.decoded_key(), "dir/plain.png");
    }
}
