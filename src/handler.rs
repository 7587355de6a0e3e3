use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::Config;
use crate::events::{RequestContext, StorageEvent};
use crate::metrics::{DynMetricsSink, MetricsReport, publish_metrics};
use crate::processor::{ProcessorError, VariantConfig, generate};
use crate::store::{DynObjectStore, ObjectLocation, ObjectMetadata, StoreError};

/// Value written to the `processed_by` metadata field of every rendition.
pub const PROCESSOR_ID: &str = "genzou-image-processor";

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Processor(#[from] ProcessorError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("image processing task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success {
        message: String,
        processed_images: usize,
        execution_time_ms: u64,
        request_id: String,
    },
    Failure {
        error: String,
        request_id: String,
    },
}

/// HTTP-style invocation result: 200 on full success, 500 on any failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: ResponseBody,
}

impl HandlerResponse {
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Batch handler tying the ports together: fetch each notified object,
/// generate its renditions, persist them, report metrics once per batch.
pub struct ImageProcessor {
    config: Config,
    variant_config: VariantConfig,
    store: DynObjectStore,
    metrics: DynMetricsSink,
}

impl ImageProcessor {
    pub fn new(config: Config, store: DynObjectStore, metrics: DynMetricsSink) -> Self {
        Self {
            config,
            variant_config: VariantConfig::default(),
            store,
            metrics,
        }
    }

    pub fn with_variant_config(mut self, variant_config: VariantConfig) -> Self {
        self.variant_config = variant_config;
        self
    }

    /// Process every record in the event sequentially. The first failure
    /// aborts the remainder of the batch; renditions already written stay
    /// written (no rollback across store writes).
    pub async fn handle(
        &self,
        event: StorageEvent,
        context: Option<&RequestContext>,
    ) -> HandlerResponse {
        let started = Instant::now();
        let request_id = context
            .map(|c| c.request_id.clone())
            .unwrap_or_else(|| RequestContext::LOCAL.to_string());
        let function_name = context
            .map(|c| c.function_name.clone())
            .unwrap_or_else(|| RequestContext::LOCAL.to_string());
        let record_count = event.records.len();

        info!(request_id = %request_id, records = record_count, "received event");

        match self.process_records(&event, &request_id).await {
            Ok(processed) => {
                let total_ms = elapsed_ms(started);
                publish_metrics(
                    self.metrics.as_ref(),
                    MetricsReport {
                        function_name,
                        processing_time_ms: total_ms,
                        image_count: record_count,
                        success: true,
                    },
                )
                .await;

                info!(
                    request_id = %request_id,
                    total_time_ms = total_ms,
                    processed_images = processed,
                    "completed"
                );

                HandlerResponse {
                    status_code: 200,
                    body: ResponseBody::Success {
                        message: "Image processed successfully".to_string(),
                        processed_images: processed,
                        execution_time_ms: total_ms as u64,
                        request_id,
                    },
                }
            }
            Err(e) => {
                let total_ms = elapsed_ms(started);
                error!(
                    request_id = %request_id,
                    elapsed_ms = total_ms,
                    error = %e,
                    "event processing failed"
                );

                // Failure metric reports the batch's requested record count,
                // not how many records completed before the fault.
                publish_metrics(
                    self.metrics.as_ref(),
                    MetricsReport {
                        function_name,
                        processing_time_ms: total_ms,
                        image_count: record_count,
                        success: false,
                    },
                )
                .await;

                HandlerResponse {
                    status_code: 500,
                    body: ResponseBody::Failure {
                        error: e.to_string(),
                        request_id,
                    },
                }
            }
        }
    }

    async fn process_records(
        &self,
        event: &StorageEvent,
        request_id: &str,
    ) -> Result<usize, HandlerError> {
        let mut processed = 0;

        for record in &event.records {
            let bucket = &record.storage.bucket.name;
            let key = record.storage.object.decoded_key();
            let declared_size = record.storage.object.size.unwrap_or(0);

            info!(
                request_id = %request_id,
                bucket = %bucket,
                key = %key,
                size = declared_size,
                "processing image"
            );

            if declared_size > self.config.large_image_warn_bytes {
                warn!(
                    request_id = %request_id,
                    key = %key,
                    size = declared_size,
                    "large image detected"
                );
            }

            let fetch_started = Instant::now();
            let raw_bytes = self
                .store
                .fetch_bytes(&ObjectLocation::new(bucket, &key))
                .await?;
            debug!(
                request_id = %request_id,
                fetch_time_ms = elapsed_ms(fetch_started),
                bytes = raw_bytes.len(),
                "fetched source object"
            );

            let process_started = Instant::now();
            let variant_config = self.variant_config.clone();
            let source_key = key.clone();
            let renditions = tokio::task::spawn_blocking(move || {
                generate(&raw_bytes, &source_key, &variant_config)
            })
            .await??;
            let processing_time_ms = elapsed_ms(process_started);
            info!(
                request_id = %request_id,
                processing_time_ms,
                variants = renditions.len(),
                "generated renditions"
            );

            let upload_started = Instant::now();
            let rendition_count = renditions.len();
            for rendition in renditions {
                let location =
                    ObjectLocation::new(&self.config.output_bucket, &rendition.key);
                let metadata = ObjectMetadata {
                    original_key: key.clone(),
                    processed_by: PROCESSOR_ID.to_string(),
                    request_id: request_id.to_string(),
                    processing_time_ms: processing_time_ms as u64,
                };
                self.store
                    .store_bytes(&location, rendition.data, rendition.content_type, &metadata)
                    .await?;
            }
            info!(
                request_id = %request_id,
                upload_time_ms = elapsed_ms(upload_started),
                variants = rendition_count,
                key = %key,
                "uploaded renditions"
            );

            processed += rendition_count;
        }

        Ok(processed)
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
