use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::metrics::{MetricsError, MetricsReport, MetricsSink};

/// Recording sink for tests. Can be switched into a failing mode to verify
/// that metrics faults never escape the batch handler.
#[derive(Default)]
pub struct MemoryMetricsSink {
    reports: RwLock<Vec<MetricsReport>>,
    failing: AtomicBool,
}

impl MemoryMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn reports(&self) -> Vec<MetricsReport> {
        self.reports.read().await.clone()
    }
}

#[async_trait]
impl MetricsSink for MemoryMetricsSink {
    async fn emit(&self, report: &MetricsReport) -> Result<(), MetricsError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MetricsError::Backend("induced failure".to_string()));
        }
        self.reports.write().await.push(report.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "in-memory metrics sink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> MetricsReport {
        MetricsReport {
            function_name: "f".to_string(),
            processing_time_ms: 1.0,
            image_count: 1,
            success: true,
        }
    }

    #[tokio::test]
    async fn records_reports_in_order() {
        let sink = MemoryMetricsSink::new();
        sink.emit(&report()).await.unwrap();
        sink.emit(&report()).await.unwrap();
        assert_eq!(sink.reports().await.len(), 2);
    }

    #[tokio::test]
    async fn failing_mode_returns_backend_error() {
        let sink = MemoryMetricsSink::new();
        sink.set_failing(true);
        assert!(matches!(
            sink.emit(&report()).await,
            Err(MetricsError::Backend(_))
        ));
        assert!(sink.reports().await.is_empty());
    }
}
