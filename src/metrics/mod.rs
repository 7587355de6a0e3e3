pub mod error;
pub mod providers;

pub use error::MetricsError;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// One batch outcome, expanded into three datapoints by the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    pub function_name: String,
    pub processing_time_ms: f64,
    pub image_count: usize,
    pub success: bool,
}

/// One named measurement derived from a report.
#[derive(Debug, Clone, PartialEq)]
pub struct Datapoint {
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

impl MetricsReport {
    /// Duration, count, and a binary outcome tagged success or failure.
    pub fn datapoints(&self) -> [Datapoint; 3] {
        [
            Datapoint {
                name: "ProcessingTime",
                value: self.processing_time_ms,
                unit: "Milliseconds",
            },
            Datapoint {
                name: "ImagesProcessed",
                value: self.image_count as f64,
                unit: "Count",
            },
            Datapoint {
                name: if self.success {
                    "ProcessingSuccess"
                } else {
                    "ProcessingFailure"
                },
                value: 1.0,
                unit: "Count",
            },
        ]
    }
}

#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn emit(&self, report: &MetricsReport) -> Result<(), MetricsError>;
    fn name(&self) -> &str;
}

pub type DynMetricsSink = Arc<dyn MetricsSink>;

/// Best-effort emission: any sink failure is logged and swallowed. Telemetry
/// must never change the outcome of image processing.
pub async fn publish_metrics(sink: &dyn MetricsSink, report: MetricsReport) {
    if let Err(e) = sink.emit(&report).await {
        warn!(sink = sink.name(), error = %e, "failed to publish metrics");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_report_expands_to_three_datapoints() {
        let report = MetricsReport {
            function_name: "processor".to_string(),
            processing_time_ms: 125.5,
            image_count: 2,
            success: true,
        };
        let datapoints = report.datapoints();
        assert_eq!(datapoints[0].name, "ProcessingTime");
        assert_eq!(datapoints[0].value, 125.5);
        assert_eq!(datapoints[0].unit, "Milliseconds");
        assert_eq!(datapoints[1].name, "ImagesProcessed");
        assert_eq!(datapoints[1].value, 2.0);
        assert_eq!(datapoints[2].name, "ProcessingSuccess");
        assert_eq!(datapoints[2].value, 1.0);
    }

    #[test]
    fn failure_report_tags_failure_datapoint() {
        let report = MetricsReport {
            function_name: "processor".to_string(),
            processing_time_ms: 8.0,
            image_count: 3,
            success: false,
        };
        assert_eq!(report.datapoints()[2].name, "ProcessingFailure");
    }
}
