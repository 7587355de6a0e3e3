use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::metrics::{MetricsError, MetricsReport, MetricsSink};

const NAMESPACE: &str = "ImageProcessor";

/// Sink that emits datapoints as structured log events. Stands in for a real
/// telemetry backend; a scraper can lift the fields off the `metrics` target.
pub struct LogMetricsSink;

impl LogMetricsSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogMetricsSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricsSink for LogMetricsSink {
    async fn emit(&self, report: &MetricsReport) -> Result<(), MetricsError> {
        let timestamp = Utc::now().to_rfc3339();
        let datapoints = report.datapoints();
        for datapoint in &datapoints {
            info!(
                target: "metrics",
                namespace = NAMESPACE,
                metric_name = datapoint.name,
                value = datapoint.value,
                unit = datapoint.unit,
                function_name = %report.function_name,
                timestamp = %timestamp,
                "datapoint"
            );
        }
        debug!("published {} datapoints", datapoints.len());
        Ok(())
    }

    fn name(&self) -> &str {
        "log metrics sink"
    }
}
