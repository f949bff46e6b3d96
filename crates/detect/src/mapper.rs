//! Maps anomaly results back onto the metric space.

use driftwatch_core::{AnomalyResult, DetectorUuid, MetricKey};

use crate::error::{DetectorError, Result};

/// Tag carrying the anomaly level on a derived metric.
pub const ANOMALY_TAG: &str = "anomaly";
/// Tag carrying the originating detector UUID on a derived metric.
pub const DETECTOR_UUID_TAG: &str = "detector_uuid";

/// Derive a metric key for re-injecting an anomaly result into the stream:
/// the original key plus the reserved `anomaly` and `detector_uuid` tags.
///
/// A metric that already carries either reserved tag is rejected, otherwise
/// a re-injected result would masquerade as a fresh observation and loop
/// through detection again.
pub fn to_derived_metric(
    metric: &MetricKey,
    detector_uuid: DetectorUuid,
    result: &AnomalyResult,
) -> Result<MetricKey> {
    for reserved in [ANOMALY_TAG, DETECTOR_UUID_TAG] {
        if metric.tag(reserved).is_some() {
            return Err(DetectorError::Validation(format!(
                "metric '{}' already carries reserved tag '{}'",
                metric.name, reserved
            )));
        }
    }

    Ok(metric
        .clone()
        .with_tag(ANOMALY_TAG, result.level.as_str().to_lowercase())
        .with_tag(DETECTOR_UUID_TAG, detector_uuid.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftwatch_core::AnomalyLevel;
    use uuid::Uuid;

    #[test]
    fn derived_metric_carries_both_reserved_tags() {
        let metric = MetricKey::new("latency.p99").with_tag("service", "checkout");
        let uuid = Uuid::new_v4();
        let result = AnomalyResult::new(AnomalyLevel::Strong);

        let derived = to_derived_metric(&metric, uuid, &result).unwrap();
        assert_eq!(derived.name, "latency.p99");
        assert_eq!(derived.tag("service"), Some("checkout"));
        assert_eq!(derived.tag(ANOMALY_TAG), Some("strong"));
        assert_eq!(derived.tag(DETECTOR_UUID_TAG).unwrap(), uuid.to_string());
    }

    #[test]
    fn metrics_already_tagged_are_rejected() {
        let uuid = Uuid::new_v4();
        let result = AnomalyResult::new(AnomalyLevel::Weak);

        let tagged = MetricKey::new("latency.p99").with_tag(ANOMALY_TAG, "weak");
        assert!(to_derived_metric(&tagged, uuid, &result).is_err());

        let tagged = MetricKey::new("latency.p99").with_tag(DETECTOR_UUID_TAG, "x");
        assert!(to_derived_metric(&tagged, uuid, &result).is_err());
    }
}
