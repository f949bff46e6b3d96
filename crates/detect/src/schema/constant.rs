//! Constant threshold detector parameters.

use driftwatch_core::{AnomalyThresholds, AnomalyType};
use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, Result};

/// Fixed thresholds plus the tail to test them on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConstantThresholdParams {
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    pub thresholds: AnomalyThresholds,
}

impl ConstantThresholdParams {
    /// The tail decides which bounds must be ordered; the unused side may
    /// carry degenerate values.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        let upper_ordered = t.upper_strong >= t.upper_weak;
        let lower_ordered = t.lower_weak >= t.lower_strong;
        let sides_ordered = t.upper_weak >= t.lower_weak;
        let ok = match self.anomaly_type {
            AnomalyType::LeftTailed => lower_ordered,
            AnomalyType::RightTailed => upper_ordered,
            AnomalyType::TwoTailed => upper_ordered && lower_ordered && sides_ordered,
        };
        if !ok {
            return Err(DetectorError::Validation(format!(
                "thresholds out of order for {:?}: {:?}",
                self.anomaly_type, t
            )));
        }
        Ok(())
    }
}
