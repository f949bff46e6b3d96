//! Parameters for the control-chart style detectors: EWMA, PEWMA, CUSUM,
//! and the Shewhart individuals chart.

use driftwatch_core::AnomalyType;
use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, Result};

use super::{check_sigmas, check_unit_interval};

fn default_alpha() -> f64 {
    0.15
}

fn default_beta() -> f64 {
    1.0
}

fn default_weak_sigmas() -> f64 {
    3.0
}

fn default_strong_sigmas() -> f64 {
    4.0
}

fn default_training_length() -> usize {
    30
}

fn default_warm_up_period() -> usize {
    25
}

fn default_slack_param() -> f64 {
    0.5
}

fn default_anomaly_type() -> AnomalyType {
    AnomalyType::TwoTailed
}

fn default_individuals_sigmas() -> f64 {
    3.0
}

// ── EWMA ────────────────────────────────────────────────────────────

/// Exponentially weighted moving average chart.
///
/// Higher `alpha` means less smoothing (it is nonetheless called the
/// smoothing parameter in the literature).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EwmaParams {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_weak_sigmas")]
    pub weak_sigmas: f64,
    #[serde(default = "default_strong_sigmas")]
    pub strong_sigmas: f64,
    /// Seeds the first mean estimate; initial variance is always 0.
    #[serde(default)]
    pub init_mean_estimate: f64,
}

impl Default for EwmaParams {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            weak_sigmas: default_weak_sigmas(),
            strong_sigmas: default_strong_sigmas(),
            init_mean_estimate: 0.0,
        }
    }
}

impl EwmaParams {
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("alpha", self.alpha)?;
        check_sigmas(self.weak_sigmas, self.strong_sigmas)
    }
}

// ── PEWMA ───────────────────────────────────────────────────────────

/// Probabilistic EWMA: down-weights outliers by their gaussian density.
/// `beta = 0` disables down-weighting and the detector degenerates to EWMA.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PewmaParams {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Observations spent in the training regime before the adaptive
    /// weighting takes over.
    #[serde(default = "default_training_length")]
    pub training_length: usize,
    #[serde(default = "default_weak_sigmas")]
    pub weak_sigmas: f64,
    #[serde(default = "default_strong_sigmas")]
    pub strong_sigmas: f64,
    #[serde(default)]
    pub init_mean_estimate: f64,
}

impl Default for PewmaParams {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            beta: default_beta(),
            training_length: default_training_length(),
            weak_sigmas: default_weak_sigmas(),
            strong_sigmas: default_strong_sigmas(),
            init_mean_estimate: 0.0,
        }
    }
}

impl PewmaParams {
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("alpha", self.alpha)?;
        if self.beta < 0.0 {
            return Err(DetectorError::Validation(format!(
                "beta must be >= 0, got {}",
                self.beta
            )));
        }
        if self.training_length == 0 {
            return Err(DetectorError::Validation(
                "trainingLength must be >= 1".to_string(),
            ));
        }
        check_sigmas(self.weak_sigmas, self.strong_sigmas)
    }
}

// ── CUSUM ───────────────────────────────────────────────────────────

/// Cumulative sum chart around a user-supplied target value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CusumParams {
    #[serde(rename = "type", default = "default_anomaly_type")]
    pub anomaly_type: AnomalyType,
    #[serde(default)]
    pub target_value: f64,
    #[serde(default = "default_weak_sigmas")]
    pub weak_sigmas: f64,
    #[serde(default = "default_strong_sigmas")]
    pub strong_sigmas: f64,
    /// Slack factor k, where the per-step slack is `slackParam * stdDev`.
    #[serde(default = "default_slack_param")]
    pub slack_param: f64,
    #[serde(default = "default_warm_up_period")]
    pub warm_up_period: usize,
    /// Seeds the previous-value state used by the moving range.
    #[serde(default)]
    pub init_mean_estimate: f64,
}

impl Default for CusumParams {
    fn default() -> Self {
        Self {
            anomaly_type: default_anomaly_type(),
            target_value: 0.0,
            weak_sigmas: default_weak_sigmas(),
            strong_sigmas: default_strong_sigmas(),
            slack_param: default_slack_param(),
            warm_up_period: default_warm_up_period(),
            init_mean_estimate: 0.0,
        }
    }
}

impl CusumParams {
    pub fn validate(&self) -> Result<()> {
        if self.slack_param < 0.0 {
            return Err(DetectorError::Validation(format!(
                "slackParam must be >= 0, got {}",
                self.slack_param
            )));
        }
        check_sigmas(self.weak_sigmas, self.strong_sigmas)
    }
}

// ── Individuals control chart ───────────────────────────────────────

/// Shewhart individuals (X/mR) chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IndividualsParams {
    /// Seeds the previous value and the initial target.
    #[serde(default)]
    pub init_value: f64,
    #[serde(default)]
    pub init_mean_estimate: f64,
    #[serde(default = "default_individuals_sigmas")]
    pub strong_sigmas: f64,
    #[serde(default = "default_warm_up_period")]
    pub warm_up_period: usize,
}

impl Default for IndividualsParams {
    fn default() -> Self {
        Self {
            init_value: 0.0,
            init_mean_estimate: 0.0,
            strong_sigmas: default_individuals_sigmas(),
            warm_up_period: default_warm_up_period(),
        }
    }
}

impl IndividualsParams {
    pub fn validate(&self) -> Result<()> {
        if self.strong_sigmas <= 0.0 {
            return Err(DetectorError::Validation(format!(
                "strongSigmas must be > 0, got {}",
                self.strong_sigmas
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ewma_defaults_and_validation() {
        let params = EwmaParams::default();
        assert_eq!(params.alpha, 0.15);
        assert_eq!(params.weak_sigmas, 3.0);
        assert_eq!(params.strong_sigmas, 4.0);
        assert_eq!(params.init_mean_estimate, 0.0);
        assert!(params.validate().is_ok());

        let bad = EwmaParams {
            alpha: 1.5,
            ..EwmaParams::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn pewma_rejects_zero_training_length() {
        let params = PewmaParams {
            training_length: 0,
            ..PewmaParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn cusum_parses_tail_from_document() {
        let json = r#"{ "type": "RIGHT_TAILED", "targetValue": 0.16, "slackParam": 0.5, "warmUpPeriod": 25 }"#;
        let params: CusumParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.anomaly_type, AnomalyType::RightTailed);
        assert_eq!(params.target_value, 0.16);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn cusum_rejects_negative_slack() {
        let params = CusumParams {
            slack_param: -0.1,
            ..CusumParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn individuals_defaults() {
        let params = IndividualsParams::default();
        assert_eq!(params.warm_up_period, 25);
        assert_eq!(params.strong_sigmas, 3.0);
        assert!(params.validate().is_ok());
    }
}
