//! Parameters for the standalone forecasting strategies used by the legacy
//! detector namespace.

use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, Result};

use super::{check_sigmas, check_unit_interval};

fn default_alpha() -> f64 {
    0.15
}

fn default_weak_sigmas() -> f64 {
    3.0
}

fn default_strong_sigmas() -> f64 {
    4.0
}

fn default_interval_length() -> u32 {
    60
}

fn default_missing_value() -> f64 {
    f64::NAN
}

// ── Exponential Welford interval forecaster ─────────────────────────

/// Interval bands from an exponentially weighted online variance of the
/// point-forecast residuals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WelfordIntervalParams {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default)]
    pub init_variance_estimate: f64,
    #[serde(default = "default_weak_sigmas")]
    pub weak_sigmas: f64,
    #[serde(default = "default_strong_sigmas")]
    pub strong_sigmas: f64,
}

impl Default for WelfordIntervalParams {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            init_variance_estimate: 0.0,
            weak_sigmas: default_weak_sigmas(),
            strong_sigmas: default_strong_sigmas(),
        }
    }
}

impl WelfordIntervalParams {
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("alpha", self.alpha)?;
        if self.init_variance_estimate < 0.0 {
            return Err(DetectorError::Validation(format!(
                "initVarianceEstimate must be >= 0, got {}",
                self.init_variance_estimate
            )));
        }
        check_sigmas(self.weak_sigmas, self.strong_sigmas)
    }
}

// ── Simple moving average ───────────────────────────────────────────

/// Mean over a fixed look-back window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SmaParams {
    pub look_back_period: usize,
    /// Optional seed values fed through the window before live data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial_period_of_values: Vec<f64>,
}

impl SmaParams {
    pub fn validate(&self) -> Result<()> {
        if self.look_back_period == 0 {
            return Err(DetectorError::Validation(
                "lookBackPeriod must be greater than 0".to_string(),
            ));
        }
        if self.initial_period_of_values.len() > self.look_back_period {
            return Err(DetectorError::Validation(format!(
                "initialPeriodOfValues has {} values but lookBackPeriod is {}",
                self.initial_period_of_values.len(),
                self.look_back_period
            )));
        }
        Ok(())
    }
}

// ── Seasonal naive ──────────────────────────────────────────────────

/// Repeats the value observed one full cycle ago.
///
/// The buffer is keyed by wall-clock interval: skipped intervals are padded
/// with `missing_value_placeholder`, and no forecast is produced while the
/// current slot still holds the placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeasonalNaiveParams {
    /// Number of observations per cycle.
    pub cycle_length: usize,
    /// Seconds between two observations.
    #[serde(default = "default_interval_length")]
    pub interval_length: u32,
    #[serde(default = "default_missing_value")]
    pub missing_value_placeholder: f64,
}

impl SeasonalNaiveParams {
    pub fn validate(&self) -> Result<()> {
        if self.cycle_length == 0 {
            return Err(DetectorError::Validation(
                "cycleLength must be greater than 0".to_string(),
            ));
        }
        if self.interval_length == 0 {
            return Err(DetectorError::Validation(
                "intervalLength must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welford_defaults_validate() {
        assert!(WelfordIntervalParams::default().validate().is_ok());
        let bad = WelfordIntervalParams {
            init_variance_estimate: -1.0,
            ..WelfordIntervalParams::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn sma_rejects_oversized_seed_window() {
        let params = SmaParams {
            look_back_period: 2,
            initial_period_of_values: vec![1.0, 2.0, 3.0],
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn seasonal_naive_parses_and_validates() {
        let json = r#"{ "cycleLength": 288, "intervalLength": 300 }"#;
        let params: SeasonalNaiveParams = serde_json::from_str(json).unwrap();
        assert!(params.validate().is_ok());
        assert!(params.missing_value_placeholder.is_nan());

        let zero = SeasonalNaiveParams {
            cycle_length: 0,
            ..params
        };
        assert!(zero.validate().is_err());
    }
}
