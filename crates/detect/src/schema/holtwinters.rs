//! Holt-Winters (triple exponential smoothing) parameters.

use driftwatch_core::AnomalyType;
use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, Result};

use super::{check_sigmas, check_unit_interval};

/// Which seasonality decomposition to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeasonalityType {
    Additive,
    Multiplicative,
}

impl SeasonalityType {
    /// Identity element for the seasonal component: 1 when seasons
    /// multiply, 0 when they add.
    pub fn identity(self) -> f64 {
        match self {
            SeasonalityType::Multiplicative => 1.0,
            SeasonalityType::Additive => 0.0,
        }
    }
}

/// How to obtain the initial level/base/seasonal components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoltWintersTrainingMethod {
    /// Start from the supplied (or identity) estimates immediately.
    None,
    /// Accumulate the first two periods of raw data, derive level, base and
    /// seasonal offsets from them, then replay those observations through
    /// the standard update rule.
    Simple,
}

fn default_smoothing() -> f64 {
    0.15
}

fn default_weak_sigmas() -> f64 {
    3.0
}

fn default_strong_sigmas() -> f64 {
    4.0
}

fn default_seasonality_type() -> SeasonalityType {
    SeasonalityType::Multiplicative
}

fn default_training_method() -> HoltWintersTrainingMethod {
    HoltWintersTrainingMethod::None
}

fn default_anomaly_type() -> AnomalyType {
    AnomalyType::TwoTailed
}

/// Triple-exponential-smoothing parameters.
///
/// `period` is the number of observations per seasonal cycle (24 for hourly
/// samples with daily seasons, 7 for daily samples with weekly seasons).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HoltWintersParams {
    #[serde(alias = "frequency")]
    pub period: usize,
    /// Level smoothing weight.
    #[serde(default = "default_smoothing")]
    pub alpha: f64,
    /// Base (trend) smoothing weight.
    #[serde(default = "default_smoothing")]
    pub beta: f64,
    /// Seasonal smoothing weight.
    #[serde(default = "default_smoothing")]
    pub gamma: f64,
    #[serde(default = "default_seasonality_type")]
    pub seasonality_type: SeasonalityType,
    #[serde(rename = "type", default = "default_anomaly_type")]
    pub anomaly_type: AnomalyType,
    /// Observations to absorb before emitting real classifications. With
    /// SIMPLE training anything below `2 * period` is raised to that floor.
    #[serde(default)]
    pub warm_up_period: usize,
    #[serde(default = "default_weak_sigmas")]
    pub weak_sigmas: f64,
    #[serde(default = "default_strong_sigmas")]
    pub strong_sigmas: f64,
    /// Initial level; identity for the seasonality type when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_level_estimate: Option<f64>,
    /// Initial base; identity for the seasonality type when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_base_estimate: Option<f64>,
    /// Either empty or exactly `period` values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub init_seasonal_estimates: Vec<f64>,
    #[serde(default = "default_training_method")]
    pub init_training_method: HoltWintersTrainingMethod,
}

impl HoltWintersParams {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            alpha: default_smoothing(),
            beta: default_smoothing(),
            gamma: default_smoothing(),
            seasonality_type: default_seasonality_type(),
            anomaly_type: default_anomaly_type(),
            warm_up_period: 0,
            weak_sigmas: default_weak_sigmas(),
            strong_sigmas: default_strong_sigmas(),
            init_level_estimate: None,
            init_base_estimate: None,
            init_seasonal_estimates: Vec::new(),
            init_training_method: default_training_method(),
        }
    }

    /// Length of the SIMPLE training window, 0 when training is disabled.
    pub fn init_training_period(&self) -> usize {
        match self.init_training_method {
            HoltWintersTrainingMethod::Simple => self.period * 2,
            HoltWintersTrainingMethod::None => 0,
        }
    }

    /// Warm-up after accounting for the training floor. SIMPLE training
    /// consumes the first `2 * period` observations, so no anomaly can be
    /// emitted before then.
    pub fn effective_warm_up_period(&self) -> usize {
        let floor = self.init_training_period();
        if self.warm_up_period < floor {
            tracing::warn!(
                "warmUpPeriod ({}) below training window ({}); using {}",
                self.warm_up_period,
                floor,
                floor
            );
            floor
        } else {
            self.warm_up_period
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.period == 0 {
            return Err(DetectorError::Validation(
                "period must be greater than 0".to_string(),
            ));
        }
        check_unit_interval("alpha", self.alpha)?;
        check_unit_interval("beta", self.beta)?;
        check_unit_interval("gamma", self.gamma)?;
        check_sigmas(self.weak_sigmas, self.strong_sigmas)?;
        self.validate_seasonal_estimates()
    }

    fn validate_seasonal_estimates(&self) -> Result<()> {
        let n = self.init_seasonal_estimates.len();
        if n != 0 && n != self.period {
            return Err(DetectorError::Validation(format!(
                "initSeasonalEstimates has {} values but period is {}",
                n, self.period
            )));
        }
        if self.seasonality_type == SeasonalityType::Multiplicative
            && self.init_seasonal_estimates.iter().any(|&s| s == 0.0)
        {
            return Err(DetectorError::Validation(
                "multiplicative seasonality requires non-zero initSeasonalEstimates".to_string(),
            ));
        }
        Ok(())
    }
}
