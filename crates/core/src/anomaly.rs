//! Anomaly classification data types shared by every detector.

use serde::{Deserialize, Serialize};

/// Severity of a classified observation.
///
/// `Unknown` and `ModelWarmup` are emitted only while a detector has not
/// yet seen enough observations to trust its statistics; once past warm-up
/// a detector never reverts to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyLevel {
    Unknown,
    ModelWarmup,
    Normal,
    Weak,
    Strong,
}

impl AnomalyLevel {
    /// True for the two severities that count as an anomaly.
    pub fn is_anomalous(self) -> bool {
        matches!(self, AnomalyLevel::Weak | AnomalyLevel::Strong)
    }

    /// Wire-format name, e.g. `MODEL_WARMUP`.
    pub fn as_str(self) -> &'static str {
        match self {
            AnomalyLevel::Unknown => "UNKNOWN",
            AnomalyLevel::ModelWarmup => "MODEL_WARMUP",
            AnomalyLevel::Normal => "NORMAL",
            AnomalyLevel::Weak => "WEAK",
            AnomalyLevel::Strong => "STRONG",
        }
    }
}

/// Which side(s) of the distribution count as anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyType {
    LeftTailed,
    RightTailed,
    TwoTailed,
}

/// Weak and strong thresholds supporting one- and two-tailed tests.
///
/// Correct detectors always produce `upper_strong >= upper_weak >=
/// lower_weak >= lower_strong`; degenerate (collapsed) values are legal and
/// occur whenever a variance estimate is still zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyThresholds {
    pub upper_strong: f64,
    pub upper_weak: f64,
    pub lower_weak: f64,
    pub lower_strong: f64,
}

impl AnomalyThresholds {
    /// Symmetric bands around a center value.
    pub fn from_bands(center: f64, weak_delta: f64, strong_delta: f64) -> Self {
        Self {
            upper_strong: center + strong_delta,
            upper_weak: center + weak_delta,
            lower_weak: center - weak_delta,
            lower_strong: center - strong_delta,
        }
    }
}

/// Outcome of a single classify call. Produced fresh per observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyResult {
    pub level: AnomalyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<AnomalyThresholds>,
}

impl AnomalyResult {
    pub fn new(level: AnomalyLevel) -> Self {
        Self {
            level,
            predicted: None,
            thresholds: None,
        }
    }

    pub fn with_predicted(mut self, predicted: f64) -> Self {
        self.predicted = Some(predicted);
        self
    }

    pub fn with_thresholds(mut self, thresholds: AnomalyThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }
}
