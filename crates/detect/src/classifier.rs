//! Threshold-to-level classification shared by all detectors.

use driftwatch_core::{AnomalyLevel, AnomalyThresholds, AnomalyType};

/// Boundary-inequality policy.
///
/// `Inclusive` treats a value sitting exactly on a threshold as crossing it
/// (`<=`/`>=`); `Exclusive` requires strictly crossing (`<`/`>`). Detectors
/// whose thresholds can collapse to the mean under zero variance (CUSUM,
/// PEWMA, Holt-Winters) use `Exclusive` so a flat signal classifies NORMAL
/// instead of STRONG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    Inclusive,
    Exclusive,
}

/// Maps an observed value against thresholds for a given tail.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyClassifier {
    anomaly_type: AnomalyType,
    bounds: Bounds,
}

impl AnomalyClassifier {
    pub fn new(anomaly_type: AnomalyType, bounds: Bounds) -> Self {
        Self { anomaly_type, bounds }
    }

    pub fn classify(&self, thresholds: &AnomalyThresholds, observed: f64) -> AnomalyLevel {
        let above = |threshold: f64| match self.bounds {
            Bounds::Inclusive => observed >= threshold,
            Bounds::Exclusive => observed > threshold,
        };
        let below = |threshold: f64| match self.bounds {
            Bounds::Inclusive => observed <= threshold,
            Bounds::Exclusive => observed < threshold,
        };

        match self.anomaly_type {
            AnomalyType::LeftTailed => {
                if below(thresholds.lower_strong) {
                    AnomalyLevel::Strong
                } else if below(thresholds.lower_weak) {
                    AnomalyLevel::Weak
                } else {
                    AnomalyLevel::Normal
                }
            }
            AnomalyType::RightTailed => {
                if above(thresholds.upper_strong) {
                    AnomalyLevel::Strong
                } else if above(thresholds.upper_weak) {
                    AnomalyLevel::Weak
                } else {
                    AnomalyLevel::Normal
                }
            }
            AnomalyType::TwoTailed => {
                if above(thresholds.upper_strong) || below(thresholds.lower_strong) {
                    AnomalyLevel::Strong
                } else if above(thresholds.upper_weak) || below(thresholds.lower_weak) {
                    AnomalyLevel::Weak
                } else {
                    AnomalyLevel::Normal
                }
            }
        }
    }
}
