//! Constant threshold detector.

use driftwatch_core::{AnomalyResult, DetectorUuid, Observation};

use crate::classifier::{AnomalyClassifier, Bounds};
use crate::detector::Detector;
use crate::error::Result;
use crate::schema::ConstantThresholdParams;

/// Stateless detector over fixed, configured thresholds. No warm-up.
#[derive(Debug)]
pub struct ConstantThresholdDetector {
    uuid: DetectorUuid,
    params: ConstantThresholdParams,
    classifier: AnomalyClassifier,
}

impl ConstantThresholdDetector {
    pub fn new(uuid: DetectorUuid, params: ConstantThresholdParams) -> Result<Self> {
        params.validate()?;
        let classifier = AnomalyClassifier::new(params.anomaly_type, Bounds::Inclusive);
        Ok(Self {
            uuid,
            params,
            classifier,
        })
    }
}

impl Detector for ConstantThresholdDetector {
    fn uuid(&self) -> DetectorUuid {
        self.uuid
    }

    fn name(&self) -> &'static str {
        "constant-threshold"
    }

    fn classify(&mut self, obs: &Observation) -> AnomalyResult {
        let level = self.classifier.classify(&self.params.thresholds, obs.value);
        AnomalyResult::new(level).with_thresholds(self.params.thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftwatch_core::{AnomalyLevel, AnomalyThresholds, AnomalyType};
    use uuid::Uuid;

    fn detector(anomaly_type: AnomalyType) -> ConstantThresholdDetector {
        let params = ConstantThresholdParams {
            anomaly_type,
            thresholds: AnomalyThresholds {
                upper_strong: 100.0,
                upper_weak: 50.0,
                lower_weak: -50.0,
                lower_strong: -100.0,
            },
        };
        ConstantThresholdDetector::new(Uuid::new_v4(), params).unwrap()
    }

    fn classify(d: &mut ConstantThresholdDetector, value: f64) -> AnomalyLevel {
        d.classify(&Observation::new(0, value)).level
    }

    #[test]
    fn right_tailed_boundaries_are_inclusive() {
        let mut d = detector(AnomalyType::RightTailed);
        assert_eq!(classify(&mut d, 25.0), AnomalyLevel::Normal);
        assert_eq!(classify(&mut d, 50.0), AnomalyLevel::Weak);
        assert_eq!(classify(&mut d, 100.0), AnomalyLevel::Strong);
        assert_eq!(classify(&mut d, -200.0), AnomalyLevel::Normal);
    }

    #[test]
    fn two_tailed_checks_both_sides() {
        let mut d = detector(AnomalyType::TwoTailed);
        assert_eq!(classify(&mut d, 0.0), AnomalyLevel::Normal);
        assert_eq!(classify(&mut d, -75.0), AnomalyLevel::Weak);
        assert_eq!(classify(&mut d, -150.0), AnomalyLevel::Strong);
        assert_eq!(classify(&mut d, 150.0), AnomalyLevel::Strong);
    }

    #[test]
    fn result_carries_the_configured_thresholds() {
        let mut d = detector(AnomalyType::TwoTailed);
        let result = d.classify(&Observation::new(0, 0.0));
        assert_eq!(result.thresholds.unwrap().upper_strong, 100.0);
        assert!(result.predicted.is_none());
    }
}
