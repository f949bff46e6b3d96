//! EWMA control chart detector.

use driftwatch_core::{AnomalyResult, AnomalyThresholds, AnomalyType, DetectorUuid, Observation};

use crate::classifier::{AnomalyClassifier, Bounds};
use crate::detector::Detector;
use crate::error::Result;
use crate::schema::EwmaParams;

/// Exponentially weighted moving average chart.
///
/// Thresholds are computed from the estimates *before* the update, so the
/// previous state predicts the current observation. There is no warm-up
/// gate: the first ~10 classifications are expected to be noisy (with zero
/// initial variance the thresholds start collapsed on the mean), and
/// callers are advised to ignore them.
#[derive(Debug)]
pub struct EwmaDetector {
    uuid: DetectorUuid,
    params: EwmaParams,
    classifier: AnomalyClassifier,
    mean: f64,
    variance: f64,
}

impl EwmaDetector {
    pub fn new(uuid: DetectorUuid, params: EwmaParams) -> Result<Self> {
        params.validate()?;
        let mean = params.init_mean_estimate;
        Ok(Self {
            uuid,
            params,
            classifier: AnomalyClassifier::new(AnomalyType::TwoTailed, Bounds::Inclusive),
            mean,
            variance: 0.0,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Welford-style online variance under exponential decay.
    fn update_estimates(&mut self, value: f64) {
        let diff = value - self.mean;
        let incr = self.params.alpha * diff;
        self.mean += incr;
        self.variance = (1.0 - self.params.alpha) * (self.variance + diff * incr);
    }
}

impl Detector for EwmaDetector {
    fn uuid(&self) -> DetectorUuid {
        self.uuid
    }

    fn name(&self) -> &'static str {
        "ewma"
    }

    fn classify(&mut self, obs: &Observation) -> AnomalyResult {
        let std_dev = self.variance.sqrt();
        let thresholds = AnomalyThresholds::from_bands(
            self.mean,
            self.params.weak_sigmas * std_dev,
            self.params.strong_sigmas * std_dev,
        );

        self.update_estimates(obs.value);

        let level = self.classifier.classify(&thresholds, obs.value);
        AnomalyResult::new(level)
            .with_predicted(self.mean)
            .with_thresholds(thresholds)
    }
}
