//! Probabilistic EWMA detector.

use driftwatch_core::{AnomalyResult, AnomalyThresholds, AnomalyType, DetectorUuid, Observation};

use crate::classifier::{AnomalyClassifier, Bounds};
use crate::detector::Detector;
use crate::error::Result;
use crate::schema::PewmaParams;
use crate::stats::gaussian_density;

/// PEWMA: an EWMA whose smoothing weight adapts to how probable each
/// observation is under the current estimate, so outliers move the
/// estimates less than they would under plain EWMA.
///
/// During the training regime (the first `training_length` observations)
/// the weight follows the sample-mean schedule `1 - 1/n` instead, which
/// makes the early estimates behave like a plain running mean.
#[derive(Debug)]
pub struct PewmaDetector {
    uuid: DetectorUuid,
    params: PewmaParams,
    classifier: AnomalyClassifier,
    /// `1 - alpha`: the complement standardizes the parameter with the
    /// EWMA detector while matching the weighting in the PEWMA paper.
    adj_alpha: f64,
    /// First weighted moment.
    s1: f64,
    /// Second weighted moment.
    s2: f64,
    training_count: usize,
    mean: f64,
    std_dev: f64,
}

impl PewmaDetector {
    pub fn new(uuid: DetectorUuid, params: PewmaParams) -> Result<Self> {
        params.validate()?;
        let init = params.init_mean_estimate;
        let mut detector = Self {
            uuid,
            adj_alpha: 1.0 - params.alpha,
            params,
            classifier: AnomalyClassifier::new(AnomalyType::TwoTailed, Bounds::Exclusive),
            s1: init,
            s2: init * init,
            training_count: 1,
            mean: 0.0,
            std_dev: 0.0,
        };
        detector.refresh_moments();
        Ok(detector)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    fn refresh_moments(&mut self) {
        self.mean = self.s1;
        self.std_dev = (self.s2 - self.s1 * self.s1).sqrt();
    }

    fn update_estimates(&mut self, value: f64) {
        let z = if self.std_dev == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std_dev
        };
        let p = gaussian_density(z);
        let alpha = self.adaptive_alpha(p);

        self.s1 = alpha * self.s1 + (1.0 - alpha) * value;
        self.s2 = alpha * self.s2 + (1.0 - alpha) * value * value;
        self.refresh_moments();
    }

    fn adaptive_alpha(&mut self, p: f64) -> f64 {
        if self.training_count < self.params.training_length {
            self.training_count += 1;
            return 1.0 - 1.0 / self.training_count as f64;
        }
        (1.0 - self.params.beta * p) * self.adj_alpha
    }
}

impl Detector for PewmaDetector {
    fn uuid(&self) -> DetectorUuid {
        self.uuid
    }

    fn name(&self) -> &'static str {
        "pewma"
    }

    fn classify(&mut self, obs: &Observation) -> AnomalyResult {
        let thresholds = AnomalyThresholds::from_bands(
            self.mean,
            self.params.weak_sigmas * self.std_dev,
            self.params.strong_sigmas * self.std_dev,
        );

        self.update_estimates(obs.value);

        // Exclusive bounds: a flat signal keeps the std-dev at zero, and
        // repeated constant values must classify NORMAL, not STRONG.
        let level = self.classifier.classify(&thresholds, obs.value);
        AnomalyResult::new(level)
            .with_predicted(self.mean)
            .with_thresholds(thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftwatch_core::AnomalyLevel;
    use uuid::Uuid;

    fn detector(alpha: f64, beta: f64, init: f64) -> PewmaDetector {
        let params = PewmaParams {
            alpha,
            beta,
            training_length: 30,
            weak_sigmas: 2.0,
            strong_sigmas: 3.0,
            init_mean_estimate: init,
        };
        PewmaDetector::new(Uuid::new_v4(), params).unwrap()
    }

    #[test]
    fn constant_stream_never_flags() {
        let mut d = detector(0.05, 1.0, 5.0);
        for i in 0..100 {
            let result = d.classify(&Observation::new(i, 5.0));
            assert_eq!(result.level, AnomalyLevel::Normal, "observation {i}");
        }
        assert_eq!(d.mean(), 5.0);
        assert_eq!(d.std_dev(), 0.0);
    }

    #[test]
    fn training_regime_behaves_like_a_running_mean() {
        // With the 1 - 1/n schedule the first few estimates track the
        // sample mean of what has been seen (seeded by the init estimate).
        let mut d = detector(0.05, 1.0, 2.0);
        d.classify(&Observation::new(0, 4.0));
        // alpha_1 = 1 - 1/2 = 0.5: s1 = 0.5*2 + 0.5*4 = 3.0
        assert!((d.mean() - 3.0).abs() < 1e-12);
        d.classify(&Observation::new(1, 6.0));
        // alpha_2 = 1 - 1/3: s1 = (2/3)*3 + (1/3)*6 = 4.0
        assert!((d.mean() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn adaptive_weight_scales_with_observation_probability() {
        // training_length = 1 puts the detector in the adaptive regime from
        // the first observation. With zero std-dev, z = 0 and the density
        // is 1/sqrt(2*pi), so the first adaptive step is fully determined:
        //   alpha_1 = (1 - beta * 0.3989422804014327) * (1 - 0.15)
        //   s1 = alpha_1 * 0 + (1 - alpha_1) * 10
        let params = PewmaParams {
            alpha: 0.15,
            beta: 1.0,
            training_length: 1,
            weak_sigmas: 2.0,
            strong_sigmas: 3.0,
            init_mean_estimate: 0.0,
        };
        let mut d = PewmaDetector::new(Uuid::new_v4(), params).unwrap();
        d.classify(&Observation::new(0, 10.0));

        let alpha_1 = (1.0 - 0.3989422804014327) * 0.85;
        let expected = (1.0 - alpha_1) * 10.0;
        assert!((d.mean() - expected).abs() < 1e-12);
    }
}
