//! Holt-Winters (triple exponential smoothing) detector.

pub mod algorithm;
pub mod components;
pub mod training;

use driftwatch_core::{
    AnomalyLevel, AnomalyResult, AnomalyThresholds, DetectorUuid, Observation,
};

use crate::classifier::{AnomalyClassifier, Bounds};
use crate::detector::Detector;
use crate::error::Result;
use crate::schema::{HoltWintersParams, HoltWintersTrainingMethod};

use components::HoltWintersComponents;
use training::SimpleTrainingModel;

/// Seasonal anomaly detector: forecasts each observation from level, trend
/// and seasonal components, then sizes the thresholds from the seasonal
/// bucket's running standard deviation.
///
/// Until the warm-up (and optional two-period SIMPLE training) completes,
/// results are MODEL_WARMUP. With fresh identity estimates and no training
/// the early thresholds collapse onto the forecast, so the first live
/// observations can classify STRONG; callers wanting quiet starts should
/// configure `warmUpPeriod` accordingly.
pub struct HoltWintersDetector {
    uuid: DetectorUuid,
    params: HoltWintersParams,
    warm_up_period: usize,
    classifier: AnomalyClassifier,
    components: HoltWintersComponents,
    training: SimpleTrainingModel,
}

impl HoltWintersDetector {
    pub fn new(uuid: DetectorUuid, params: HoltWintersParams) -> Result<Self> {
        params.validate()?;
        let mut components = HoltWintersComponents::new(&params);
        let init_forecast = algorithm::forecast(
            params.seasonality_type,
            components.level(),
            components.base(),
            components.seasonal(components.current_seasonal_index()),
        );
        components.set_forecast(init_forecast);

        Ok(Self {
            uuid,
            warm_up_period: params.effective_warm_up_period(),
            classifier: AnomalyClassifier::new(params.anomaly_type, Bounds::Exclusive),
            training: SimpleTrainingModel::new(&params),
            components,
            params,
        })
    }

    pub fn components(&self) -> &HoltWintersComponents {
        &self.components
    }

    fn training_complete(&self) -> bool {
        match self.params.init_training_method {
            HoltWintersTrainingMethod::None => true,
            HoltWintersTrainingMethod::Simple => self.training.is_complete(&self.params),
        }
    }

    fn observe(&mut self, observed: f64) {
        if self.training_complete() {
            algorithm::observe_and_update(observed, &self.params, &mut self.components);
        } else {
            self.training
                .observe_and_train(observed, &self.params, &mut self.components);
        }
    }

    fn warming_up(&self) -> bool {
        self.components.n() <= self.warm_up_period as u64
    }
}

impl Detector for HoltWintersDetector {
    fn uuid(&self) -> DetectorUuid {
        self.uuid
    }

    fn name(&self) -> &'static str {
        "holt-winters"
    }

    fn classify(&mut self, obs: &Observation) -> AnomalyResult {
        let prev_forecast = self.components.forecast();
        self.observe(obs.value);

        if self.warming_up() {
            return AnomalyResult::new(AnomalyLevel::ModelWarmup);
        }

        let std_dev = self
            .components
            .seasonal_std_dev(self.components.current_seasonal_index());
        let thresholds = AnomalyThresholds::from_bands(
            prev_forecast,
            self.params.weak_sigmas * std_dev,
            self.params.strong_sigmas * std_dev,
        );
        let level = self.classifier.classify(&thresholds, obs.value);

        AnomalyResult::new(level)
            .with_predicted(prev_forecast)
            .with_thresholds(thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SeasonalityType;
    use uuid::Uuid;

    fn seasonal_series(cycles: usize) -> Vec<f64> {
        // Period-4 pattern with mild noise-free seasonality.
        let pattern = [10.0, 20.0, 30.0, 20.0];
        (0..cycles * 4).map(|i| pattern[i % 4]).collect()
    }

    #[test]
    fn simple_training_consumes_two_periods_as_warm_up() {
        let mut params = HoltWintersParams::new(4);
        params.init_training_method = HoltWintersTrainingMethod::Simple;
        params.seasonality_type = SeasonalityType::Additive;
        let mut d = HoltWintersDetector::new(Uuid::new_v4(), params).unwrap();

        for (i, &y) in seasonal_series(3).iter().enumerate() {
            let level = d.classify(&Observation::new(i as i64, y)).level;
            if i < 8 {
                assert_eq!(level, AnomalyLevel::ModelWarmup, "observation {i}");
            } else {
                assert_ne!(level, AnomalyLevel::ModelWarmup, "observation {i}");
            }
        }
    }

    #[test]
    fn repeating_pattern_classifies_normal_after_training() {
        let mut params = HoltWintersParams::new(4);
        params.init_training_method = HoltWintersTrainingMethod::Simple;
        params.seasonality_type = SeasonalityType::Additive;
        params.warm_up_period = 12;
        let mut d = HoltWintersDetector::new(Uuid::new_v4(), params).unwrap();

        for (i, &y) in seasonal_series(10).iter().enumerate() {
            let result = d.classify(&Observation::new(i as i64, y));
            if i >= 12 {
                assert_eq!(result.level, AnomalyLevel::Normal, "observation {i}");
            }
        }
    }

    #[test]
    fn predicted_is_the_forecast_stored_by_the_previous_observation() {
        // The update step stores `(level + base) (+|*) season` using the
        // season of the observation just absorbed. On an exact repeating
        // pattern the components sit at a fixed point, so the prediction
        // reported for observation i equals the pattern value at i - 1.
        let mut params = HoltWintersParams::new(4);
        params.init_training_method = HoltWintersTrainingMethod::Simple;
        params.seasonality_type = SeasonalityType::Additive;
        params.warm_up_period = 8;
        let mut d = HoltWintersDetector::new(Uuid::new_v4(), params).unwrap();

        let series = seasonal_series(6);
        for (i, &y) in series.iter().enumerate() {
            let result = d.classify(&Observation::new(i as i64, y));
            if i >= 8 {
                let predicted = result.predicted.unwrap();
                assert!(
                    (predicted - series[i - 1]).abs() < 1e-9,
                    "observation {i}: predicted {predicted}, expected {}",
                    series[i - 1]
                );
            }
        }
    }

    #[test]
    fn zero_variance_start_can_flag_strong() {
        // No training, identity estimates: thresholds collapse onto the
        // forecast and the first live observation classifies STRONG.
        let mut params = HoltWintersParams::new(4);
        params.seasonality_type = SeasonalityType::Additive;
        params.warm_up_period = 0;
        let mut d = HoltWintersDetector::new(Uuid::new_v4(), params).unwrap();
        let result = d.classify(&Observation::new(0, 50.0));
        assert_eq!(result.level, AnomalyLevel::Strong);
    }

    #[test]
    fn untrained_detector_warm_up_honors_configured_period() {
        let mut params = HoltWintersParams::new(4);
        params.warm_up_period = 3;
        params.init_level_estimate = Some(10.0);
        params.init_seasonal_estimates = vec![1.0, 1.0, 1.0, 1.0];
        let mut d = HoltWintersDetector::new(Uuid::new_v4(), params).unwrap();

        for i in 0..6 {
            let level = d.classify(&Observation::new(i, 10.0)).level;
            if i < 3 {
                assert_eq!(level, AnomalyLevel::ModelWarmup, "observation {i}");
            } else {
                assert_ne!(level, AnomalyLevel::ModelWarmup, "observation {i}");
            }
        }
    }
}
