//! Point/interval forecasting strategies and the generic detector built
//! from them.
//!
//! The legacy configuration namespace organizes detection as two composable
//! pieces: a [`PointForecaster`] produces the expected value, an
//! [`IntervalForecaster`] turns that expectation into weak/strong bands.
//! New forecast shapes slot in without new detector types.

pub mod interval;
pub mod point;

use driftwatch_core::{
    AnomalyLevel, AnomalyResult, AnomalyThresholds, AnomalyType, DetectorUuid, Observation,
};

use crate::classifier::{AnomalyClassifier, Bounds};
use crate::detector::Detector;

/// Expected value for one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointForecast {
    pub value: f64,
    /// True while the forecaster is still accumulating enough history to
    /// be trusted.
    pub warmup: bool,
}

impl PointForecast {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            warmup: false,
        }
    }
}

/// Weak/strong bands around a point forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalForecast {
    pub upper_strong: f64,
    pub upper_weak: f64,
    pub lower_weak: f64,
    pub lower_strong: f64,
}

impl From<IntervalForecast> for AnomalyThresholds {
    fn from(f: IntervalForecast) -> Self {
        AnomalyThresholds {
            upper_strong: f.upper_strong,
            upper_weak: f.upper_weak,
            lower_weak: f.lower_weak,
            lower_strong: f.lower_strong,
        }
    }
}

/// Produces the expected value for each observation, updating internal
/// state as a side effect. `None` means no forecast is available yet.
pub trait PointForecaster: Send {
    fn forecast(&mut self, obs: &Observation) -> Option<PointForecast>;
}

/// Produces threshold bands around a point forecast, updating internal
/// state as a side effect.
pub trait IntervalForecaster: Send {
    fn forecast(&mut self, obs: &Observation, point_forecast: f64) -> IntervalForecast;
}

/// Detector assembled from a point forecaster and an interval forecaster.
///
/// No point forecast yields UNKNOWN; a warming-up forecast yields
/// MODEL_WARMUP; otherwise the observed value is classified against the
/// interval bands with the configured tail.
pub struct ForecastingDetector {
    uuid: DetectorUuid,
    name: &'static str,
    point: Box<dyn PointForecaster>,
    interval: Box<dyn IntervalForecaster>,
    classifier: AnomalyClassifier,
}

impl ForecastingDetector {
    pub fn new(
        uuid: DetectorUuid,
        name: &'static str,
        point: Box<dyn PointForecaster>,
        interval: Box<dyn IntervalForecaster>,
        anomaly_type: AnomalyType,
    ) -> Self {
        Self {
            uuid,
            name,
            point,
            interval,
            classifier: AnomalyClassifier::new(anomaly_type, Bounds::Inclusive),
        }
    }
}

impl Detector for ForecastingDetector {
    fn uuid(&self) -> DetectorUuid {
        self.uuid
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn classify(&mut self, obs: &Observation) -> AnomalyResult {
        let point = match self.point.forecast(obs) {
            None => return AnomalyResult::new(AnomalyLevel::Unknown),
            Some(point) if point.warmup => return AnomalyResult::new(AnomalyLevel::ModelWarmup),
            Some(point) => point,
        };

        let interval = self.interval.forecast(obs, point.value);
        let thresholds: AnomalyThresholds = interval.into();
        let level = self.classifier.classify(&thresholds, obs.value);

        AnomalyResult::new(level)
            .with_predicted(point.value)
            .with_thresholds(thresholds)
    }
}
