//! Type-keyed detector factory.
//!
//! Maps a configuration document's `type` string to a provider that parses
//! and validates the algorithm's parameters, then constructs the detector
//! bound to the document's UUID. A static registration table replaces the
//! reflection-based instantiation of older systems: adding an algorithm
//! means adding one provider entry.

use std::collections::HashMap;

use driftwatch_core::{AnomalyType, DetectorDocument, DetectorUuid};
use serde_json::Value;
use tracing::info;

use crate::algo::{
    ConstantThresholdDetector, CusumDetector, EwmaDetector, HoltWintersDetector,
    IndividualsControlChartDetector, PewmaDetector,
};
use crate::detector::Detector;
use crate::error::{DetectorError, Result};
use crate::forecast::interval::ExponentialWelfordIntervalForecaster;
use crate::forecast::point::{
    EwmaPointForecaster, HoltWintersPointForecaster, PewmaPointForecaster,
    SeasonalNaivePointForecaster,
};
use crate::forecast::ForecastingDetector;
use crate::schema::{
    ConstantThresholdParams, CusumParams, EwmaParams, HoltWintersParams, IndividualsParams,
    PewmaParams, SeasonalNaiveParams, WelfordIntervalParams,
};

type Provider = fn(DetectorUuid, &Value) -> Result<Box<dyn Detector>>;

/// Registry of detector providers keyed by document type string.
pub struct DetectorRegistry {
    providers: HashMap<&'static str, Provider>,
}

impl DetectorRegistry {
    /// Registry with every built-in provider: the six direct engines plus
    /// the legacy forecasting-detector namespace.
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            providers: HashMap::new(),
        };
        registry.register("constant-threshold", build_constant_threshold);
        registry.register("cusum", build_cusum);
        registry.register("ewma", build_ewma);
        registry.register("holt-winters", build_holt_winters);
        registry.register("individuals", build_individuals);
        registry.register("pewma", build_pewma);

        // Legacy namespace: the same engines organized as point + interval
        // forecaster pairs.
        registry.register("ewma-detector", build_legacy_ewma);
        registry.register("holtwinters-detector", build_legacy_holt_winters);
        registry.register("pewma-detector", build_legacy_pewma);
        registry.register("seasonalnaive-detector", build_legacy_seasonal_naive);
        registry
    }

    pub fn register(&mut self, detector_type: &'static str, provider: Provider) {
        self.providers.insert(detector_type, provider);
    }

    /// Registered type strings, for diagnostics.
    pub fn detector_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.providers.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Build a detector from a configuration document. Fails fast on an
    /// unregistered type or invalid parameters; no silent defaults.
    pub fn build(&self, document: &DetectorDocument) -> Result<Box<dyn Detector>> {
        let provider = self
            .providers
            .get(document.detector_type.as_str())
            .ok_or_else(|| {
                DetectorError::UnknownDetectorType(document.detector_type.clone())
            })?;
        let detector = provider(document.uuid, &document.detector_config)?;
        info!(
            "Built detector: type={}, uuid={}",
            document.detector_type, document.uuid
        );
        Ok(detector)
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ── Direct engine providers ─────────────────────────────────────────

fn build_constant_threshold(uuid: DetectorUuid, config: &Value) -> Result<Box<dyn Detector>> {
    let params: ConstantThresholdParams = serde_json::from_value(config.clone())?;
    Ok(Box::new(ConstantThresholdDetector::new(uuid, params)?))
}

fn build_cusum(uuid: DetectorUuid, config: &Value) -> Result<Box<dyn Detector>> {
    let params: CusumParams = serde_json::from_value(config.clone())?;
    Ok(Box::new(CusumDetector::new(uuid, params)?))
}

fn build_ewma(uuid: DetectorUuid, config: &Value) -> Result<Box<dyn Detector>> {
    let params: EwmaParams = serde_json::from_value(config.clone())?;
    Ok(Box::new(EwmaDetector::new(uuid, params)?))
}

fn build_holt_winters(uuid: DetectorUuid, config: &Value) -> Result<Box<dyn Detector>> {
    let params: HoltWintersParams = serde_json::from_value(config.clone())?;
    Ok(Box::new(HoltWintersDetector::new(uuid, params)?))
}

fn build_individuals(uuid: DetectorUuid, config: &Value) -> Result<Box<dyn Detector>> {
    let params: IndividualsParams = serde_json::from_value(config.clone())?;
    Ok(Box::new(IndividualsControlChartDetector::new(uuid, params)?))
}

fn build_pewma(uuid: DetectorUuid, config: &Value) -> Result<Box<dyn Detector>> {
    let params: PewmaParams = serde_json::from_value(config.clone())?;
    Ok(Box::new(PewmaDetector::new(uuid, params)?))
}

// ── Legacy forecasting-detector providers ───────────────────────────
//
// The legacy configs couple the point forecast parameters with the sigma
// bands, so the interval forecaster is derived from the same document.

fn welford_from(alpha: f64, weak_sigmas: f64, strong_sigmas: f64) -> Result<ExponentialWelfordIntervalForecaster> {
    ExponentialWelfordIntervalForecaster::new(WelfordIntervalParams {
        alpha,
        init_variance_estimate: 0.0,
        weak_sigmas,
        strong_sigmas,
    })
}

fn build_legacy_ewma(uuid: DetectorUuid, config: &Value) -> Result<Box<dyn Detector>> {
    let params: EwmaParams = serde_json::from_value(config.clone())?;
    let point = EwmaPointForecaster::new(&params)?;
    let interval = welford_from(params.alpha, params.weak_sigmas, params.strong_sigmas)?;
    Ok(Box::new(ForecastingDetector::new(
        uuid,
        "ewma-detector",
        Box::new(point),
        Box::new(interval),
        AnomalyType::TwoTailed,
    )))
}

fn build_legacy_pewma(uuid: DetectorUuid, config: &Value) -> Result<Box<dyn Detector>> {
    let params: PewmaParams = serde_json::from_value(config.clone())?;
    let point = PewmaPointForecaster::new(&params)?;
    let interval = welford_from(params.alpha, params.weak_sigmas, params.strong_sigmas)?;
    Ok(Box::new(ForecastingDetector::new(
        uuid,
        "pewma-detector",
        Box::new(point),
        Box::new(interval),
        AnomalyType::TwoTailed,
    )))
}

fn build_legacy_holt_winters(uuid: DetectorUuid, config: &Value) -> Result<Box<dyn Detector>> {
    let params: HoltWintersParams = serde_json::from_value(config.clone())?;
    let point = HoltWintersPointForecaster::new(&params)?;
    // The legacy schema has no interval parameters of its own; a default
    // Welford alpha is paired with the document's sigmas.
    let interval = welford_from(0.15, params.weak_sigmas, params.strong_sigmas)?;
    Ok(Box::new(ForecastingDetector::new(
        uuid,
        "holtwinters-detector",
        Box::new(point),
        Box::new(interval),
        AnomalyType::TwoTailed,
    )))
}

fn build_legacy_seasonal_naive(uuid: DetectorUuid, config: &Value) -> Result<Box<dyn Detector>> {
    let params: SeasonalNaiveParams = serde_json::from_value(config.clone())?;
    let point = SeasonalNaivePointForecaster::new(&params)?;
    let interval = welford_from(0.15, 3.0, 4.0)?;
    Ok(Box::new(ForecastingDetector::new(
        uuid,
        "seasonalnaive-detector",
        Box::new(point),
        Box::new(interval),
        AnomalyType::TwoTailed,
    )))
}
