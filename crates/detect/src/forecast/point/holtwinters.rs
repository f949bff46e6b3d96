//! Holt-Winters point forecaster.

use driftwatch_core::Observation;

use crate::algo::holtwinters::algorithm;
use crate::algo::holtwinters::components::HoltWintersComponents;
use crate::error::Result;
use crate::schema::{HoltWintersParams, HoltWintersTrainingMethod};

use super::super::{PointForecast, PointForecaster};

/// The Holt-Winters components and update step, exposed as a point
/// forecaster: each call returns the forecast made for the incoming
/// observation one step earlier, then absorbs the observation.
///
/// Observations inside the warm-up window (including the SIMPLE training
/// window, when configured) are flagged as warm-up.
pub struct HoltWintersPointForecaster {
    params: HoltWintersParams,
    warm_up_period: usize,
    components: HoltWintersComponents,
    training: crate::algo::holtwinters::training::SimpleTrainingModel,
}

impl HoltWintersPointForecaster {
    pub fn new(params: &HoltWintersParams) -> Result<Self> {
        params.validate()?;
        let mut components = HoltWintersComponents::new(params);
        let init_forecast = algorithm::forecast(
            params.seasonality_type,
            components.level(),
            components.base(),
            components.seasonal(components.current_seasonal_index()),
        );
        components.set_forecast(init_forecast);

        Ok(Self {
            warm_up_period: params.effective_warm_up_period(),
            training: crate::algo::holtwinters::training::SimpleTrainingModel::new(params),
            components,
            params: params.clone(),
        })
    }

    fn training_complete(&self) -> bool {
        match self.params.init_training_method {
            HoltWintersTrainingMethod::None => true,
            HoltWintersTrainingMethod::Simple => self.training.is_complete(&self.params),
        }
    }
}

impl PointForecaster for HoltWintersPointForecaster {
    fn forecast(&mut self, obs: &Observation) -> Option<PointForecast> {
        let prev_forecast = self.components.forecast();

        if self.training_complete() {
            algorithm::observe_and_update(obs.value, &self.params, &mut self.components);
        } else {
            self.training
                .observe_and_train(obs.value, &self.params, &mut self.components);
        }

        Some(PointForecast {
            value: prev_forecast,
            warmup: self.components.n() <= self.warm_up_period as u64,
        })
    }
}
