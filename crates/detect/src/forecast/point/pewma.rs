//! PEWMA point forecaster.

use driftwatch_core::Observation;

use crate::error::Result;
use crate::schema::PewmaParams;
use crate::stats::gaussian_density;

use super::super::{PointForecast, PointForecaster};

/// The PEWMA moment recurrence as a standalone forecaster. Keeps both
/// weighted moments because the adaptive weight needs the standard
/// deviation even though only the mean is forecast.
#[derive(Debug)]
pub struct PewmaPointForecaster {
    params: PewmaParams,
    adj_alpha: f64,
    training_count: usize,
    s1: f64,
    s2: f64,
    mean: f64,
    std_dev: f64,
}

impl PewmaPointForecaster {
    pub fn new(params: &PewmaParams) -> Result<Self> {
        params.validate()?;
        let init = params.init_mean_estimate;
        let mut forecaster = Self {
            adj_alpha: 1.0 - params.alpha,
            params: params.clone(),
            training_count: 1,
            s1: init,
            s2: init * init,
            mean: 0.0,
            std_dev: 0.0,
        };
        forecaster.refresh_moments();
        Ok(forecaster)
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

    fn adaptive_alpha(&mut self, p: f64) -> f64 {
        if self.training_count < self.params.training_length {
            self.training_count += 1;
            return 1.0 - 1.0 / self.training_count as f64;
        }
        (1.0 - self.params.beta * p) * self.adj_alpha
    }
}

impl PointForecaster for PewmaPointForecaster {
    fn forecast(&mut self, obs: &Observation) -> Option<PointForecast> {
        let value = obs.value;
        let z = if self.std_dev == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std_dev
        };
        let alpha = self.adaptive_alpha(gaussian_density(z));

        self.s1 = alpha * self.s1 + (1.0 - alpha) * value;
        self.s2 = alpha * self.s2 + (1.0 - alpha) * value * value;
        self.refresh_moments();

        Some(PointForecast::new(self.mean))
    }
}
