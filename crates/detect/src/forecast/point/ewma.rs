//! EWMA point forecaster.

use driftwatch_core::Observation;

use crate::error::Result;
use crate::schema::EwmaParams;

use super::super::{PointForecast, PointForecaster};

/// Mean-only EWMA recurrence. The variance half of the direct EWMA
/// detector belongs to the interval forecaster in this decomposition.
#[derive(Debug)]
pub struct EwmaPointForecaster {
    alpha: f64,
    mean: f64,
}

impl EwmaPointForecaster {
    pub fn new(params: &EwmaParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            alpha: params.alpha,
            mean: params.init_mean_estimate,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }
}

impl PointForecaster for EwmaPointForecaster {
    fn forecast(&mut self, obs: &Observation) -> Option<PointForecast> {
        self.mean += self.alpha * (obs.value - self.mean);
        Some(PointForecast::new(self.mean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecaster(alpha: f64, init: f64) -> EwmaPointForecaster {
        EwmaPointForecaster::new(&EwmaParams {
            alpha,
            init_mean_estimate: init,
            ..EwmaParams::default()
        })
        .unwrap()
    }

    #[test]
    fn mean_moves_by_alpha_fraction_of_the_error() {
        let mut f = forecaster(0.25, 0.0);
        let forecast = f.forecast(&Observation::new(0, 8.0)).unwrap();
        assert_eq!(forecast.value, 2.0);
        let forecast = f.forecast(&Observation::new(1, 8.0)).unwrap();
        assert_eq!(forecast.value, 3.5);
    }

    #[test]
    fn alpha_zero_never_moves() {
        let mut f = forecaster(0.0, 5.0);
        for i in 0..10 {
            let forecast = f.forecast(&Observation::new(i, 100.0)).unwrap();
            assert_eq!(forecast.value, 5.0);
        }
    }
}
