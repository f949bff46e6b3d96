//! Exponentially weighted Welford interval forecaster.

use driftwatch_core::Observation;

use crate::error::Result;
use crate::schema::WelfordIntervalParams;

use super::super::{IntervalForecast, IntervalForecaster};

/// Online variance of the point-forecast residuals, exponentially weighted
/// so recent residuals dominate, turned into sigma bands.
#[derive(Debug)]
pub struct ExponentialWelfordIntervalForecaster {
    params: WelfordIntervalParams,
    variance: f64,
}

impl ExponentialWelfordIntervalForecaster {
    pub fn new(params: WelfordIntervalParams) -> Result<Self> {
        params.validate()?;
        let variance = params.init_variance_estimate;
        Ok(Self { params, variance })
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }
}

impl IntervalForecaster for ExponentialWelfordIntervalForecaster {
    fn forecast(&mut self, obs: &Observation, point_forecast: f64) -> IntervalForecast {
        let residual = obs.value - point_forecast;
        let incr = self.params.alpha * residual;
        self.variance = (1.0 - self.params.alpha) * (self.variance + residual * incr);

        let std_dev = self.variance.sqrt();
        let weak_width = self.params.weak_sigmas * std_dev;
        let strong_width = self.params.strong_sigmas * std_dev;

        IntervalForecast {
            upper_strong: point_forecast + strong_width,
            upper_weak: point_forecast + weak_width,
            lower_weak: point_forecast - weak_width,
            lower_strong: point_forecast - strong_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecaster(alpha: f64) -> ExponentialWelfordIntervalForecaster {
        ExponentialWelfordIntervalForecaster::new(WelfordIntervalParams {
            alpha,
            init_variance_estimate: 0.0,
            weak_sigmas: 3.0,
            strong_sigmas: 4.0,
        })
        .unwrap()
    }

    #[test]
    fn pinned_single_residual_update() {
        // residual 10, alpha 0.15: variance = 0.85 * (0 + 10 * 1.5) = 12.75,
        // and the bands reflect the post-update variance.
        let mut f = forecaster(0.15);
        let bands = f.forecast(&Observation::new(0, 10.0), 0.0);
        assert!((f.variance() - 12.75).abs() < 1e-12);

        let std_dev = 12.75f64.sqrt();
        assert!((bands.upper_strong - 4.0 * std_dev).abs() < 1e-12);
        assert!((bands.upper_weak - 3.0 * std_dev).abs() < 1e-12);
        assert!((bands.lower_weak + 3.0 * std_dev).abs() < 1e-12);
        assert!((bands.lower_strong + 4.0 * std_dev).abs() < 1e-12);
    }

    #[test]
    fn zero_residuals_keep_bands_collapsed() {
        let mut f = forecaster(0.3);
        for i in 0..20 {
            let bands = f.forecast(&Observation::new(i, 5.0), 5.0);
            assert_eq!(bands.upper_strong, 5.0);
            assert_eq!(bands.lower_strong, 5.0);
        }
        assert_eq!(f.variance(), 0.0);
    }

    #[test]
    fn variance_decays_after_a_spike() {
        let mut f = forecaster(0.3);
        f.forecast(&Observation::new(0, 10.0), 0.0);
        let after_spike = f.variance();
        for i in 1..50 {
            f.forecast(&Observation::new(i, 0.0), 0.0);
        }
        assert!(f.variance() < after_spike * 1e-3);
    }
}
