//! Simple moving average point forecaster.

use std::collections::VecDeque;

use driftwatch_core::Observation;

use crate::error::Result;
use crate::schema::SmaParams;

use super::super::{PointForecast, PointForecaster};

/// Mean over the last `look_back_period` values. The optional seed values
/// are fed through the window before any live data arrives.
#[derive(Debug)]
pub struct SmaPointForecaster {
    look_back_period: usize,
    window: VecDeque<f64>,
    mean: f64,
}

impl SmaPointForecaster {
    pub fn new(params: &SmaParams) -> Result<Self> {
        params.validate()?;
        let mut forecaster = Self {
            look_back_period: params.look_back_period,
            window: VecDeque::with_capacity(params.look_back_period),
            mean: 0.0,
        };
        for &value in &params.initial_period_of_values {
            forecaster.update_mean(value);
        }
        Ok(forecaster)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    fn update_mean(&mut self, observed: f64) {
        let mut mean_sum = self.mean * self.window.len() as f64;

        if self.window.len() == self.look_back_period {
            if let Some(evicted) = self.window.pop_front() {
                mean_sum -= evicted;
            }
        }

        self.window.push_back(observed);
        mean_sum += observed;
        self.mean = mean_sum / self.window.len() as f64;
    }
}

impl PointForecaster for SmaPointForecaster {
    fn forecast(&mut self, obs: &Observation) -> Option<PointForecast> {
        self.update_mean(obs.value);
        Some(PointForecast::new(self.mean))
    }
}
