//! Simple (two-period) initial training for Holt-Winters.

use crate::schema::HoltWintersParams;

use super::algorithm;
use super::components::HoltWintersComponents;

/// Buffers the first two periods of raw observations, derives initial
/// level/base/seasonal estimates from them, then replays the buffered data
/// through the standard update rule.
///
/// Level and seasonals come from the first period, the base from the
/// difference between the two period means. This mirrors the "simple"
/// initialization of the R forecast package and produces the same end state
/// as warm-starting with reasonable estimates, deterministically.
#[derive(Debug, Clone)]
pub struct SimpleTrainingModel {
    n: usize,
    first_period: Vec<f64>,
    second_period: Vec<f64>,
}

impl SimpleTrainingModel {
    pub fn new(params: &HoltWintersParams) -> Self {
        Self {
            n: 0,
            first_period: vec![0.0; params.period],
            second_period: vec![0.0; params.period],
        }
    }

    pub fn is_complete(&self, params: &HoltWintersParams) -> bool {
        self.n >= params.init_training_period()
    }

    /// Absorb one training observation. On the final one, fit the initial
    /// components and replay the whole window through the update rule.
    pub fn observe_and_train(
        &mut self,
        y: f64,
        params: &HoltWintersParams,
        components: &mut HoltWintersComponents,
    ) {
        let period = params.period;
        debug_assert!(!self.is_complete(params));

        if self.n < period {
            self.first_period[self.n] = y;
        } else {
            self.second_period[self.n - period] = y;
        }

        if self.n == params.init_training_period() - 1 {
            self.fit(y, params, components);
            self.replay(params, components);
        }
        self.n += 1;
    }

    fn fit(&self, last_observed: f64, params: &HoltWintersParams, components: &mut HoltWintersComponents) {
        let level = mean(&self.first_period);
        components.set_level(level);

        for (i, &value) in self.first_period.iter().enumerate() {
            let seasonal = if params.seasonality_type == crate::schema::SeasonalityType::Multiplicative
            {
                value / level
            } else {
                value - level
            };
            components.set_seasonal(i, seasonal, last_observed);
        }

        let base = (mean(&self.second_period) - level) / params.period as f64;
        components.set_base(base);
    }

    fn replay(&self, params: &HoltWintersParams, components: &mut HoltWintersComponents) {
        for &y in self.first_period.iter().chain(self.second_period.iter()) {
            algorithm::observe_and_update(y, params, components);
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
