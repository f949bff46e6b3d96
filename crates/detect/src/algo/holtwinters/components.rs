//! Online component state for the Holt-Winters algorithm.

use crate::schema::HoltWintersParams;
use crate::stats::RunningStats;

/// Level, base and seasonal components plus the one-step-ahead forecast.
///
/// Also tracks a per-seasonal-bucket running mean/std-dev of the raw
/// observations, used only for threshold sizing. Each bucket's statistics
/// are seeded with that bucket's initial seasonal component, so a bucket
/// has a defined deviation from its first live observation on.
#[derive(Debug, Clone)]
pub struct HoltWintersComponents {
    level: f64,
    base: f64,
    seasonal: Vec<f64>,
    seasonal_stats: Vec<RunningStats>,
    overall_stats: RunningStats,
    forecast: f64,
    period: usize,
}

impl HoltWintersComponents {
    /// Params are assumed validated.
    pub fn new(params: &HoltWintersParams) -> Self {
        let identity = params.seasonality_type.identity();
        let level = params.init_level_estimate.unwrap_or(identity);
        let base = params.init_base_estimate.unwrap_or(identity);
        let seasonal = if params.init_seasonal_estimates.is_empty() {
            vec![identity; params.period]
        } else {
            params.init_seasonal_estimates.clone()
        };

        let seasonal_stats = seasonal
            .iter()
            .map(|&s| {
                let mut stats = RunningStats::new();
                stats.add(s);
                stats
            })
            .collect();

        Self {
            level,
            base,
            seasonal,
            seasonal_stats,
            overall_stats: RunningStats::new(),
            forecast: f64::NAN,
            period: params.period,
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn set_level(&mut self, level: f64) {
        self.level = level;
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn set_base(&mut self, base: f64) {
        self.base = base;
    }

    pub fn forecast(&self) -> f64 {
        self.forecast
    }

    pub fn set_forecast(&mut self, forecast: f64) {
        self.forecast = forecast;
    }

    /// Observations seen so far.
    pub fn n(&self) -> u64 {
        self.overall_stats.n()
    }

    pub fn seasonal(&self, idx: usize) -> f64 {
        self.seasonal[idx]
    }

    /// Index into the seasonal components for the next observation.
    /// Increments whenever `add_value` is called, wrapping at `period`.
    pub fn current_seasonal_index(&self) -> usize {
        (self.n() % self.period as u64) as usize
    }

    /// Index of the season before the current one, wrapping to
    /// `period - 1` when the current index is 0.
    pub fn previous_seasonal_index(&self) -> usize {
        (self.current_seasonal_index() + self.period - 1) % self.period
    }

    /// Record an observation into the overall statistics, advancing the
    /// seasonal index.
    pub fn add_value(&mut self, observed: f64) {
        self.overall_stats.add(observed);
    }

    /// Store a new seasonal component and record the observation into that
    /// bucket's running statistics.
    pub fn set_seasonal(&mut self, idx: usize, seasonal: f64, observed: f64) {
        self.seasonal[idx] = seasonal;
        self.seasonal_stats[idx].add(observed);
    }

    pub fn seasonal_std_dev(&self, idx: usize) -> f64 {
        self.seasonal_stats[idx].std_dev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SeasonalityType;

    #[test]
    fn seasonal_index_cycles_with_period() {
        let params = HoltWintersParams::new(4);
        let mut components = HoltWintersComponents::new(&params);

        let mut indices = Vec::new();
        for i in 0..10 {
            indices.push(components.current_seasonal_index());
            components.add_value(i as f64);
        }
        assert_eq!(indices, vec![0, 1, 2, 3, 0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn previous_index_wraps_to_last_season() {
        let params = HoltWintersParams::new(4);
        let mut components = HoltWintersComponents::new(&params);
        assert_eq!(components.current_seasonal_index(), 0);
        assert_eq!(components.previous_seasonal_index(), 3);

        components.add_value(1.0);
        assert_eq!(components.previous_seasonal_index(), 0);
    }

    #[test]
    fn multiplicative_identity_seeds_components() {
        let params = HoltWintersParams::new(3);
        let components = HoltWintersComponents::new(&params);
        assert_eq!(components.level(), 1.0);
        assert_eq!(components.base(), 1.0);
        for i in 0..3 {
            assert_eq!(components.seasonal(i), 1.0);
        }
    }

    #[test]
    fn additive_identity_is_zero() {
        let mut params = HoltWintersParams::new(3);
        params.seasonality_type = SeasonalityType::Additive;
        let components = HoltWintersComponents::new(&params);
        assert_eq!(components.level(), 0.0);
        assert_eq!(components.seasonal(2), 0.0);
    }

    #[test]
    fn explicit_estimates_override_identity() {
        let mut params = HoltWintersParams::new(2);
        params.init_level_estimate = Some(10.0);
        params.init_base_estimate = Some(0.5);
        params.init_seasonal_estimates = vec![1.1, 0.9];
        let components = HoltWintersComponents::new(&params);
        assert_eq!(components.level(), 10.0);
        assert_eq!(components.base(), 0.5);
        assert_eq!(components.seasonal(1), 0.9);
    }
}
