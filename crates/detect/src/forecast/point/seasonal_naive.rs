//! Seasonal naive point forecaster.

use driftwatch_core::Observation;
use tracing::debug;

use crate::error::Result;
use crate::schema::SeasonalNaiveParams;

use super::super::{PointForecast, PointForecaster};

/// Ring buffer holding one full cycle of historical values, keyed by
/// wall-clock interval.
///
/// Slots for skipped intervals are padded with the missing-value
/// placeholder so a gap in the stream does not shift later observations
/// onto the wrong season.
#[derive(Debug)]
pub struct SeasonalBuffer {
    cycle_length: usize,
    interval: i64,
    missing_value_placeholder: f64,
    buffer: Vec<f64>,
    curr_index: usize,
    last_timestamp: Option<i64>,
}

impl SeasonalBuffer {
    pub fn new(cycle_length: usize, interval: i64, missing_value_placeholder: f64) -> Self {
        Self {
            cycle_length,
            interval,
            missing_value_placeholder,
            buffer: vec![missing_value_placeholder; cycle_length],
            curr_index: 0,
            last_timestamp: None,
        }
    }

    /// Advance the index over any intervals skipped since the previous
    /// observation, stamping the placeholder into each skipped slot.
    pub fn pad_missing_data_points(&mut self, timestamp: i64) {
        let Some(last) = self.last_timestamp else {
            // First observation starts the cycle: nothing to pad.
            debug!(
                "seasonal buffer started: cycle_length={}, interval={}s, first timestamp {}",
                self.cycle_length, self.interval, timestamp
            );
            return;
        };

        let skipped = ((timestamp - last) / self.interval - 1).max(0);
        for _ in 0..skipped {
            self.buffer[self.curr_index] = self.missing_value_placeholder;
            self.advance();
        }
    }

    /// Value observed one full cycle ago at the current slot.
    pub fn value_at_current_index(&self) -> f64 {
        self.buffer[self.curr_index]
    }

    pub fn is_current_value_missing(&self) -> bool {
        let value = self.value_at_current_index();
        if self.missing_value_placeholder.is_nan() {
            value.is_nan()
        } else {
            value == self.missing_value_placeholder
        }
    }

    /// Store the observation at the current slot and advance.
    pub fn update(&mut self, obs: &Observation) {
        self.buffer[self.curr_index] = obs.value;
        self.advance();
        self.last_timestamp = Some(obs.timestamp);
    }

    fn advance(&mut self) {
        self.curr_index = (self.curr_index + 1) % self.cycle_length;
    }
}

/// Forecasts each observation as the value seen one cycle earlier, per
/// <https://otexts.com/fpp2/simple-methods.html>.
///
/// No forecast is produced while the matching slot still holds the
/// placeholder (the first cycle, or a padded gap).
#[derive(Debug)]
pub struct SeasonalNaivePointForecaster {
    buffer: SeasonalBuffer,
}

impl SeasonalNaivePointForecaster {
    pub fn new(params: &SeasonalNaiveParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            buffer: SeasonalBuffer::new(
                params.cycle_length,
                params.interval_length as i64,
                params.missing_value_placeholder,
            ),
        })
    }
}

impl PointForecaster for SeasonalNaivePointForecaster {
    fn forecast(&mut self, obs: &Observation) -> Option<PointForecast> {
        self.buffer.pad_missing_data_points(obs.timestamp);
        let point = if self.buffer.is_current_value_missing() {
            None
        } else {
            Some(PointForecast::new(self.buffer.value_at_current_index()))
        };
        self.buffer.update(obs);
        point
    }
}
