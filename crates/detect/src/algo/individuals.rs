//! Shewhart individuals (X/mR) control chart detector.

use driftwatch_core::{AnomalyLevel, AnomalyResult, DetectorUuid, Observation};

use crate::detector::Detector;
use crate::error::Result;
use crate::schema::IndividualsParams;

/// R-chart constant for subgroup size 2.
const D4: f64 = 3.267;
/// Converts the average moving range into a sigma estimate.
const D2: f64 = 1.128;
/// Control limits are recomputed every this many baseline observations.
const RECOMPUTE_LIMITS_PERIOD: i64 = 100;

/// Individuals control chart over the moving range (R) and the raw samples
/// (X), watching short-term and long-term variation respectively.
///
/// The baseline (running mean and accumulated moving range) is updated only
/// on NORMAL and warm-up observations: anomalous points are excluded so a
/// burst cannot drag the control limits toward itself.
#[derive(Debug)]
pub struct IndividualsControlChartDetector {
    uuid: DetectorUuid,
    params: IndividualsParams,
    moving_range_sum: f64,
    mean: f64,
    target: f64,
    prev_value: f64,
    total_data_points: i64,
    upper_control_limit_r: f64,
    upper_control_limit_x: f64,
    lower_control_limit_x: f64,
}

impl IndividualsControlChartDetector {
    pub fn new(uuid: DetectorUuid, params: IndividualsParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            uuid,
            prev_value: params.init_value,
            target: params.init_value,
            mean: params.init_mean_estimate,
            params,
            moving_range_sum: 0.0,
            total_data_points: 1,
            upper_control_limit_r: 0.0,
            upper_control_limit_x: 0.0,
            lower_control_limit_x: 0.0,
        })
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn control_limits(&self) -> (f64, f64, f64) {
        (
            self.upper_control_limit_r,
            self.upper_control_limit_x,
            self.lower_control_limit_x,
        )
    }

    fn running_mean(&self, observed: f64) -> f64 {
        self.mean + (observed - self.mean) / (self.total_data_points + 1) as f64
    }

    fn average_moving_range(&self) -> f64 {
        self.moving_range_sum / (self.total_data_points - 1).max(1) as f64
    }
}

impl Detector for IndividualsControlChartDetector {
    fn uuid(&self) -> DetectorUuid {
        self.uuid
    }

    fn name(&self) -> &'static str {
        "individuals"
    }

    fn classify(&mut self, obs: &Observation) -> AnomalyResult {
        let observed = obs.value;
        let current_range = (self.prev_value - observed).abs();

        let level = if self.total_data_points > self.params.warm_up_period as i64 {
            if current_range > self.upper_control_limit_r {
                AnomalyLevel::Strong
            } else if observed > self.upper_control_limit_x
                || observed < self.lower_control_limit_x
            {
                AnomalyLevel::Weak
            } else {
                AnomalyLevel::Normal
            }
        } else {
            AnomalyLevel::ModelWarmup
        };

        if level == AnomalyLevel::Normal || level == AnomalyLevel::ModelWarmup {
            self.moving_range_sum += current_range;
            self.mean = self.running_mean(observed);
            self.total_data_points += 1;
        }

        if (self.total_data_points - self.params.warm_up_period as i64) % RECOMPUTE_LIMITS_PERIOD
            == 0
        {
            let avg_moving_range = self.average_moving_range();
            let multiplier = self.params.strong_sigmas / D2;
            self.target = self.mean;
            self.upper_control_limit_r = D4 * avg_moving_range;
            self.upper_control_limit_x = self.target + multiplier * avg_moving_range;
            self.lower_control_limit_x = self.target - multiplier * avg_moving_range;
        }

        self.prev_value = observed;

        AnomalyResult::new(level).with_predicted(self.mean)
    }
}
