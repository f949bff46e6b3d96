//! CUSUM detector.

use driftwatch_core::{AnomalyLevel, AnomalyResult, AnomalyType, DetectorUuid, Observation};

use crate::detector::Detector;
use crate::error::Result;
use crate::schema::CusumParams;

/// Converts the mean moving range of individuals data into a sigma
/// estimate (the d2 control-chart constant for subgroup size 2).
const STD_DEV_DIVISOR: f64 = 1.128;

/// Cumulative-sum chart around a target value.
///
/// Tracks one-sided cumulative deviations (`sum_high` above target,
/// `sum_low` below), each slackened by `slack_param * std_dev` per step.
/// The standard deviation is estimated from the mean moving range of
/// consecutive observations.
#[derive(Debug)]
pub struct CusumDetector {
    uuid: DetectorUuid,
    params: CusumParams,
    /// Observations seen so far, including the one being classified.
    total_data_points: usize,
    sum_high: f64,
    sum_low: f64,
    moving_range: f64,
    prev_value: f64,
}

impl CusumDetector {
    pub fn new(uuid: DetectorUuid, params: CusumParams) -> Result<Self> {
        params.validate()?;
        let prev_value = params.init_mean_estimate;
        Ok(Self {
            uuid,
            params,
            total_data_points: 0,
            sum_high: 0.0,
            sum_low: 0.0,
            moving_range: 0.0,
            prev_value,
        })
    }

    pub fn sum_high(&self) -> f64 {
        self.sum_high
    }

    pub fn sum_low(&self) -> f64 {
        self.sum_low
    }

    fn avg_moving_range(&self) -> f64 {
        self.moving_range / (self.total_data_points - 1).max(1) as f64
    }

    fn reset_sums(&mut self) {
        self.sum_high = 0.0;
        self.sum_low = 0.0;
    }
}

impl Detector for CusumDetector {
    fn uuid(&self) -> DetectorUuid {
        self.uuid
    }

    fn name(&self) -> &'static str {
        "cusum"
    }

    fn classify(&mut self, obs: &Observation) -> AnomalyResult {
        let observed = obs.value;

        self.total_data_points += 1;
        self.moving_range += (self.prev_value - observed).abs();

        let std_dev = self.avg_moving_range() / STD_DEV_DIVISOR;
        let slack = self.params.slack_param * std_dev;
        let weak_delta = self.params.weak_sigmas * std_dev;
        let strong_delta = self.params.strong_sigmas * std_dev;
        let target = self.params.target_value;

        self.sum_high = (self.sum_high + observed - (target + slack)).max(0.0);
        self.sum_low = (self.sum_low + observed - (target - slack)).min(0.0);
        self.prev_value = observed;

        if self.total_data_points <= self.params.warm_up_period {
            return AnomalyResult::new(AnomalyLevel::ModelWarmup);
        }

        // Strict inequalities: a constant-valued metric keeps the std-dev
        // at zero, and a further observation at the same value must come
        // out NORMAL, not STRONG.
        let mut level = AnomalyLevel::Normal;
        match self.params.anomaly_type {
            AnomalyType::LeftTailed => {
                if self.sum_low < -strong_delta {
                    level = AnomalyLevel::Strong;
                    self.reset_sums();
                } else if self.sum_low < -weak_delta {
                    level = AnomalyLevel::Weak;
                }
            }
            AnomalyType::RightTailed => {
                if self.sum_high > strong_delta {
                    level = AnomalyLevel::Strong;
                    self.reset_sums();
                } else if self.sum_high > weak_delta {
                    level = AnomalyLevel::Weak;
                }
            }
            AnomalyType::TwoTailed => {
                if self.sum_high > strong_delta || self.sum_low < -strong_delta {
                    level = AnomalyLevel::Strong;
                    self.reset_sums();
                } else if self.sum_high > weak_delta || self.sum_low < -weak_delta {
                    level = AnomalyLevel::Weak;
                }
            }
        }

        AnomalyResult::new(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn detector(params: CusumParams) -> CusumDetector {
        CusumDetector::new(Uuid::new_v4(), params).unwrap()
    }

    #[test]
    fn pinned_right_tailed_scenario() {
        // target 0, slack 0.5, warm-up 2, observations [0, 0, 100]:
        // the third observation is the first past warm-up and must drive
        // sum_high above zero.
        let params = CusumParams {
            anomaly_type: AnomalyType::RightTailed,
            target_value: 0.0,
            slack_param: 0.5,
            warm_up_period: 2,
            ..CusumParams::default()
        };
        let mut d = detector(params);

        assert_eq!(
            d.classify(&Observation::new(0, 0.0)).level,
            AnomalyLevel::ModelWarmup
        );
        let second = d.classify(&Observation::new(1, 0.0)).level;
        let third = d.classify(&Observation::new(2, 100.0)).level;

        assert_eq!(second, AnomalyLevel::ModelWarmup);
        assert_ne!(third, AnomalyLevel::ModelWarmup);
        assert!(d.sum_high() > 0.0);
    }

    #[test]
    fn constant_stream_stays_normal_past_warm_up() {
        let params = CusumParams {
            anomaly_type: AnomalyType::TwoTailed,
            target_value: 7.0,
            warm_up_period: 5,
            init_mean_estimate: 7.0,
            ..CusumParams::default()
        };
        let mut d = detector(params);
        for i in 0..50 {
            let level = d.classify(&Observation::new(i, 7.0)).level;
            if i >= 5 {
                assert_eq!(level, AnomalyLevel::Normal, "observation {i}");
            }
        }
    }

    #[test]
    fn strong_classification_resets_both_sums() {
        let params = CusumParams {
            anomaly_type: AnomalyType::RightTailed,
            target_value: 10.0,
            warm_up_period: 3,
            init_mean_estimate: 10.0,
            ..CusumParams::default()
        };
        let mut d = detector(params);
        for i in 0..10 {
            d.classify(&Observation::new(i, 10.0 + 0.1 * (i % 2) as f64));
        }

        // A large excursion accumulates sum_high past the strong band.
        let mut saw_strong = false;
        for i in 10..20 {
            let result = d.classify(&Observation::new(i, 30.0));
            if result.level == AnomalyLevel::Strong {
                saw_strong = true;
                assert_eq!(d.sum_high(), 0.0);
                assert_eq!(d.sum_low(), 0.0);
                break;
            }
        }
        assert!(saw_strong, "excursion never classified STRONG");
    }

    #[test]
    fn exactly_the_first_warm_up_period_observations_report_warm_up() {
        let params = CusumParams {
            warm_up_period: 4,
            ..CusumParams::default()
        };
        let mut d = detector(params);
        let mut levels = Vec::new();
        for i in 0..6 {
            levels.push(d.classify(&Observation::new(i, i as f64)).level);
        }
        for (i, level) in levels.iter().enumerate() {
            if i < 4 {
                assert_eq!(*level, AnomalyLevel::ModelWarmup, "observation {i}");
            } else {
                assert_ne!(*level, AnomalyLevel::ModelWarmup, "observation {i}");
            }
        }
    }
}
