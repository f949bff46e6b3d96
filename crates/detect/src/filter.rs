//! Post-detection result filters.

use driftwatch_core::{AnomalyLevel, AnomalyResult};

use crate::error::{DetectorError, Result};

/// m-of-n aggregation over a detector's recent levels.
///
/// If at least `m` of the last `n` results were WEAK or STRONG, the current
/// result is upgraded to STRONG; otherwise it passes through unchanged.
/// Smooths flapping detectors into one sustained alert.
#[derive(Debug)]
pub struct MOfNAggregationFilter {
    m: usize,
    buffer: Vec<Option<AnomalyLevel>>,
    buffer_index: usize,
}

impl MOfNAggregationFilter {
    pub fn new(m: usize, n: usize) -> Result<Self> {
        if m == 0 {
            return Err(DetectorError::Validation("required: m > 0".to_string()));
        }
        if n < m {
            return Err(DetectorError::Validation(format!(
                "required: n ({n}) >= m ({m})"
            )));
        }
        Ok(Self {
            m,
            buffer: vec![None; n],
            buffer_index: 0,
        })
    }

    pub fn filter(&mut self, result: &AnomalyResult) -> AnomalyResult {
        self.buffer[self.buffer_index] = Some(result.level);
        self.buffer_index = (self.buffer_index + 1) % self.buffer.len();

        let mut aggregated = result.clone();
        if self.num_anomalies() >= self.m {
            aggregated.level = AnomalyLevel::Strong;
        }
        aggregated
    }

    fn num_anomalies(&self) -> usize {
        self.buffer
            .iter()
            .filter(|level| matches!(level, Some(l) if l.is_anomalous()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(level: AnomalyLevel) -> AnomalyResult {
        AnomalyResult::new(level)
    }

    #[test]
    fn rejects_invalid_window() {
        assert!(MOfNAggregationFilter::new(0, 3).is_err());
        assert!(MOfNAggregationFilter::new(4, 3).is_err());
        assert!(MOfNAggregationFilter::new(3, 3).is_ok());
    }

    #[test]
    fn upgrades_once_m_anomalies_fall_in_the_window() {
        let mut filter = MOfNAggregationFilter::new(2, 3).unwrap();
        assert_eq!(
            filter.filter(&result(AnomalyLevel::Weak)).level,
            AnomalyLevel::Weak
        );
        // Second weak within the window of three: upgraded.
        assert_eq!(
            filter.filter(&result(AnomalyLevel::Weak)).level,
            AnomalyLevel::Strong
        );
    }

    #[test]
    fn old_anomalies_age_out_of_the_window() {
        let mut filter = MOfNAggregationFilter::new(2, 2).unwrap();
        filter.filter(&result(AnomalyLevel::Weak));
        filter.filter(&result(AnomalyLevel::Normal));
        // The weak result has aged out: one normal + one weak < m.
        assert_eq!(
            filter.filter(&result(AnomalyLevel::Weak)).level,
            AnomalyLevel::Weak
        );
    }

    #[test]
    fn normal_streams_pass_through_untouched() {
        let mut filter = MOfNAggregationFilter::new(1, 5).unwrap();
        for _ in 0..10 {
            let out = filter.filter(&result(AnomalyLevel::Normal));
            assert_eq!(out.level, AnomalyLevel::Normal);
        }
    }

    #[test]
    fn preserves_predicted_and_thresholds() {
        let mut filter = MOfNAggregationFilter::new(1, 2).unwrap();
        let input = AnomalyResult::new(AnomalyLevel::Weak).with_predicted(9.0);
        let out = filter.filter(&input);
        assert_eq!(out.level, AnomalyLevel::Strong);
        assert_eq!(out.predicted, Some(9.0));
    }
}
