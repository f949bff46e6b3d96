//! Typed detector parameter structs.
//!
//! Each algorithm owns one params struct: serde camelCase wire form matching
//! the persisted `detectorConfig` documents, defaults for optional keys, and
//! a `validate()` performing all range checks at construction time. The
//! factory never builds a detector from unvalidated params.

mod constant;
mod control;
mod forecast;
mod holtwinters;

pub use constant::ConstantThresholdParams;
pub use control::{CusumParams, EwmaParams, IndividualsParams, PewmaParams};
pub use forecast::{SeasonalNaiveParams, SmaParams, WelfordIntervalParams};
pub use holtwinters::{HoltWintersParams, HoltWintersTrainingMethod, SeasonalityType};

use crate::error::{DetectorError, Result};

/// Shared check: `strong_sigmas > weak_sigmas > 0`.
pub(crate) fn check_sigmas(weak_sigmas: f64, strong_sigmas: f64) -> Result<()> {
    if weak_sigmas <= 0.0 {
        return Err(DetectorError::Validation(format!(
            "weakSigmas must be > 0, got {weak_sigmas}"
        )));
    }
    if strong_sigmas <= weak_sigmas {
        return Err(DetectorError::Validation(format!(
            "strongSigmas ({strong_sigmas}) must be > weakSigmas ({weak_sigmas})"
        )));
    }
    Ok(())
}

/// Shared check: smoothing weight in `[0, 1]`.
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(DetectorError::Validation(format!(
            "{name} must be in the range [0, 1], got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigma_ordering_is_enforced() {
        assert!(check_sigmas(3.0, 4.0).is_ok());
        assert!(check_sigmas(0.0, 4.0).is_err());
        assert!(check_sigmas(-1.0, 4.0).is_err());
        assert!(check_sigmas(4.0, 4.0).is_err());
        assert!(check_sigmas(4.0, 3.0).is_err());
    }

    #[test]
    fn unit_interval_bounds_are_inclusive() {
        assert!(check_unit_interval("alpha", 0.0).is_ok());
        assert!(check_unit_interval("alpha", 1.0).is_ok());
        assert!(check_unit_interval("alpha", 1.01).is_err());
        assert!(check_unit_interval("alpha", -0.01).is_err());
    }
}
