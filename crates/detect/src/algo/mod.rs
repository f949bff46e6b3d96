//! The online detection engines.
//!
//! Each engine owns its private running statistics, updated exactly once
//! per observation, and derives thresholds from that state either before
//! or after the update, whichever the algorithm calls for.

pub mod constant;
pub mod cusum;
pub mod ewma;
pub mod holtwinters;
pub mod individuals;
pub mod pewma;

pub use constant::ConstantThresholdDetector;
pub use cusum::CusumDetector;
pub use ewma::EwmaDetector;
pub use holtwinters::HoltWintersDetector;
pub use individuals::IndividualsControlChartDetector;
pub use pewma::PewmaDetector;
