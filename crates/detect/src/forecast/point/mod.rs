//! Point forecasting algorithms.

mod ewma;
mod holtwinters;
mod pewma;
mod seasonal_naive;
mod sma;

pub use ewma::EwmaPointForecaster;
pub use holtwinters::HoltWintersPointForecaster;
pub use pewma::PewmaPointForecaster;
pub use seasonal_naive::{SeasonalBuffer, SeasonalNaivePointForecaster};
pub use sma::SmaPointForecaster;
