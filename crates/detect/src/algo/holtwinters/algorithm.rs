//! The Holt-Winters (triple exponential smoothing) update step.

use crate::schema::{HoltWintersParams, SeasonalityType};

use super::components::HoltWintersComponents;

/// One-step-ahead forecast from the given components.
pub fn forecast(seasonality: SeasonalityType, level: f64, base: f64, seasonal: f64) -> f64 {
    match seasonality {
        SeasonalityType::Multiplicative => (level + base) * seasonal,
        SeasonalityType::Additive => level + base + seasonal,
    }
}

/// Observe `y`, update level/base/seasonal from it, and store the forecast
/// for the next occurrence of this season.
///
/// The seasonal component read here is the one written a full period ago
/// (the index has wrapped back around since).
pub fn observe_and_update(y: f64, params: &HoltWintersParams, components: &mut HoltWintersComponents) {
    let alpha = params.alpha;
    let beta = params.beta;
    let gamma = params.gamma;

    let last_level = components.level();
    let last_base = components.base();
    let seasonal_idx = components.current_seasonal_index();
    let last_season = components.seasonal(seasonal_idx);

    let (new_level, new_base, new_season) = match params.seasonality_type {
        SeasonalityType::Multiplicative => {
            let new_level = alpha * (y / last_season) + (1.0 - alpha) * (last_level + last_base);
            let new_base = beta * (new_level - last_level) + (1.0 - beta) * last_base;
            let new_season = gamma * (y / (last_level + last_base)) + (1.0 - gamma) * last_season;
            (new_level, new_base, new_season)
        }
        SeasonalityType::Additive => {
            let new_level = alpha * (y - last_season) + (1.0 - alpha) * (last_level + last_base);
            let new_base = beta * (new_level - last_level) + (1.0 - beta) * last_base;
            let new_season = gamma * (y - (last_level + last_base)) + (1.0 - gamma) * last_season;
            (new_level, new_base, new_season)
        }
    };

    let new_forecast = forecast(params.seasonality_type, new_level, new_base, new_season);

    components.add_value(y);
    components.set_level(new_level);
    components.set_base(new_base);
    components.set_seasonal(seasonal_idx, new_season, y);
    components.set_forecast(new_forecast);
}
