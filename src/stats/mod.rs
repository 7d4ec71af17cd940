pub mod calculators;
pub mod export;
pub mod models;

pub use calculators::*;
pub use export::{generate_stats_export, stats_export_to_string, StatsExport};
pub use models::*;

use crate::domain::Unit;

/// One bucket of the readiness composite.
/// Each component reports how far a unit is along its track as a ratio;
/// the scorer scales that ratio by `max_points`.
pub trait ReadinessComponent: Send + Sync {
    fn bucket(&self) -> ReadinessBucket;

    fn max_points(&self) -> f64;

    fn ratio(&self, unit: &Unit) -> f64;

    /// Rounded subscore for this bucket, ratio clamped into [0, 1]
    fn score(&self, unit: &Unit) -> f64 {
        let ratio = self.ratio(unit);
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        round1(ratio * self.max_points())
    }
}

/// Rounds half away from zero to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Average of `total` over `count`, 0 when there is nothing to average
pub(crate) fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
