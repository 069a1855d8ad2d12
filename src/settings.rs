use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::analysis::DistanceMetric;

/// Allowed values of the lower energy bound (eV).
pub const X_MIN_BOUNDS: RangeInclusive<u32> = 0..=30;
/// Allowed values of the upper energy bound (eV).
pub const X_MAX_BOUNDS: RangeInclusive<u32> = 30..=100;

pub const DEFAULT_X_MIN: u32 = 5;
pub const DEFAULT_X_MAX: u32 = 50;

/// Y range of every normalized chart.
pub const NORMALIZED_Y_RANGE: (f64, f64) = (0.0, 1.1);
/// Y range of the raw sample preview.
pub const PREVIEW_Y_RANGE: (f64, f64) = (0.0, 5000.0);

/// User-adjustable analysis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Lower energy bound (eV). Peaks are searched at or above it.
    pub x_min: u32,
    /// Upper energy bound (eV). Ends the comparison window on reference 1.
    pub x_max: u32,
    /// Drop rows at exactly 0 eV during sanitization.
    pub drop_zero_energy: bool,
    pub metric: DistanceMetric,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            x_min: DEFAULT_X_MIN,
            x_max: DEFAULT_X_MAX,
            drop_zero_energy: true,
            metric: DistanceMetric::default(),
        }
    }
}

impl AnalysisSettings {
    /// Pull both bounds back into their allowed ranges.
    pub fn clamped(self) -> Self {
        Self {
            x_min: self.x_min.clamp(*X_MIN_BOUNDS.start(), *X_MIN_BOUNDS.end()),
            x_max: self.x_max.clamp(*X_MAX_BOUNDS.start(), *X_MAX_BOUNDS.end()),
            ..self
        }
    }

    /// `(x_min, x_max)` as energies.
    pub fn window(&self) -> (f64, f64) {
        (f64::from(self.x_min), f64::from(self.x_max))
    }
}
