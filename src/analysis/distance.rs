use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::AnalysisError;
use crate::data::model::{SpectrumPoint, find_row};

/// Quantity compared row by row between the shifted unknown and a reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Energy values of the two axes.
    #[default]
    EnergyAxis,
    /// Peak-normalized intensities.
    NormalizedIntensity,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 2] = [
        DistanceMetric::EnergyAxis,
        DistanceMetric::NormalizedIntensity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DistanceMetric::EnergyAxis => "Energy axis",
            DistanceMetric::NormalizedIntensity => "Normalized intensity",
        }
    }

    fn value(self, p: &SpectrumPoint) -> f64 {
        match self {
            DistanceMetric::EnergyAxis => p.energy,
            DistanceMetric::NormalizedIntensity => p.intensity,
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Root of the summed squared differences over `window_length` rows.
///
/// Row `ref_start + i` of `reference` is paired with row `unknown_start + i`
/// of `unknown_shifted`, by label. A window of length 0 gives 0.
///
/// # Errors
///
/// [`AnalysisError::IndexMisalignment`] if a paired row label does not exist
/// in one of the two spectra.
pub fn distance(
    reference: &[SpectrumPoint],
    unknown_shifted: &[SpectrumPoint],
    window_length: usize,
    ref_start: usize,
    unknown_start: usize,
    metric: DistanceMetric,
) -> Result<f64, AnalysisError> {
    let mut sum = 0.0;
    for i in 0..window_length {
        let u = find_row(unknown_shifted, unknown_start + i).ok_or(
            AnalysisError::IndexMisalignment {
                spectrum: "unknown",
                row: unknown_start + i,
            },
        )?;
        let r = find_row(reference, ref_start + i).ok_or(AnalysisError::IndexMisalignment {
            spectrum: "reference",
            row: ref_start + i,
        })?;
        sum += (metric.value(u) - metric.value(r)).powi(2);
    }
    Ok(sum.sqrt())
}

/// Round to two decimals for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn points(pairs: &[(f64, f64)]) -> Vec<SpectrumPoint> {
        pairs
            .iter()
            .enumerate()
            .map(|(row, &(energy, intensity))| SpectrumPoint {
                row,
                energy,
                intensity,
            })
            .collect()
    }

    #[test]
    fn energy_axis_distance() {
        let reference = points(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let unknown = points(&[(1.1, 0.0), (2.1, 0.0), (2.9, 0.0)]);
        let d = distance(&reference, &unknown, 3, 0, 0, DistanceMetric::EnergyAxis).unwrap();
        assert_abs_diff_eq!(d, 0.03_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(round2(d), 0.17);
    }

    #[test]
    fn intensity_distance() {
        let reference = points(&[(1.0, 0.5), (2.0, 1.0)]);
        let unknown = points(&[(9.0, 0.5), (9.0, 0.0)]);
        let d = distance(
            &reference,
            &unknown,
            2,
            0,
            0,
            DistanceMetric::NormalizedIntensity,
        )
        .unwrap();
        assert_abs_diff_eq!(d, 1.0);
    }

    #[test]
    fn start_offsets_are_applied() {
        let reference = points(&[(0.5, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let unknown = points(&[(7.0, 0.0), (8.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let d = distance(&reference, &unknown, 2, 1, 2, DistanceMetric::EnergyAxis).unwrap();
        assert_abs_diff_eq!(d, 0.0);
    }

    #[test]
    fn empty_window_is_zero() {
        let d = distance(&[], &[], 0, 0, 0, DistanceMetric::EnergyAxis).unwrap();
        assert_abs_diff_eq!(d, 0.0);
    }

    #[test]
    fn missing_row_is_reported() {
        let reference = points(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let unknown = points(&[(1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(
            distance(&reference, &unknown, 3, 0, 0, DistanceMetric::EnergyAxis),
            Err(AnalysisError::IndexMisalignment {
                spectrum: "unknown",
                row: 2
            })
        );
    }
}
