use serde::Serialize;

use super::error::AnalysisError;
use crate::data::model::{SpectrumPoint, first_row_at_or_above, last_row_at_or_below};

/// Energy offset that moves the unknown peak onto the reference peak.
/// Subtract it from the unknown energies.
pub fn alignment_offset(reference_peak_energy: f64, unknown_peak_energy: f64) -> f64 {
    unknown_peak_energy - reference_peak_energy
}

/// Copy of `points` with every energy moved by `-offset`. Intensities are
/// untouched.
pub fn shift_energies(points: &[SpectrumPoint], offset: f64) -> Vec<SpectrumPoint> {
    points
        .iter()
        .map(|p| SpectrumPoint {
            energy: p.energy - offset,
            ..*p
        })
        .collect()
}

/// Row-label window of reference 1 between the two energy bounds.
///
/// `length` is a row count, reused from each spectrum's own start row. It
/// only lines up energies when all inputs share the same sampling and row
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonWindow {
    pub start_row: usize,
    pub end_row: usize,
    pub length: usize,
}

/// Derive the comparison window from reference 1: from the first row at or
/// above `x_min` to the last row at or below `x_max`. The length is the
/// difference of the two labels, clamped at 0.
pub fn comparison_window(
    reference: &[SpectrumPoint],
    x_min: f64,
    x_max: f64,
) -> Result<ComparisonWindow, AnalysisError> {
    let start_row = first_row_at_or_above(reference, x_min);
    let end_row = last_row_at_or_below(reference, x_max);
    match (start_row, end_row) {
        (Some(start_row), Some(end_row)) => Ok(ComparisonWindow {
            start_row,
            end_row,
            length: end_row.saturating_sub(start_row),
        }),
        _ => Err(AnalysisError::EmptyWindow { x_min, x_max }),
    }
}

/// First row label of a spectrum at or above `x_min`.
pub fn window_start(points: &[SpectrumPoint], x_min: f64) -> Result<usize, AnalysisError> {
    first_row_at_or_above(points, x_min).ok_or(AnalysisError::EmptyRange { x_min })
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn points(energies: &[f64]) -> Vec<SpectrumPoint> {
        energies
            .iter()
            .enumerate()
            .map(|(row, &energy)| SpectrumPoint {
                row,
                energy,
                intensity: 1.0,
            })
            .collect()
    }

    #[test]
    fn offset_and_shift() {
        let offset = alignment_offset(2.0, 2.3);
        assert_abs_diff_eq!(offset, 0.3, epsilon = 1e-12);
        let shifted = shift_energies(&points(&[2.3, 3.3]), offset);
        assert_abs_diff_eq!(shifted[0].energy, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(shifted[1].energy, 3.0, epsilon = 1e-12);
        assert_eq!(shifted[1].row, 1);
        assert_abs_diff_eq!(shifted[1].intensity, 1.0);
    }

    #[test]
    fn window_is_label_difference() {
        let p = points(&[1.0, 4.0, 5.0, 6.0, 7.0, 51.0]);
        let w = comparison_window(&p, 5.0, 50.0).unwrap();
        assert_eq!(
            w,
            ComparisonWindow {
                start_row: 2,
                end_row: 4,
                length: 2
            }
        );
    }

    #[test]
    fn inverted_window_has_zero_length() {
        let p = points(&[1.0, 2.0, 60.0]);
        let w = comparison_window(&p, 30.0, 50.0).unwrap();
        assert_eq!(w.length, 0);
    }

    #[test]
    fn window_without_rows_is_an_error() {
        let p = points(&[1.0, 2.0]);
        assert_eq!(
            comparison_window(&p, 5.0, 50.0),
            Err(AnalysisError::EmptyWindow {
                x_min: 5.0,
                x_max: 50.0
            })
        );
        assert!(window_start(&p, 5.0).is_err());
        assert_eq!(window_start(&p, 2.0), Ok(1));
    }
}
