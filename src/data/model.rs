use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SpectrumRole – which of the three input slots a spectrum occupies
// ---------------------------------------------------------------------------

/// The three input slots of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpectrumRole {
    Reference1,
    Reference2,
    Unknown,
}

impl SpectrumRole {
    /// All slots in display order.
    pub const ALL: [SpectrumRole; 3] = [
        SpectrumRole::Reference1,
        SpectrumRole::Reference2,
        SpectrumRole::Unknown,
    ];

    /// The two reference slots the unknown spectrum is compared against.
    pub const REFERENCES: [SpectrumRole; 2] = [SpectrumRole::Reference1, SpectrumRole::Reference2];

    /// Short label used in tables and menus.
    pub fn label(self) -> &'static str {
        match self {
            SpectrumRole::Reference1 => "Ref.1",
            SpectrumRole::Reference2 => "Ref.2",
            SpectrumRole::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SpectrumRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RawTable – a parsed file before sanitization
// ---------------------------------------------------------------------------

/// One data row of an input file. Cells that failed to parse are `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRow {
    /// Zero-based data row label (header excluded).
    pub row: usize,
    pub energy: Option<f64>,
    pub intensity: Option<f64>,
}

/// A two-column table exactly as it was read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// File name the table was read from, used as the default display name.
    pub source_name: String,
    /// Header of column 0.
    pub energy_column: String,
    /// Header of column 1.
    pub intensity_column: String,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Build a fully parsed table from `(energy, intensity)` pairs, labelling
    /// rows `0..n`.
    pub fn from_pairs(source_name: &str, pairs: &[(f64, f64)]) -> Self {
        RawTable {
            source_name: source_name.to_string(),
            energy_column: "Energy Loss (eV)".to_string(),
            intensity_column: "Intensity".to_string(),
            rows: pairs
                .iter()
                .enumerate()
                .map(|(row, &(energy, intensity))| RawRow {
                    row,
                    energy: Some(energy),
                    intensity: Some(intensity),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Spectrum – the sanitized curve
// ---------------------------------------------------------------------------

/// A single point of a sanitized spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrumPoint {
    /// Row label carried over from the source file. Labels are ascending but
    /// may have gaps where rows were dropped.
    pub row: usize,
    /// Energy loss (eV).
    pub energy: f64,
    pub intensity: f64,
}

/// A sanitized energy-loss spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub energy_column: String,
    pub intensity_column: String,
    /// Points in ascending row order.
    pub points: Vec<SpectrumPoint>,
}

impl Spectrum {
    /// Build a spectrum, ordering the points by row label.
    pub fn new(energy_column: &str, intensity_column: &str, mut points: Vec<SpectrumPoint>) -> Self {
        points.sort_by_key(|p| p.row);
        Spectrum {
            energy_column: energy_column.to_string(),
            intensity_column: intensity_column.to_string(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `[energy, intensity]` pairs, ready for plotting.
    pub fn xy(&self) -> Vec<[f64; 2]> {
        xy(&self.points)
    }
}

// ---------------------------------------------------------------------------
// Row-label helpers shared by the aligner and the distance scorer
// ---------------------------------------------------------------------------

/// `[energy, intensity]` pairs of a point slice.
pub fn xy(points: &[SpectrumPoint]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.energy, p.intensity]).collect()
}

/// Smallest row label whose energy is at or above `x_min`.
pub fn first_row_at_or_above(points: &[SpectrumPoint], x_min: f64) -> Option<usize> {
    points
        .iter()
        .filter(|p| p.energy >= x_min)
        .map(|p| p.row)
        .min()
}

/// Largest row label whose energy is at or below `x_max`.
pub fn last_row_at_or_below(points: &[SpectrumPoint], x_max: f64) -> Option<usize> {
    points
        .iter()
        .filter(|p| p.energy <= x_max)
        .map(|p| p.row)
        .max()
}

/// Look up the point carrying row label `row`. `points` must be in ascending
/// row order, which [`Spectrum::new`] guarantees.
pub fn find_row(points: &[SpectrumPoint], row: usize) -> Option<&SpectrumPoint> {
    points
        .binary_search_by_key(&row, |p| p.row)
        .ok()
        .map(|idx| &points[idx])
}

#[cfg(test)]
mod test {
    use super::*;

    fn point(row: usize, energy: f64) -> SpectrumPoint {
        SpectrumPoint {
            row,
            energy,
            intensity: 1.0,
        }
    }

    #[test]
    fn new_orders_by_row() {
        let s = Spectrum::new("E", "I", vec![point(4, 2.0), point(1, 1.0), point(2, 1.5)]);
        let rows: Vec<usize> = s.points.iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![1, 2, 4]);
    }

    #[test]
    fn window_rows() {
        let points = vec![point(0, 1.0), point(1, 5.0), point(2, 7.0), point(3, 60.0)];
        assert_eq!(first_row_at_or_above(&points, 5.0), Some(1));
        assert_eq!(last_row_at_or_below(&points, 50.0), Some(2));
        assert_eq!(first_row_at_or_above(&points, 100.0), None);
        assert_eq!(last_row_at_or_below(&points, 0.5), None);
    }

    #[test]
    fn find_row_with_gaps() {
        let points = vec![point(0, 1.0), point(2, 2.0), point(3, 3.0)];
        assert_eq!(find_row(&points, 2).map(|p| p.energy), Some(2.0));
        assert!(find_row(&points, 1).is_none());
        assert!(find_row(&points, 9).is_none());
    }

    #[test]
    fn role_labels() {
        assert_eq!(SpectrumRole::Reference1.to_string(), "Ref.1");
        assert_eq!(SpectrumRole::ALL.len(), 3);
        assert!(!SpectrumRole::REFERENCES.contains(&SpectrumRole::Unknown));
    }
}
