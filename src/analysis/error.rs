use thiserror::Error;

use crate::data::model::SpectrumRole;

/// Degenerate situations of the comparison pipeline. None of them aborts a
/// recomputation; they are reported next to the value they replace.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Nothing to compare against: a slot is empty.
    #[error("{role} is not loaded")]
    MissingInput { role: SpectrumRole },

    /// No usable point at or above the lower energy bound.
    #[error("no data at or above {x_min} eV")]
    EmptyRange { x_min: f64 },

    /// Reference 1 has no rows between the two energy bounds.
    #[error("no rows of Ref.1 between {x_min} and {x_max} eV")]
    EmptyWindow { x_min: f64, x_max: f64 },

    /// The row-count window points at a row label that does not exist.
    #[error("{spectrum} spectrum has no row {row} inside the comparison window")]
    IndexMisalignment { spectrum: &'static str, row: usize },
}
