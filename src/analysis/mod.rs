//! Peak location, normalization, alignment and distance scoring.
//!
//! [`pipeline::run`] chains the steps for the three input slots and
//! returns an immutable [`PipelineResult`].

pub mod align;
pub mod distance;
pub mod error;
pub mod peak;
pub mod pipeline;

pub use distance::DistanceMetric;
pub use error::AnalysisError;
pub use pipeline::{PipelineInput, PipelineResult, SpectrumInput};
