//! Numeric kernel of the low-loss EELS comparison viewer.
//!
//! Everything the window shows is derived here from up to three loaded
//! tables (two references and one unknown spectrum) and the current
//! [`settings::AnalysisSettings`]. The UI layer in `main.rs` only renders a
//! [`analysis::PipelineResult`].

pub mod analysis;
pub mod data;
pub mod export;
pub mod settings;
