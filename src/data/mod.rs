/// Data layer: core types, loading, and sanitization.
///
/// Architecture:
/// ```text
///   energy,intensity .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (energy cells may be missing)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ sanitize  │  drop unparseable / zero-energy rows → Spectrum
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Spectrum  │  Vec<SpectrumPoint>, row labels preserved
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod sample;
pub mod sanitize;
