use serde::Serialize;

use super::error::AnalysisError;
use crate::data::model::{Spectrum, SpectrumPoint};

/// Maximum of a spectrum above the lower energy bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    /// Mean energy of all points reaching `intensity` (eV).
    pub energy: f64,
    pub intensity: f64,
}

/// Locate the peak of `spectrum` at or above `x_min`.
///
/// The maximum intensity is taken over points with `energy >= x_min`
/// (NaN intensities are ignored). The peak energy is the mean energy of every
/// point of the spectrum holding that exact intensity, so ties are averaged.
///
/// # Errors
///
/// [`AnalysisError::EmptyRange`] if no finite intensity lies at or above
/// `x_min`.
pub fn find_peak(spectrum: &Spectrum, x_min: f64) -> Result<Peak, AnalysisError> {
    let intensity = spectrum
        .points
        .iter()
        .filter(|p| p.energy >= x_min && !p.intensity.is_nan())
        .map(|p| p.intensity)
        .fold(None, |acc: Option<f64>, i| Some(acc.map_or(i, |m| m.max(i))))
        .ok_or(AnalysisError::EmptyRange { x_min })?;

    // Exact match against a value taken from the same data.
    let (sum, count) = spectrum
        .points
        .iter()
        .filter(|p| p.intensity == intensity)
        .fold((0.0, 0usize), |(sum, count), p| (sum + p.energy, count + 1));

    Ok(Peak {
        energy: sum / count as f64,
        intensity,
    })
}

/// A spectrum divided by its own peak intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSpectrum {
    pub peak_intensity: f64,
    pub points: Vec<SpectrumPoint>,
}

impl NormalizedSpectrum {
    /// Intensities scaled back by the peak.
    pub fn denormalized(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.intensity * self.peak_intensity)
            .collect()
    }
}

/// Divide every intensity by `peak_intensity`. A zero or NaN peak yields
/// Inf/NaN intensities; nothing is clamped.
pub fn normalize(spectrum: &Spectrum, peak_intensity: f64) -> NormalizedSpectrum {
    NormalizedSpectrum {
        peak_intensity,
        points: spectrum
            .points
            .iter()
            .map(|p| SpectrumPoint {
                intensity: p.intensity / peak_intensity,
                ..*p
            })
            .collect(),
    }
}
