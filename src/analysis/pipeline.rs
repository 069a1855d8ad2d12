use std::collections::BTreeMap;

use super::align::{
    ComparisonWindow, alignment_offset, comparison_window, shift_energies, window_start,
};
use super::distance::distance;
use super::error::AnalysisError;
use super::peak::{NormalizedSpectrum, Peak, find_peak, normalize};
use crate::data::model::{RawTable, Spectrum, SpectrumPoint, SpectrumRole};
use crate::data::sanitize::{SanitizeReport, sanitize};
use crate::settings::AnalysisSettings;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One loaded table together with the name the user gave it.
#[derive(Debug, Clone, Copy)]
pub struct SpectrumInput<'a> {
    pub table: &'a RawTable,
    pub name: &'a str,
}

/// Everything a recomputation depends on.
#[derive(Debug, Clone, Default)]
pub struct PipelineInput<'a> {
    pub inputs: BTreeMap<SpectrumRole, SpectrumInput<'a>>,
    pub settings: AnalysisSettings,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Per-slot results.
#[derive(Debug, Clone)]
pub struct SpectrumAnalysis {
    pub role: SpectrumRole,
    pub name: String,
    pub spectrum: Spectrum,
    pub report: SanitizeReport,
    pub peak: Result<Peak, AnalysisError>,
    /// Present when a peak was found.
    pub normalized: Option<NormalizedSpectrum>,
}

/// The unknown spectrum set against one reference.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub reference: SpectrumRole,
    /// `E_peak(unknown) - E_peak(reference)`, when both peaks exist.
    pub offset: Option<f64>,
    /// Normalized unknown with its energy axis moved by `-offset`.
    pub shifted_unknown: Option<Vec<SpectrumPoint>>,
    pub distance: Result<f64, AnalysisError>,
}

impl Comparison {
    /// Distance as shown to the user: 0 whenever it could not be computed.
    pub fn reported_distance(&self) -> f64 {
        self.distance.as_ref().copied().unwrap_or(0.0)
    }
}

/// Immutable result of one full recomputation.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub settings: AnalysisSettings,
    /// Only loaded slots appear.
    pub spectra: BTreeMap<SpectrumRole, SpectrumAnalysis>,
    /// Derived from reference 1; `None` when it is not loaded.
    pub window: Option<Result<ComparisonWindow, AnalysisError>>,
    /// One entry per reference, in [`SpectrumRole::REFERENCES`] order.
    pub comparisons: Vec<Comparison>,
}

impl PipelineResult {
    pub fn get(&self, role: SpectrumRole) -> Option<&SpectrumAnalysis> {
        self.spectra.get(&role)
    }

    pub fn comparison(&self, reference: SpectrumRole) -> Option<&Comparison> {
        self.comparisons.iter().find(|c| c.reference == reference)
    }

    /// Peak energy per slot, `None` for empty slots or failed peaks.
    pub fn peak_energy(&self, role: SpectrumRole) -> Option<f64> {
        self.get(role)
            .and_then(|a| a.peak.as_ref().ok())
            .map(|p| p.energy)
    }

    /// Number of curves in the combined chart.
    pub fn curve_count(&self) -> usize {
        self.spectra
            .values()
            .filter(|a| a.normalized.is_some())
            .count()
    }

    /// Every analysis error, tagged with the slot or comparison it belongs to.
    pub fn diagnostics(&self) -> Vec<(String, AnalysisError)> {
        let mut out = Vec::new();
        for a in self.spectra.values() {
            if let Err(e) = &a.peak {
                out.push((format!("{} peak", a.role), e.clone()));
            }
        }
        if let Some(Err(e)) = &self.window {
            out.push(("window".to_string(), e.clone()));
        }
        for c in &self.comparisons {
            if let Err(e) = &c.distance {
                if !matches!(e, AnalysisError::MissingInput { .. }) {
                    out.push((format!("distance to {}", c.reference), e.clone()));
                }
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Rebuild everything from the loaded tables and the settings.
pub fn run(input: &PipelineInput<'_>) -> PipelineResult {
    let settings = input.settings.clamped();
    let (x_min, x_max) = settings.window();

    let spectra: BTreeMap<SpectrumRole, SpectrumAnalysis> = input
        .inputs
        .iter()
        .map(|(&role, spectrum_input)| (role, analyse(role, spectrum_input, &settings)))
        .collect();

    let window = spectra
        .get(&SpectrumRole::Reference1)
        .map(|a| comparison_window(&a.spectrum.points, x_min, x_max));

    let comparisons = SpectrumRole::REFERENCES
        .iter()
        .map(|&reference| compare(&spectra, reference, window.as_ref(), &settings))
        .collect();

    let result = PipelineResult {
        settings,
        spectra,
        window,
        comparisons,
    };

    for (what, e) in result.diagnostics() {
        log::warn!("{what}: {e}");
    }
    log::debug!(
        "recomputed: {} curves, distances {:?}",
        result.curve_count(),
        result
            .comparisons
            .iter()
            .map(Comparison::reported_distance)
            .collect::<Vec<_>>()
    );

    result
}

fn analyse(
    role: SpectrumRole,
    input: &SpectrumInput<'_>,
    settings: &AnalysisSettings,
) -> SpectrumAnalysis {
    let (spectrum, report) = sanitize(input.table, settings.drop_zero_energy);
    let peak = find_peak(&spectrum, f64::from(settings.x_min));
    let normalized = peak.as_ref().ok().map(|p| normalize(&spectrum, p.intensity));
    SpectrumAnalysis {
        role,
        name: input.name.to_string(),
        spectrum,
        report,
        peak,
        normalized,
    }
}

fn compare(
    spectra: &BTreeMap<SpectrumRole, SpectrumAnalysis>,
    reference: SpectrumRole,
    window: Option<&Result<ComparisonWindow, AnalysisError>>,
    settings: &AnalysisSettings,
) -> Comparison {
    let ref_analysis = spectra.get(&reference);
    let unknown = spectra.get(&SpectrumRole::Unknown);

    let offset = match (ref_analysis, unknown) {
        (Some(r), Some(u)) => match (&r.peak, &u.peak) {
            (Ok(rp), Ok(up)) => Some(alignment_offset(rp.energy, up.energy)),
            _ => None,
        },
        _ => None,
    };

    let shifted_unknown = match (unknown.and_then(|u| u.normalized.as_ref()), offset) {
        (Some(n), Some(offset)) => Some(shift_energies(&n.points, offset)),
        _ => None,
    };

    let distance = score(
        spectra,
        reference,
        window,
        shifted_unknown.as_deref(),
        settings,
    );

    Comparison {
        reference,
        offset,
        shifted_unknown,
        distance,
    }
}

/// Distances are only computed once all three slots are loaded.
fn score(
    spectra: &BTreeMap<SpectrumRole, SpectrumAnalysis>,
    reference: SpectrumRole,
    window: Option<&Result<ComparisonWindow, AnalysisError>>,
    shifted_unknown: Option<&[SpectrumPoint]>,
    settings: &AnalysisSettings,
) -> Result<f64, AnalysisError> {
    if let Some(&role) = SpectrumRole::ALL.iter().find(|r| !spectra.contains_key(*r)) {
        return Err(AnalysisError::MissingInput { role });
    }
    let x_min = f64::from(settings.x_min);

    let window = match window {
        Some(Ok(w)) => *w,
        Some(Err(e)) => return Err(e.clone()),
        None => {
            return Err(AnalysisError::MissingInput {
                role: SpectrumRole::Reference1,
            })
        }
    };

    let ref_analysis = &spectra[&reference];
    let Some(ref_normalized) = &ref_analysis.normalized else {
        return Err(peak_error(ref_analysis, x_min));
    };
    let unknown = &spectra[&SpectrumRole::Unknown];
    let Some(shifted_unknown) = shifted_unknown else {
        return Err(peak_error(unknown, x_min));
    };

    let ref_start = match reference {
        SpectrumRole::Reference1 => window.start_row,
        _ => window_start(&ref_normalized.points, x_min)?,
    };
    // Located on the unshifted axis; the shifted copy keeps the same labels.
    let unknown_start = window_start(&unknown.spectrum.points, x_min)?;

    distance(
        &ref_normalized.points,
        shifted_unknown,
        window.length,
        ref_start,
        unknown_start,
        settings.metric,
    )
}

fn peak_error(analysis: &SpectrumAnalysis, x_min: f64) -> AnalysisError {
    analysis
        .peak
        .clone()
        .err()
        .unwrap_or(AnalysisError::EmptyRange { x_min })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::analysis::DistanceMetric;
    use approx::assert_abs_diff_eq;

    /// Energies 1..=60 eV in 1 eV steps with a single peak at `peak_at`.
    fn table(name: &str, peak_at: f64) -> RawTable {
        let pairs: Vec<(f64, f64)> = (1..=60)
            .map(|i| {
                let e = f64::from(i);
                let intensity = 100.0 * (-(e - peak_at).powi(2) / 50.0).exp() + 1.0;
                (e, intensity)
            })
            .collect();
        RawTable::from_pairs(name, &pairs)
    }

    fn input<'a>(tables: &[(SpectrumRole, &'a RawTable)]) -> PipelineInput<'a> {
        PipelineInput {
            inputs: tables
                .iter()
                .map(|&(role, table)| {
                    (
                        role,
                        SpectrumInput {
                            table,
                            name: &table.source_name,
                        },
                    )
                })
                .collect(),
            settings: AnalysisSettings::default(),
        }
    }

    #[test]
    fn nothing_loaded() {
        let result = run(&PipelineInput::default());
        assert_eq!(result.curve_count(), 0);
        assert!(result.window.is_none());
        assert_eq!(result.comparisons.len(), 2);
        assert!(result.comparisons.iter().all(|c| c.reported_distance() == 0.0));
    }

    #[test]
    fn reference_one_only() {
        let r1 = table("r1.csv", 22.0);
        let result = run(&input(&[(SpectrumRole::Reference1, &r1)]));
        assert_eq!(result.curve_count(), 1);
        assert_abs_diff_eq!(result.peak_energy(SpectrumRole::Reference1).unwrap(), 22.0);
        assert!(result.peak_energy(SpectrumRole::Reference2).is_none());
        assert!(result.peak_energy(SpectrumRole::Unknown).is_none());
        for c in &result.comparisons {
            assert_abs_diff_eq!(c.reported_distance(), 0.0);
            assert!(c.offset.is_none());
            assert!(matches!(c.distance, Err(AnalysisError::MissingInput { .. })));
        }
        assert!(result.diagnostics().is_empty());
    }

    #[test]
    fn full_comparison() {
        let r1 = table("r1.csv", 22.0);
        let r2 = table("r2.csv", 26.0);
        let unknown = table("u.csv", 23.0);
        let result = run(&input(&[
            (SpectrumRole::Reference1, &r1),
            (SpectrumRole::Reference2, &r2),
            (SpectrumRole::Unknown, &unknown),
        ]));
        assert_eq!(result.curve_count(), 3);

        let window = result.window.clone().unwrap().unwrap();
        // rows 4 (5 eV) ..= 49 (50 eV)
        assert_eq!(window.start_row, 4);
        assert_eq!(window.end_row, 49);
        assert_eq!(window.length, 45);

        let c1 = result.comparison(SpectrumRole::Reference1).unwrap();
        let c2 = result.comparison(SpectrumRole::Reference2).unwrap();
        assert_abs_diff_eq!(c1.offset.unwrap(), 1.0);
        assert_abs_diff_eq!(c2.offset.unwrap(), -3.0);

        let shifted = c1.shifted_unknown.as_ref().unwrap();
        assert_abs_diff_eq!(shifted[0].energy, 0.0);

        // Every paired row differs by the offset on the energy axis.
        let d1 = c1.distance.clone().unwrap();
        let d2 = c2.distance.clone().unwrap();
        assert_abs_diff_eq!(d1, 45.0_f64.sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(d2, (45.0_f64 * 9.0).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn intensity_metric_prefers_matching_shape() {
        let r1 = table("r1.csv", 22.0);
        let r2 = table("r2.csv", 35.0);
        let unknown = table("u.csv", 22.0);
        let mut pipeline_input = input(&[
            (SpectrumRole::Reference1, &r1),
            (SpectrumRole::Reference2, &r2),
            (SpectrumRole::Unknown, &unknown),
        ]);
        pipeline_input.settings.metric = DistanceMetric::NormalizedIntensity;
        let result = run(&pipeline_input);
        let d1 = result.comparisons[0].distance.clone().unwrap();
        let d2 = result.comparisons[1].distance.clone().unwrap();
        assert_abs_diff_eq!(d1, 0.0, epsilon = 1e-12);
        assert!(d2 > d1);
    }

    #[test]
    fn x_min_above_all_energies_does_not_panic() {
        let r1 = RawTable::from_pairs("r1.csv", &[(1.0, 2.0), (2.0, 3.0)]);
        let r2 = RawTable::from_pairs("r2.csv", &[(1.0, 2.0), (2.0, 3.0)]);
        let unknown = RawTable::from_pairs("u.csv", &[(1.0, 2.0), (2.0, 3.0)]);
        let result = run(&input(&[
            (SpectrumRole::Reference1, &r1),
            (SpectrumRole::Reference2, &r2),
            (SpectrumRole::Unknown, &unknown),
        ]));
        assert_eq!(result.curve_count(), 0);
        assert!(matches!(
            result.get(SpectrumRole::Unknown).unwrap().peak,
            Err(AnalysisError::EmptyRange { .. })
        ));
        assert!(matches!(result.window, Some(Err(AnalysisError::EmptyWindow { .. }))));
        assert!(result.comparisons.iter().all(|c| c.reported_distance() == 0.0));
        assert!(!result.diagnostics().is_empty());
    }

    /// [`table`] preceded by `leading` rows below 1 eV.
    fn padded(name: &str, peak_at: f64, leading: usize) -> RawTable {
        let base = table(name, peak_at);
        let pairs: Vec<(f64, f64)> = (1..=leading)
            .map(|k| (k as f64 * 0.15, 1.0))
            .chain(base.rows.iter().filter_map(|r| Some((r.energy?, r.intensity?))))
            .collect();
        RawTable::from_pairs(name, &pairs)
    }

    #[test]
    fn each_spectrum_starts_at_its_own_row() {
        let r1 = table("r1.csv", 22.0);
        let r2 = padded("r2.csv", 22.0, 3);
        let unknown = padded("u.csv", 22.0, 5);
        let result = run(&input(&[
            (SpectrumRole::Reference1, &r1),
            (SpectrumRole::Reference2, &r2),
            (SpectrumRole::Unknown, &unknown),
        ]));

        let window = result.window.clone().unwrap().unwrap();
        assert_eq!(window.start_row, 4);
        assert_eq!(window.length, 45);

        // 5 eV sits at row 7 in Ref.2 and row 9 in the unknown, so the same
        // energies are paired and the distance vanishes. Starting both at
        // Ref.1's row 4 would pair different energies.
        for c in &result.comparisons {
            assert_abs_diff_eq!(c.offset.unwrap(), 0.0);
            assert_abs_diff_eq!(c.distance.clone().unwrap(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn shorter_unknown_is_misaligned() {
        let r1 = table("r1.csv", 22.0);
        let r2 = table("r2.csv", 22.0);
        let pairs: Vec<(f64, f64)> = (1..=30)
            .map(|i| (f64::from(i), if i == 22 { 10.0 } else { 1.0 }))
            .collect();
        let unknown = RawTable::from_pairs("u.csv", &pairs);
        let result = run(&input(&[
            (SpectrumRole::Reference1, &r1),
            (SpectrumRole::Reference2, &r2),
            (SpectrumRole::Unknown, &unknown),
        ]));
        assert!(matches!(
            result.comparisons[0].distance,
            Err(AnalysisError::IndexMisalignment {
                spectrum: "unknown",
                ..
            })
        ));
    }
}
