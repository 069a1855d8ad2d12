//! Saving the results panel to disk.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::analysis::PipelineResult;
use crate::analysis::distance::round2;
use crate::data::model::SpectrumRole;
use crate::data::sanitize::SanitizeReport;
use crate::settings::AnalysisSettings;

/// Flat, serializable view of a [`PipelineResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsExport {
    pub settings: AnalysisSettings,
    pub peaks: Vec<PeakRow>,
    pub comparisons: Vec<ComparisonRow>,
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakRow {
    pub role: SpectrumRole,
    pub name: String,
    /// `E_peak(eV)`
    pub peak_energy: Option<f64>,
    pub peak_intensity: Option<f64>,
    pub sanitize: SanitizeReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub reference: SpectrumRole,
    /// `E_max - E_max_Ref`
    pub delta_peak_energy: Option<f64>,
    /// Rounded to two decimals; 0 when not computed.
    pub distance: f64,
    pub computed: bool,
}

impl ResultsExport {
    pub fn from_result(result: &PipelineResult) -> Self {
        let peaks = result
            .spectra
            .values()
            .map(|a| PeakRow {
                role: a.role,
                name: a.name.clone(),
                peak_energy: a.peak.as_ref().ok().map(|p| p.energy),
                peak_intensity: a.peak.as_ref().ok().map(|p| p.intensity),
                sanitize: a.report,
            })
            .collect();

        let comparisons = result
            .comparisons
            .iter()
            .map(|c| ComparisonRow {
                reference: c.reference,
                delta_peak_energy: c.offset,
                distance: round2(c.reported_distance()),
                computed: c.distance.is_ok(),
            })
            .collect();

        let diagnostics = result
            .diagnostics()
            .into_iter()
            .map(|(what, e)| format!("{what}: {e}"))
            .collect();

        ResultsExport {
            settings: result.settings,
            peaks,
            comparisons,
            diagnostics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing results to JSON")
    }

    /// One `section,label,value` row per reported number.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["section", "label", "value"])?;
        writer.write_record(["settings", "x_min", self.settings.x_min.to_string().as_str()])?;
        writer.write_record(["settings", "x_max", self.settings.x_max.to_string().as_str()])?;
        writer.write_record(["settings", "metric", self.settings.metric.label()])?;
        for p in &self.peaks {
            writer.write_record(["E_peak(eV)", p.name.as_str(), optional(p.peak_energy).as_str()])?;
        }
        for c in &self.comparisons {
            let label = format!("E_max - E_max_{}", compact(c.reference));
            writer.write_record([
                "Delta E_peak(eV)",
                label.as_str(),
                optional(c.delta_peak_energy).as_str(),
            ])?;
        }
        for c in &self.comparisons {
            let label = format!("Sqr Distance for {}", c.reference);
            writer.write_record([
                "distance",
                label.as_str(),
                format!("{:.2}", c.distance).as_str(),
            ])?;
        }
        let bytes = writer.into_inner().context("flushing CSV export")?;
        String::from_utf8(bytes).context("CSV export is not UTF-8")
    }
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn compact(role: SpectrumRole) -> String {
    role.label().replace('.', "")
}

/// Write the results next to the user's data.  Dispatch by extension.
pub fn save_results(path: &Path, result: &PipelineResult) -> Result<()> {
    let export = ResultsExport::from_result(result);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let text = match ext.as_str() {
        "json" => export.to_json()?,
        "csv" => export.to_csv()?,
        other => bail!("Unsupported export extension: .{other}"),
    };
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Saved results to {}", path.display());
    Ok(())
}
