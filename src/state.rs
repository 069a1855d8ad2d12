use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use loweels::analysis::DistanceMetric;
use loweels::analysis::pipeline::{self, PipelineInput, PipelineResult, SpectrumInput};
use loweels::data::loader::load_file;
use loweels::data::model::{RawTable, Spectrum, SpectrumRole};
use loweels::data::sample::preview_spectrum;
use loweels::data::sanitize::sanitize;
use loweels::settings::AnalysisSettings;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// A loaded file in one of the three slots.
pub struct SpectrumSlot {
    pub path: PathBuf,
    pub table: RawTable,
    /// Display name, defaults to the file name.
    pub name: String,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded files by slot.
    pub slots: BTreeMap<SpectrumRole, SpectrumSlot>,

    pub settings: AnalysisSettings,

    /// Result of the last recomputation.
    pub result: PipelineResult,

    /// Raw spectrum shown while nothing is loaded.
    pub preview: Spectrum,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let settings = AnalysisSettings::default();
        let (preview, _) = sanitize(&preview_spectrum(), settings.drop_zero_energy);
        Self {
            slots: BTreeMap::new(),
            settings,
            result: pipeline::run(&PipelineInput::default()),
            preview,
            status_message: None,
        }
    }
}

impl AppState {
    /// Whether any slot holds a file.
    pub fn has_input(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Read `path` into `role`. On failure the slot keeps its old content.
    pub fn load_slot(&mut self, role: SpectrumRole, path: &Path) {
        match load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows into {role} from {}",
                    table.len(),
                    path.display()
                );
                let unparseable = table.rows.iter().filter(|r| r.energy.is_none()).count();
                if unparseable > 0 {
                    log::warn!(
                        "{unparseable} rows of {} have a non-numeric energy and will be dropped",
                        table.source_name
                    );
                }
                let name = table.source_name.clone();
                self.slots.insert(
                    role,
                    SpectrumSlot {
                        path: path.to_path_buf(),
                        table,
                        name,
                    },
                );
                self.status_message = None;
                self.recompute();
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn clear_slot(&mut self, role: SpectrumRole) {
        if self.slots.remove(&role).is_some() {
            self.recompute();
        }
    }

    pub fn set_name(&mut self, role: SpectrumRole, name: String) {
        if let Some(slot) = self.slots.get_mut(&role) {
            slot.name = name;
            self.recompute();
        }
    }

    pub fn set_x_min(&mut self, x_min: u32) {
        self.update_settings(AnalysisSettings {
            x_min,
            ..self.settings
        });
    }

    pub fn set_x_max(&mut self, x_max: u32) {
        self.update_settings(AnalysisSettings {
            x_max,
            ..self.settings
        });
    }

    pub fn set_metric(&mut self, metric: DistanceMetric) {
        self.update_settings(AnalysisSettings {
            metric,
            ..self.settings
        });
    }

    pub fn set_drop_zero_energy(&mut self, drop_zero_energy: bool) {
        self.update_settings(AnalysisSettings {
            drop_zero_energy,
            ..self.settings
        });
    }

    fn update_settings(&mut self, settings: AnalysisSettings) {
        let settings = settings.clamped();
        if settings != self.settings {
            self.settings = settings;
            self.recompute();
        }
    }

    /// Rebuild the result from scratch.
    pub fn recompute(&mut self) {
        let input = PipelineInput {
            inputs: self
                .slots
                .iter()
                .map(|(&role, slot)| {
                    (
                        role,
                        SpectrumInput {
                            table: &slot.table,
                            name: &slot.name,
                        },
                    )
                })
                .collect(),
            settings: self.settings,
        };
        self.result = pipeline::run(&input);
    }

    /// Save the current result. Errors end up in the status message.
    pub fn export_results(&mut self, path: &Path) {
        match loweels::export::save_results(path, &self.result) {
            Ok(()) => self.status_message = Some(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to export results: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
