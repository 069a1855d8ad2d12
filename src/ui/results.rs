use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use loweels::analysis::PipelineResult;
use loweels::analysis::distance::round2;
use loweels::data::model::SpectrumRole;

// ---------------------------------------------------------------------------
// Results tables
// ---------------------------------------------------------------------------

fn value_or_blank(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

/// Peak energy per slot. Empty slots stay blank.
pub fn peak_table(ui: &mut Ui, result: &PipelineResult) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto())
        .column(Column::remainder().at_least(120.0))
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Name");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("E_peak(eV)");
            });
        })
        .body(|mut body| {
            for role in SpectrumRole::ALL {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(role.label());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(result.get(role).map(|a| a.name.as_str()).unwrap_or(""));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.monospace(value_or_blank(result.peak_energy(role)));
                    });
                });
            }
        });
}

/// Peak offsets of the unknown against each reference.
pub fn delta_table(ui: &mut Ui, result: &PipelineResult) {
    let rows: Vec<(String, String)> = SpectrumRole::REFERENCES
        .iter()
        .map(|&reference| {
            let offset = result.comparison(reference).and_then(|c| c.offset);
            (
                format!("E_max - E_max_{}", reference.label().replace('.', "")),
                value_or_blank(offset),
            )
        })
        .chain(std::iter::once((String::new(), "-".to_string())))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::remainder().at_least(140.0))
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Delta E_peak(eV)");
            });
        })
        .body(|mut body| {
            for (label, value) in &rows {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(label);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.monospace(value);
                    });
                });
            }
        });
}

/// The two distances, rounded to two decimals.
pub fn distances(ui: &mut Ui, result: &PipelineResult) {
    ui.label(
        RichText::new(format!("Metric: {}", result.settings.metric))
            .small()
            .weak(),
    );
    for comparison in &result.comparisons {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("Sqr Distance for {}", comparison.reference));
            ui.monospace(format!("{:.2}", round2(comparison.reported_distance())));
            if let Err(e) = &comparison.distance {
                ui.label(RichText::new(format!("(not computed: {e})")).weak());
            }
        });
    }
}

/// Rows dropped while reading and every analysis error.
pub fn diagnostics(ui: &mut Ui, result: &PipelineResult) {
    let notes: Vec<String> = result
        .spectra
        .values()
        .filter(|a| a.report.rows_kept() != a.report.rows_read || a.report.nan_intensities > 0)
        .map(|a| {
            format!(
                "{}: kept {} of {} rows ({} unparseable, {} at 0 eV, {} non-numeric intensities)",
                a.name,
                a.report.rows_kept(),
                a.report.rows_read,
                a.report.dropped_unparseable,
                a.report.dropped_zero_energy,
                a.report.nan_intensities
            )
        })
        .collect();
    let errors = result.diagnostics();

    if notes.is_empty() && errors.is_empty() {
        return;
    }

    egui::CollapsingHeader::new(RichText::new("Diagnostics").strong())
        .default_open(!errors.is_empty())
        .show(ui, |ui: &mut Ui| {
            for note in &notes {
                ui.label(note);
            }
            for (what, e) in &errors {
                ui.label(RichText::new(format!("{what}: {e}")).color(Color32::RED));
            }
        });
}
