use eframe::egui::{self, RichText, ScrollArea, Ui};

use loweels::data::model::SpectrumRole;

use crate::state::AppState;
use crate::ui::{panels, plot, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct LowEelsApp {
    pub state: AppState,
}

impl eframe::App for LowEelsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs ----
        egui::SidePanel::left("input_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    central(ui, &self.state);
                });
        });
    }
}

fn central(ui: &mut Ui, state: &AppState) {
    ui.heading("Low EELS App");
    ui.label(
        "Compare an EELS spectrum with two references to determine which phase it belongs to. \
         Load your files and set the energy limits to leave out the ZLP and unneeded data.",
    );
    ui.add_space(8.0);

    plot::combined_plot(ui, state);

    ui.separator();
    ui.heading("Results");

    let result = &state.result;
    ui.columns(2, |columns| {
        results::peak_table(&mut columns[0], result);
        results::delta_table(&mut columns[1], result);

        for (column, reference) in columns.iter_mut().zip(SpectrumRole::REFERENCES) {
            column.add_space(8.0);
            column.label(RichText::new(format!("Comparing to {reference}")).heading());
            plot::comparison_plot(column, result, reference);
        }
    });

    ui.add_space(8.0);
    results::distances(ui, result);
    results::diagnostics(ui, result);
}
