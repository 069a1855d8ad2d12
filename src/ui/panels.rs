use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use loweels::analysis::DistanceMetric;
use loweels::data::model::SpectrumRole;
use loweels::settings::{X_MAX_BOUNDS, X_MIN_BOUNDS};

use crate::color::role_color;
use crate::state::AppState;

fn slot_prompt(role: SpectrumRole) -> &'static str {
    match role {
        SpectrumRole::Reference1 => "Upload first reference .csv file",
        SpectrumRole::Reference2 => "Upload second reference .csv file",
        SpectrumRole::Unknown => "Upload spectrum to be analyzed .csv file",
    }
}

fn name_prompt(role: SpectrumRole) -> &'static str {
    match role {
        SpectrumRole::Reference1 => "Set a name for Ref.1",
        SpectrumRole::Reference2 => "Set a name for Ref.2",
        SpectrumRole::Unknown => "Set a name for the spectrum to be identified",
    }
}

// ---------------------------------------------------------------------------
// Left side panel – inputs and energy window
// ---------------------------------------------------------------------------

/// Render the left input panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("User Input File");
            ui.separator();

            for role in SpectrumRole::ALL {
                slot_widget(ui, state, role);
                ui.add_space(6.0);
            }

            ui.separator();
            window_widgets(ui, state);

            ui.separator();
            options_widgets(ui, state);
        });
}

fn slot_widget(ui: &mut Ui, state: &mut AppState, role: SpectrumRole) {
    ui.label(RichText::new(slot_prompt(role)).strong().color(role_color(role)));

    let loaded = state
        .slots
        .get(&role)
        .map(|slot| (slot.name.clone(), slot.path.display().to_string()));

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Browse…").clicked() {
            open_file_dialog(state, role);
        }
        if loaded.is_some() && ui.small_button("Clear").clicked() {
            state.clear_slot(role);
        }
    });

    if let Some((name, path)) = loaded {
        ui.label(RichText::new(&path).small().weak());
        ui.label(name_prompt(role));
        let mut edited = name;
        if ui.text_edit_singleline(&mut edited).changed() {
            state.set_name(role, edited);
        }
    }
}

fn window_widgets(ui: &mut Ui, state: &mut AppState) {
    let mut x_min = state.settings.x_min;
    if ui
        .add(egui::Slider::new(&mut x_min, X_MIN_BOUNDS).text("Set the min. Energy Loss (eV)"))
        .changed()
    {
        state.set_x_min(x_min);
    }

    let mut x_max = state.settings.x_max;
    if ui
        .add(egui::Slider::new(&mut x_max, X_MAX_BOUNDS).text("Set the Max. Energy Loss (eV)"))
        .changed()
    {
        state.set_x_max(x_max);
    }

    ui.label(
        RichText::new("Keep the ZLP out of the window: spectra are normalized to the highest point above the minimum.")
            .small()
            .weak(),
    );
}

fn options_widgets(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Distance");
    let current = state.settings.metric;
    let mut selected = current;
    egui::ComboBox::from_id_salt("distance_metric")
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for metric in DistanceMetric::ALL {
                ui.selectable_value(&mut selected, metric, metric.label());
            }
        });
    if selected != current {
        state.set_metric(selected);
    }

    let mut drop_zero = state.settings.drop_zero_energy;
    if ui
        .checkbox(&mut drop_zero, "Drop rows at 0 eV")
        .on_hover_text("Rows with a non-numeric energy are always dropped.")
        .changed()
    {
        state.set_drop_zero_energy(drop_zero);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            for role in SpectrumRole::ALL {
                if ui.button(format!("Open {role}…")).clicked() {
                    open_file_dialog(state, role);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("Export results…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("{} of 3 spectra loaded", state.slots.len()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, role: SpectrumRole) {
    let file = rfd::FileDialog::new()
        .set_title(slot_prompt(role))
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_slot(role, &path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export results")
        .set_file_name("loweels_results.json")
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_results(&path);
    }
}
