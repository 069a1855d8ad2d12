use eframe::egui::{Color32, FontFamily, RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};

use loweels::analysis::PipelineResult;
use loweels::data::model::{SpectrumRole, xy};
use loweels::settings::{NORMALIZED_Y_RANGE, PREVIEW_Y_RANGE};

use crate::color::{preview_color, role_color, title_color};
use crate::state::AppState;

const ENERGY_AXIS: &str = "Energy Loss (eV)";
const NORMALIZED_AXIS: &str = "Normalized Intensity";
const RAW_AXIS: &str = "Intensity";

const MAIN_HEIGHT: f32 = 500.0;
const COMPARISON_HEIGHT: f32 = 325.0;

struct Curve {
    name: String,
    points: Vec<[f64; 2]>,
    color: Color32,
}

fn mono(text: &str) -> RichText {
    RichText::new(text).family(FontFamily::Monospace)
}

fn title(ui: &mut Ui, text: &str, color: Option<Color32>) {
    let mut rich = mono(text).size(18.0).strong();
    if let Some(c) = color {
        rich = rich.color(c);
    }
    ui.label(rich);
}

/// Draw `curves` on fixed axes. Bounds are reapplied every frame so the
/// sliders always define the visible window.
fn draw(
    ui: &mut Ui,
    id: &str,
    height: f32,
    x_range: (f64, f64),
    y_range: (f64, f64),
    y_label: &str,
    curves: Vec<Curve>,
) {
    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(mono(ENERGY_AXIS))
        .y_axis_label(mono(y_label))
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [x_range.0, y_range.0],
                [x_range.1, y_range.1],
            ));
            for curve in curves {
                let line = Line::new(PlotPoints::from(curve.points))
                    .name(&curve.name)
                    .color(curve.color)
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Combined chart (top of the central panel)
// ---------------------------------------------------------------------------

/// All loaded spectra, peak-normalized and unshifted. Before anything is
/// loaded the raw sample spectrum is shown instead.
pub fn combined_plot(ui: &mut Ui, state: &AppState) {
    let x_range = state.settings.window();

    if !state.has_input() {
        title(ui, "Sample Low Loss EELS spectrum (Fe2O3)", None);
        let curve = Curve {
            name: "Fe2O3 (sample)".to_string(),
            points: state.preview.xy(),
            color: preview_color(),
        };
        draw(
            ui,
            "combined_plot",
            MAIN_HEIGHT,
            x_range,
            PREVIEW_Y_RANGE,
            RAW_AXIS,
            vec![curve],
        );
        return;
    }

    title(ui, "Low Loss EELS spectra", Some(title_color()));
    let curves = state
        .result
        .spectra
        .values()
        .filter_map(|a| {
            let normalized = a.normalized.as_ref()?;
            Some(Curve {
                name: a.name.clone(),
                points: xy(&normalized.points),
                color: role_color(a.role),
            })
        })
        .collect();
    draw(
        ui,
        "combined_plot",
        MAIN_HEIGHT,
        x_range,
        NORMALIZED_Y_RANGE,
        NORMALIZED_AXIS,
        curves,
    );
}

// ---------------------------------------------------------------------------
// Pairwise comparison charts
// ---------------------------------------------------------------------------

/// One reference against the unknown shifted onto its peak.
pub fn comparison_plot(ui: &mut Ui, result: &PipelineResult, reference: SpectrumRole) {
    let mut curves = Vec::new();

    if let Some(normalized) = result.get(reference).and_then(|a| a.normalized.as_ref()) {
        curves.push(Curve {
            name: result.get(reference).map(|a| a.name.clone()).unwrap_or_default(),
            points: xy(&normalized.points),
            color: role_color(reference),
        });
    }

    if let Some(unknown) = result.get(SpectrumRole::Unknown) {
        let shifted = result
            .comparison(reference)
            .and_then(|c| c.shifted_unknown.as_deref());
        let points = match (shifted, unknown.normalized.as_ref()) {
            (Some(shifted), _) => Some(xy(shifted)),
            (None, Some(normalized)) => Some(xy(&normalized.points)),
            (None, None) => None,
        };
        if let Some(points) = points {
            curves.push(Curve {
                name: unknown.name.clone(),
                points,
                color: role_color(SpectrumRole::Unknown),
            });
        }
    }

    let id = format!("compare_{reference:?}");
    draw(
        ui,
        &id,
        COMPARISON_HEIGHT,
        result.settings.window(),
        NORMALIZED_Y_RANGE,
        NORMALIZED_AXIS,
        curves,
    );
}
