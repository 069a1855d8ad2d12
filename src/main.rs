mod app;
mod color;
mod state;
mod ui;

use app::LowEelsApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Low EELS – Phase Comparison",
        options,
        Box::new(|_cc| Ok(Box::new(LowEelsApp::default()))),
    )
}
