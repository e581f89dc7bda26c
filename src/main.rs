use std::path::Path;

use eframe::egui;
use staffscope::app::DashboardApp;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Staffscope – Employee Data Explorer",
        options,
        Box::new(|_cc| {
            let mut app = DashboardApp::default();
            // Pick up a data.csv in the working directory, as the original
            // dashboard does; otherwise wait for File → Open.
            let default_source = Path::new("data.csv");
            if default_source.exists() {
                app.state.open(default_source);
            }
            Ok(Box::new(app))
        }),
    )
}
