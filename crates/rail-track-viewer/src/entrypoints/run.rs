//! Native (desktop) entry point

use super::logging::setup_logging;
use super::metadata::log_version_info;
use crate::app::RailTrackViewerApp;

const APP_NAME: &str = "Rail Track Viewer";

/// Run the application, blocking until the window is closed.
pub fn run_native() {
    setup_logging();
    log_version_info();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(APP_NAME),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(RailTrackViewerApp::new(cc)))),
    ) {
        tracing::error!("{APP_NAME} exited with an error: {err}");
    }
}
