//! Logging setup for the native entry point.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is not set
fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,eframe::native=warn,hyper_util=info,walkers=info,egui::context=warn,reqwest::connect=info,wgpu_core=warn,wgpu_hal=warn,naga=warn"
    } else {
        "info,eframe::native=warn,egui::context=warn,wgpu_core=warn,wgpu_hal=warn"
    }
}

/// Install the global `tracing` subscriber. Must run before any logging.
pub fn setup_logging() {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_filter()), false),
    };

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter);
    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        eprintln!("A global tracing subscriber was already installed");
        return;
    }

    if !from_env {
        tracing::info!("RUST_LOG not set, using default: {}", default_filter());
    }
}
