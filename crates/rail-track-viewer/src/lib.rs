//! Rail Track Viewer - Application Library
//!
//! Loads a British National Grid track dataset once, reprojects and presents it with
//! `rail-track-lib`, and draws the result over a slippy map.

mod app;
mod entrypoints;

pub use app::RailTrackViewerApp;
pub use entrypoints::run::run_native;
