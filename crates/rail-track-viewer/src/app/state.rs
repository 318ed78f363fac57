//! Application state management
//!
//! This module holds the presented dataset and the UI settings. The dataset is loaded,
//! reprojected and presented exactly once, at startup.

use crate::app::settings::{BaseLayer, Settings};
use rail_track_lib::{FeatureCollection, Presentation, Reprojector, TrackPresenter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Main application state
pub struct AppState {
    /// Dataset file the presentation was built from
    pub dataset_path: PathBuf,

    /// Presented dataset, `None` if loading failed
    pub presentation: Option<Arc<Presentation>>,

    /// Why the dataset could not be loaded
    pub load_error: Option<String>,

    /// Current UI settings
    pub ui_settings: UiSettings,

    /// Fit the viewport to the dataset bounds on the next frame
    pub pending_fit_bounds: bool,
}

/// UI-specific settings that can be adjusted at runtime
#[derive(Clone, Debug, PartialEq)]
pub struct UiSettings {
    /// Map tiles provider
    pub tiles_provider: TilesProvider,

    /// Whether the railway tracks overlay is drawn
    pub show_tracks: bool,

    /// Whether track labels are drawn
    pub show_labels: bool,

    /// Whether sidebar is open
    pub sidebar_open: bool,

    /// Current active tab in sidebar
    pub active_tab: SidebarTab,
}

/// Sidebar tabs
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SidebarTab {
    Tracks,
    Layers,
}

/// Available map tile providers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TilesProvider {
    OpenStreetMap,
    Satellite,
}

impl TilesProvider {
    pub fn attribution(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "© OpenStreetMap contributors",
            Self::Satellite => "© Esri",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::OpenStreetMap, Self::Satellite]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "OpenStreetMap",
            Self::Satellite => "Satellite",
        }
    }
}

impl From<BaseLayer> for TilesProvider {
    fn from(layer: BaseLayer) -> Self {
        match layer {
            BaseLayer::OpenStreetMap => Self::OpenStreetMap,
            BaseLayer::Satellite => Self::Satellite,
        }
    }
}

/// Load, reproject and present a dataset file
pub fn load_presentation(path: &Path) -> rail_track_lib::Result<Presentation> {
    profiling::scope!("load_presentation");

    let source = FeatureCollection::from_path(path)?;
    let reprojector = Reprojector::british_national_grid()?;
    let presentation = TrackPresenter::default().present(&reprojector, &source);

    tracing::info!(
        "Presented {} features ({} distinct tracks, {} points, {} failed)",
        presentation.tracks.len(),
        presentation.colors.len(),
        presentation.drawn_coord_count(),
        presentation.errors.len()
    );
    Ok(presentation)
}

impl AppState {
    /// Create application state from CLI settings, loading the dataset
    pub fn new(settings: &Settings) -> Self {
        let (presentation, load_error) = match load_presentation(&settings.dataset) {
            Ok(presentation) => (Some(Arc::new(presentation)), None),
            Err(err) => {
                tracing::error!("Failed to load {}: {err}", settings.dataset.display());
                (None, Some(err.to_string()))
            }
        };

        Self::from_parts(settings, presentation, load_error)
    }

    fn from_parts(
        settings: &Settings,
        presentation: Option<Arc<Presentation>>,
        load_error: Option<String>,
    ) -> Self {
        let pending_fit_bounds = presentation
            .as_ref()
            .is_some_and(|p| p.bounds.is_some());

        Self {
            dataset_path: settings.dataset.clone(),
            presentation,
            load_error,
            ui_settings: UiSettings {
                tiles_provider: settings.tiles.into(),
                show_tracks: !settings.hide_tracks,
                show_labels: !settings.hide_labels,
                ..UiSettings::default()
            },
            pending_fit_bounds,
        }
    }

    /// Request a viewport fit, if the dataset has valid bounds
    pub fn request_fit_bounds(&mut self) {
        self.pending_fit_bounds = self.has_bounds();
    }

    pub fn has_bounds(&self) -> bool {
        self.presentation
            .as_ref()
            .is_some_and(|p| p.bounds.is_some())
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tiles_provider: TilesProvider::OpenStreetMap,
            show_tracks: true,
            show_labels: true,
            sidebar_open: true,
            active_tab: SidebarTab::Tracks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn settings(args: &[&str]) -> Settings {
        Settings::parse_from(std::iter::once("rail-track-viewer").chain(args.iter().copied()))
    }

    #[test]
    fn test_missing_dataset_keeps_default_viewport() {
        let state = AppState::new(&settings(&["--dataset", "/nonexistent/tracks.json"]));

        assert!(state.presentation.is_none());
        assert!(state.load_error.is_some());
        assert!(!state.pending_fit_bounds);
    }

    #[test]
    fn test_empty_dataset_does_not_fit() {
        let presentation =
            TrackPresenter::default().present_reprojected(FeatureCollection::new(Vec::new()));
        let mut state =
            AppState::from_parts(&settings(&[]), Some(Arc::new(presentation)), None);

        assert!(!state.pending_fit_bounds);
        state.request_fit_bounds();
        assert!(!state.pending_fit_bounds);
    }

    #[test]
    fn test_settings_flow_into_ui() {
        let state = AppState::from_parts(
            &settings(&["--tiles", "satellite", "--hide-tracks"]),
            None,
            None,
        );

        assert_eq!(state.ui_settings.tiles_provider, TilesProvider::Satellite);
        assert!(!state.ui_settings.show_tracks);
        assert!(state.ui_settings.show_labels);
    }

    #[test]
    fn test_sample_dataset_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/trackcentral.json");
        let presentation = load_presentation(&path).unwrap();

        assert!(presentation.errors.is_empty());
        assert!(!presentation.colors.is_empty());
        assert_eq!(presentation.legend.len(), presentation.colors.len());
        let unknown = presentation.legend.iter().find(|e| e.track_id == 9999).unwrap();
        assert_eq!(unknown.name, None);
        let bounds = presentation.bounds.unwrap();
        assert!(bounds.west() > -8.0 && bounds.east() < 2.0);
        assert!(bounds.south() > 49.0 && bounds.north() < 61.0);
    }
}
