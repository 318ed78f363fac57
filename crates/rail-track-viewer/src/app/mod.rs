//! Application module
//!
//! This module provides the main application structure:
//! - Full-screen map view with a selectable base layer
//! - Railway tracks overlay, colored and labeled per track
//! - Toggleable sidebar with a legend and layer controls

mod plugin;
pub(crate) mod settings;
mod state;
mod ui_panels;

use crate::app::plugin::TrackPlugin;
use crate::app::settings::Settings;
use crate::app::state::{AppState, TilesProvider};
use eframe::egui;
use rail_track_lib::Bounds;
use walkers::{
    HttpTiles, Map, MapMemory, TileId,
    sources::{Attribution, OpenStreetMap, TileSource},
};

/// Initial viewport center (latitude, longitude), over London
const DEFAULT_CENTER: (f64, f64) = (51.5, -0.1);

/// Initial zoom level
const DEFAULT_ZOOM: f64 = 9.0;

/// Esri World Imagery tile source
pub struct EsriWorldImagery;

impl TileSource for EsriWorldImagery {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{}/{}/{}",
            tile_id.zoom, tile_id.y, tile_id.x
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© Esri",
            url: "https://www.esri.com/",
            logo_light: None,
            logo_dark: None,
        }
    }
}

/// Main application structure
pub struct RailTrackViewerApp {
    /// Application state (presented dataset, UI settings)
    state: AppState,

    /// Map tiles provider (OpenStreetMap)
    tiles_osm: HttpTiles,

    /// Map tiles provider (Esri World Imagery)
    tiles_satellite: HttpTiles,

    /// Map state (camera position, zoom, etc.)
    map_memory: MapMemory,
}

impl RailTrackViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let cli_args = Settings::from_cli();
        let state = AppState::new(&cli_args);

        let tiles_osm = HttpTiles::new(OpenStreetMap, cc.egui_ctx.clone());
        let tiles_satellite = HttpTiles::new(EsriWorldImagery, cc.egui_ctx.clone());

        let mut map_memory = MapMemory::default();
        let _ = map_memory.set_zoom(DEFAULT_ZOOM);

        Self {
            state,
            tiles_osm,
            tiles_satellite,
            map_memory,
        }
    }

    /// Fit the map view to the bounding box of the dataset
    fn fit_to_bounds(&mut self) {
        let Some(bounds) = self.state.presentation.as_ref().and_then(|p| p.bounds) else {
            return;
        };

        let center = bounds.center();
        let zoom = fit_zoom(&bounds);

        self.map_memory
            .center_at(walkers::lat_lon(center.y, center.x));
        let _ = self.map_memory.set_zoom(zoom);

        tracing::debug!(
            "Fitted to bounds: ({:.4}, {:.4}) - ({:.4}, {:.4}), zoom: {:.1}",
            bounds.south(),
            bounds.west(),
            bounds.north(),
            bounds.east(),
            zoom
        );
    }
}

/// Zoom level at which `bounds` roughly fills the viewport
fn fit_zoom(bounds: &Bounds) -> f64 {
    let max_span = bounds.max_span();
    if max_span > 0.0 {
        ((4.0 * 360.0 / max_span).log2() - 0.5).clamp(1.0, 18.0)
    } else {
        12.0
    }
}

#[profiling::all_functions]
impl eframe::App for RailTrackViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.pending_fit_bounds {
            self.state.pending_fit_bounds = false;
            self.fit_to_bounds();
        }

        ui_panels::render_sidebar(ctx, &mut self.state);

        let presentation = self.state.presentation.clone();
        let show_tracks = self.state.ui_settings.show_tracks;
        let show_labels = self.state.ui_settings.show_labels;
        let tiles_provider = self.state.ui_settings.tiles_provider;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                profiling::scope!("map_panel");

                let tiles: &mut HttpTiles = match tiles_provider {
                    TilesProvider::OpenStreetMap => &mut self.tiles_osm,
                    TilesProvider::Satellite => &mut self.tiles_satellite,
                };

                let mut map = Map::new(
                    Some(tiles),
                    &mut self.map_memory,
                    walkers::lat_lon(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
                );
                if let Some(presentation) = presentation.filter(|_| show_tracks) {
                    map = map.with_plugin(TrackPlugin::new(presentation, show_labels));
                }

                ui.add(map);

                ui_panels::sidebar_toggle_button(ui, &mut self.state);

                let painter = ui.painter();
                let screen_rect = ui.max_rect();
                painter.text(
                    screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
                    egui::Align2::CENTER_BOTTOM,
                    tiles_provider.attribution(),
                    egui::FontId::proportional(10.0),
                    egui::Color32::from_black_alpha(180),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;

    fn bounds(west: f64, south: f64, east: f64, north: f64) -> Bounds {
        Bounds::from_coords([Coord { x: west, y: south }, Coord { x: east, y: north }]).unwrap()
    }

    #[test]
    fn test_fit_zoom_point_dataset() {
        assert_eq!(fit_zoom(&bounds(-0.1, 51.5, -0.1, 51.5)), 12.0);
    }

    #[test]
    fn test_fit_zoom_shrinks_with_span() {
        let london = fit_zoom(&bounds(-0.3, 51.4, 0.1, 51.6));
        let britain = fit_zoom(&bounds(-6.0, 50.0, 2.0, 58.0));

        assert!(london > britain);
        assert!((1.0..=18.0).contains(&london));
        assert!((1.0..=18.0).contains(&britain));
    }

    #[test]
    fn test_fit_zoom_extremes() {
        assert!((fit_zoom(&bounds(-180.0, -85.0, 180.0, 85.0)) - 1.5).abs() < 1e-9);
        assert_eq!(fit_zoom(&bounds(0.0, 0.0, 1e-9, 1e-9)), 18.0);
    }
}
