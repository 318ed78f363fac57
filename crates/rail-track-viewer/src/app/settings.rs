use crate::entrypoints::cli::parse_args;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Rail Track Viewer - Map of railway track segments, colored and labeled by track
pub struct Settings {
    /// GeoJSON dataset of track segments in British National Grid (EPSG:27700) coordinates
    #[clap(short, long, value_name = "FILE", default_value = "data/trackcentral.json")]
    pub dataset: PathBuf,

    /// Base map layer shown on startup
    #[clap(short, long, value_enum, default_value_t = BaseLayer::OpenStreetMap)]
    pub tiles: BaseLayer,

    /// Start with the railway tracks overlay hidden
    #[clap(long, default_value = "false")]
    pub hide_tracks: bool,

    /// Start with track labels hidden
    #[clap(long, default_value = "false")]
    pub hide_labels: bool,
}

/// Base layer names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseLayer {
    #[value(name = "openstreetmap")]
    OpenStreetMap,
    Satellite,
}

impl Settings {
    pub fn from_cli() -> Self {
        parse_args::<Settings>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::parse_from(["rail-track-viewer"]);
        assert_eq!(settings.dataset, PathBuf::from("data/trackcentral.json"));
        assert_eq!(settings.tiles, BaseLayer::OpenStreetMap);
        assert!(!settings.hide_tracks);
        assert!(!settings.hide_labels);
    }

    #[test]
    fn test_flags() {
        let settings = Settings::parse_from([
            "rail-track-viewer",
            "--dataset",
            "tracks.geojson",
            "--tiles",
            "satellite",
            "--hide-labels",
        ]);
        assert_eq!(settings.dataset, PathBuf::from("tracks.geojson"));
        assert_eq!(settings.tiles, BaseLayer::Satellite);
        assert!(settings.hide_labels);
        assert!(!settings.hide_tracks);
    }

    #[test]
    fn test_unknown_tiles_rejected() {
        assert!(Settings::try_parse_from(["rail-track-viewer", "--tiles", "mars"]).is_err());
    }
}
