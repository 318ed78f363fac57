//! Immutable configuration injected into the reprojector and the presenter
//!
//! The defaults reproduce the British National Grid dataset setup: the EPSG:27700 projection,
//! a 12-color color-blind-friendly palette and the railway track classification names.

use crate::Rgb;
use crate::presenter::{FontWeight, TrackStyle};
use std::collections::HashMap;

/// PROJ.4 definition of the British National Grid (EPSG:27700)
pub const EPSG_27700: &str = "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000 +ellps=airy +datum=OSGB36 +units=m +no_defs";

/// PROJ.4 definition of WGS84 longitude/latitude (EPSG:4326)
pub const EPSG_4326: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Color-blind-friendly track palette
pub const DEFAULT_PALETTE: [Rgb; 12] = [
    Rgb::new(0xE6, 0x9F, 0x00), // Orange
    Rgb::new(0x56, 0xB4, 0xE9), // Sky blue
    Rgb::new(0x00, 0x9E, 0x73), // Bluish green
    Rgb::new(0xF0, 0xE4, 0x42), // Yellow
    Rgb::new(0x00, 0x72, 0xB2), // Blue
    Rgb::new(0xD5, 0x5E, 0x00), // Vermillion
    Rgb::new(0xCC, 0x79, 0xA7), // Reddish purple
    Rgb::new(0x00, 0x00, 0x00), // Black
    Rgb::new(0xFF, 0xB6, 0xC1), // Light pink
    Rgb::new(0xFF, 0xA5, 0x00), // Orange (alternative)
    Rgb::new(0x80, 0x00, 0x80), // Purple
    Rgb::new(0x00, 0xFF, 0xFF), // Cyan
];

/// Railway track classification codes and their names
pub const TRACK_NAMES: &[(i64, &str)] = &[
    (1100, "UP MAIN FAST"),
    (1200, "UP SLOW"),
    (1300, "UP GOODS"),
    (1400, "UP SINGLE"),
    (1500, "UP LOOP"),
    (1600, "UP TERMINAL"),
    (1700, "UP CROSSOVER"),
    (1800, "UP OTHER/ENGINE"),
    (1900, "UP SIDING"),
    (2100, "DOWN MAIN FAST"),
    (2200, "DOWN SLOW"),
    (2300, "DOWN GOODS"),
    (2400, "DOWN SINGLE"),
    (2500, "DOWN LOOP"),
    (2600, "DOWN TERMINAL"),
    (2700, "DOWN CROSSOVER"),
    (2800, "DOWN OTHER/ENGINE"),
    (2900, "DOWN SIDING"),
    (3100, "REVERSIBLE/BI-DIRECTIONAL MAIN FAST"),
    (3200, "REVERSIBLE/BI-DIRECTIONAL SLOW"),
    (3300, "REVERSIBLE/BI-DIRECTIONAL GOODS"),
    (3400, "REVERSIBLE/BI-DIRECTIONAL SINGLE"),
    (3500, "REVERSIBLE/BI-DIRECTIONAL LOOP"),
    (3600, "REVERSIBLE/BI-DIRECTIONAL TERMINAL"),
    (3700, "REVERSIBLE/BI-DIRECTIONAL CROSSOVER"),
    (3800, "REVERSIBLE/BI-DIRECTIONAL OTHER/ENGINE"),
    (3900, "REVERSIBLE/BI-DIRECTIONAL SIDING"),
];

/// Source and target coordinate reference systems, as PROJ.4 strings
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Planar CRS the dataset is recorded in
    pub source: String,
    /// Geographic CRS the map widget expects (longitude/latitude in degrees)
    pub target: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            source: EPSG_27700.to_string(),
            target: EPSG_4326.to_string(),
        }
    }
}

/// Everything the presenter needs besides the dataset itself
#[derive(Debug, Clone)]
pub struct PresenterConfig {
    /// Colors handed out to track identifiers in first-seen order (wraps around)
    pub palette: Vec<Rgb>,
    /// Track classification code -> descriptive name
    pub track_names: HashMap<i64, String>,
    /// Line weight of tracks with an assigned color
    pub track_weight: f32,
    /// Style of features without an assigned color
    pub fallback_style: TrackStyle,
    /// Label fill when the feature has no `color` override
    pub label_fill: Rgb,
    pub label_font_weight: FontWeight,
    /// Label font size in pixels
    pub label_font_size: f32,
    /// Distance in pixels between a line and its label
    pub label_offset: f32,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            track_names: TRACK_NAMES
                .iter()
                .map(|&(id, name)| (id, name.to_string()))
                .collect(),
            track_weight: 4.0,
            fallback_style: TrackStyle {
                color: Rgb::new(0x33, 0x88, 0xFF),
                weight: 3.0,
            },
            label_fill: Rgb::BLACK,
            label_font_weight: FontWeight::Bold,
            label_font_size: 12.0,
            label_offset: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_track_names() {
        let config = PresenterConfig::default();
        assert_eq!(config.track_names.len(), 27);
        assert_eq!(config.track_names[&1100], "UP MAIN FAST");
        assert_eq!(config.track_names[&2900], "DOWN SIDING");
        assert_eq!(
            config.track_names[&3500],
            "REVERSIBLE/BI-DIRECTIONAL LOOP"
        );
        assert!(!config.track_names.contains_key(&9999));
    }

    #[test]
    fn test_default_styles() {
        let config = PresenterConfig::default();
        assert_eq!(config.palette.len(), 12);
        assert_eq!(config.track_weight, 4.0);
        assert_eq!(config.fallback_style.color.to_string(), "#3388FF");
        assert_eq!(config.fallback_style.weight, 3.0);
    }

    #[test]
    fn test_default_projection_is_national_grid_to_wgs84() {
        let config = ProjectionConfig::default();
        assert!(config.source.contains("+proj=tmerc"));
        assert!(config.source.contains("+k=0.9996012717"));
        assert!(config.source.contains("+datum=OSGB36"));
        assert!(config.target.contains("+proj=longlat"));
    }
}
