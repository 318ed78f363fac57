//! Rail Track Library - Reprojection and Presentation of Railway Track Datasets
//!
//! This library loads GeoJSON-shaped railway track datasets recorded on the British National
//! Grid (EPSG:27700), reprojects them to WGS84 longitude/latitude (EPSG:4326) and derives
//! everything a map widget needs to draw them: a stable color per track identifier, a line
//! style and a label per feature, and the bounds used to fit the initial viewport.
//!
//! # Architecture
//!
//! - **[`FeatureCollection`]**: Immutable GeoJSON model of the loaded dataset
//! - **[`Reprojector`]**: Pure EPSG:27700 → EPSG:4326 coordinate transform over whole collections
//! - **[`TrackPresenter`]**: Color map, per-feature style/label and viewport bounds
//! - **[`Presentation`]**: Everything derived from one dataset, computed once and reused
//!
//! # Performance Characteristics
//!
//! - **Reprojection**: O(C) where C = total coordinate count
//! - **Color map**: O(F) where F = feature count
//! - **Bounds**: O(C)

mod bounds;
mod color;
pub mod config;
mod model;
mod presenter;
mod reproject;

// Public API exports
pub use bounds::{Bounds, compute_bounds};
pub use color::{ColorMap, Rgb};
pub use config::{PresenterConfig, ProjectionConfig};
pub use model::{Feature, FeatureCollection, Geometry, TrackProperties, TrackShape};
pub use presenter::{
    FontWeight, LabelStyle, LegendEntry, Presentation, PresentedTrack, TrackPresenter, TrackStyle,
};
pub use reproject::{FeatureError, Reprojection, Reprojector};

/// Error types for the data module
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed position at {path}: {reason}")]
    MalformedPosition { path: String, reason: String },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<proj4rs::errors::Error> for DataError {
    fn from(err: proj4rs::errors::Error) -> Self {
        DataError::Projection(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn(PresenterConfig) -> TrackPresenter = TrackPresenter::new;
        let _: fn() -> PresenterConfig = PresenterConfig::default;
        let _: fn() -> ProjectionConfig = ProjectionConfig::default;
    }

    #[test]
    fn test_error_messages() {
        let err = DataError::MalformedPosition {
            path: "features[0].geometry.coordinates[1]".to_string(),
            reason: "expected 2 or 3 numbers, found 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed position at features[0].geometry.coordinates[1]: expected 2 or 3 numbers, found 1"
        );
    }
}
