//! Coordinate reprojection from a planar CRS (British National Grid) to WGS84 longitude/latitude
//!
//! `LineString` and `MultiLineString` geometries are transformed position by position. Every
//! other geometry kind is passed through untransformed and logged, since the datasets only
//! carry line work; a polygon in the input will therefore still be in grid meters afterwards.

use crate::config::ProjectionConfig;
use crate::model::{Feature, FeatureCollection, TrackShape};
use crate::{DataError, Result};
use geo::{Coord, LineString, MultiLineString};
use proj4rs::Proj;
use proj4rs::transform::transform;

/// Pure transform between two PROJ.4 coordinate reference systems
#[derive(Debug, Clone)]
pub struct Reprojector {
    source: Proj,
    target: Proj,
    /// Whether the target expects/produces angles (converted from/to degrees at the edges)
    target_is_latlong: bool,
    source_is_latlong: bool,
}

/// A feature whose geometry could not be reprojected
#[derive(Debug)]
pub struct FeatureError {
    /// Position of the feature in the collection
    pub index: usize,
    pub error: DataError,
}

/// Result of reprojecting a whole collection
#[derive(Debug)]
pub struct Reprojection {
    /// Same features, same order, same properties. Failed features have no geometry.
    pub collection: FeatureCollection,
    pub errors: Vec<FeatureError>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Reprojector {
    pub fn new(config: &ProjectionConfig) -> Result<Self> {
        let source = Proj::from_proj_string(&config.source)
            .map_err(|e| DataError::Projection(format!("source CRS {:?}: {e}", config.source)))?;
        let target = Proj::from_proj_string(&config.target)
            .map_err(|e| DataError::Projection(format!("target CRS {:?}: {e}", config.target)))?;

        Ok(Self {
            source_is_latlong: source.is_latlong(),
            target_is_latlong: target.is_latlong(),
            source,
            target,
        })
    }

    /// EPSG:27700 -> EPSG:4326
    pub fn british_national_grid() -> Result<Self> {
        Self::new(&ProjectionConfig::default())
    }

    /// Transform a single `(x, y)` pair.
    ///
    /// Geographic coordinates are in degrees on both sides. Fails instead of returning
    /// non-finite values.
    #[inline]
    pub fn transform_coord(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        let mut point = if self.source_is_latlong {
            (coord.x.to_radians(), coord.y.to_radians())
        } else {
            (coord.x, coord.y)
        };

        transform(&self.source, &self.target, &mut point)?;

        let (x, y) = if self.target_is_latlong {
            (point.0.to_degrees(), point.1.to_degrees())
        } else {
            point
        };

        if !(x.is_finite() && y.is_finite()) {
            return Err(DataError::Projection(format!(
                "({}, {}) has no finite image",
                coord.x, coord.y
            )));
        }
        Ok(Coord { x, y })
    }

    fn transform_line(&self, line: &LineString<f64>) -> Result<LineString<f64>> {
        line.coords()
            .map(|&c| self.transform_coord(c))
            .collect::<Result<Vec<_>>>()
            .map(LineString::new)
    }

    /// Transform every position of a shape, keeping order and nesting
    pub fn transform_shape(&self, shape: &TrackShape) -> Result<TrackShape> {
        Ok(match shape {
            TrackShape::Line(line) => TrackShape::Line(self.transform_line(line)?),
            TrackShape::MultiLine(lines) => TrackShape::MultiLine(MultiLineString::new(
                lines
                    .iter()
                    .map(|line| self.transform_line(line))
                    .collect::<Result<Vec<_>>>()?,
            )),
        })
    }

    /// Reproject one feature into a new value, failing on malformed coordinates.
    ///
    /// Features without geometry or coordinates, and geometries other than
    /// `LineString`/`MultiLineString`, are returned unchanged.
    pub fn reproject_feature(&self, feature: &Feature) -> Result<Feature> {
        let Some(geometry) = &feature.geometry else {
            return Ok(feature.clone());
        };

        match geometry.shape()? {
            Some(shape) => {
                let projected = self.transform_shape(&shape)?;
                Ok(Feature {
                    geometry: Some(geometry.with_shape(&projected)),
                    ..feature.clone()
                })
            }
            None => {
                if geometry.coordinates.is_some() && !geometry.is_track_kind() {
                    tracing::warn!(
                        "Geometry type {} is not reprojected, passing it through unchanged",
                        geometry.kind
                    );
                }
                Ok(feature.clone())
            }
        }
    }

    /// Reproject a collection into an independent copy.
    ///
    /// A feature that fails keeps its position and properties but loses its geometry, so no
    /// partially transformed or non-finite coordinates reach the output.
    pub fn reproject_collection(&self, collection: &FeatureCollection) -> Reprojection {
        let mut errors = Vec::new();

        let features = collection
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| match self.reproject_feature(feature) {
                Ok(projected) => projected,
                Err(error) => {
                    tracing::warn!(
                        "Feature {index} (TRACK_ID {:?}) dropped its geometry: {error}",
                        feature.properties.track_id
                    );
                    errors.push(FeatureError { index, error });
                    Feature {
                        geometry: None,
                        ..feature.clone()
                    }
                }
            })
            .collect();

        if !errors.is_empty() {
            tracing::warn!(
                "{} of {} features could not be reprojected",
                errors.len(),
                collection.len()
            );
        }

        Reprojection {
            collection: FeatureCollection {
                features,
                ..collection.clone_without_features()
            },
            errors,
        }
    }
}

impl FeatureCollection {
    /// Shallow header copy used when rebuilding the feature list
    fn clone_without_features(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            features: Vec::new(),
            foreign: self.foreign.clone(),
        }
    }
}
