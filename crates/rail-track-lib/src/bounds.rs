//! Viewport bounds of a reprojected collection

use crate::model::{FeatureCollection, parse_position};
use geo::{Coord, Rect};
use serde_json::Value;

/// Minimal longitude/latitude rectangle enclosing a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds(Rect<f64>);

impl Bounds {
    pub fn from_coords(coords: impl IntoIterator<Item = Coord<f64>>) -> Option<Self> {
        let mut coords = coords.into_iter().filter(|c| c.x.is_finite() && c.y.is_finite());
        let first = coords.next()?;
        let (min, max) = coords.fold((first, first), |(min, max), c| {
            (
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        });
        Some(Self(Rect::new(min, max)))
    }

    #[inline]
    pub fn rect(&self) -> Rect<f64> {
        self.0
    }

    #[inline]
    pub fn west(&self) -> f64 {
        self.0.min().x
    }

    #[inline]
    pub fn south(&self) -> f64 {
        self.0.min().y
    }

    #[inline]
    pub fn east(&self) -> f64 {
        self.0.max().x
    }

    #[inline]
    pub fn north(&self) -> f64 {
        self.0.max().y
    }

    /// Center as (longitude, latitude)
    #[inline]
    pub fn center(&self) -> Coord<f64> {
        self.0.center()
    }

    /// Largest of the longitude and latitude spans, in degrees
    pub fn max_span(&self) -> f64 {
        self.0.width().max(self.0.height())
    }
}

/// Bounds over every coordinate of every feature, or `None` if there is no valid coordinate.
///
/// All geometry kinds contribute, including ones the reprojector passes through. Positions that
/// do not parse are skipped.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compute_bounds(collection: &FeatureCollection) -> Option<Bounds> {
    let mut coords = Vec::new();
    for geometry in collection.features.iter().filter_map(|f| f.geometry.as_ref()) {
        if let Some(coordinates) = &geometry.coordinates {
            collect_positions(coordinates, &mut coords);
        }
    }
    Bounds::from_coords(coords)
}

/// Walk arbitrarily nested coordinate arrays down to the positions
fn collect_positions(value: &Value, out: &mut Vec<Coord<f64>>) {
    let Some(items) = value.as_array() else {
        return;
    };

    if items.first().is_some_and(Value::is_number) {
        if let Ok(coord) = parse_position(value, "coordinates") {
            out.push(coord);
        }
    } else {
        for item in items {
            collect_positions(item, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Feature, Geometry, TrackProperties};
    use serde_json::json;

    fn feature(geometry: Value) -> Feature {
        let geometry: Geometry = serde_json::from_value(geometry).unwrap();
        Feature::new(Some(geometry), TrackProperties::default())
    }

    #[test]
    fn test_empty_collection_has_no_bounds() {
        assert_eq!(compute_bounds(&FeatureCollection::new(Vec::new())), None);
    }

    #[test]
    fn test_no_valid_coordinates_has_no_bounds() {
        let collection = FeatureCollection::new(vec![
            Feature::new(None, TrackProperties::default()),
            feature(json!({ "type": "LineString" })),
            feature(json!({ "type": "LineString", "coordinates": [] })),
            feature(json!({ "type": "LineString", "coordinates": [[1]] })),
        ]);
        assert_eq!(compute_bounds(&collection), None);
    }

    #[test]
    fn test_bounds_cover_all_geometries() {
        let collection = FeatureCollection::new(vec![
            feature(json!({ "type": "LineString", "coordinates": [[-0.2, 51.4], [-0.1, 51.5]] })),
            feature(json!({ "type": "MultiLineString", "coordinates": [[[-0.3, 51.45]], [[0.05, 51.6]]] })),
            feature(json!({ "type": "Point", "coordinates": [0.1, 51.3] })),
        ]);

        let bounds = compute_bounds(&collection).unwrap();
        assert_eq!(bounds.west(), -0.3);
        assert_eq!(bounds.east(), 0.1);
        assert_eq!(bounds.south(), 51.3);
        assert_eq!(bounds.north(), 51.6);
        assert!((bounds.center().x - -0.1).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_bounds_are_degenerate_but_valid() {
        let bounds = Bounds::from_coords([Coord { x: 1.0, y: 2.0 }]).unwrap();
        assert_eq!(bounds.max_span(), 0.0);
        assert_eq!(bounds.center(), Coord { x: 1.0, y: 2.0 });
    }

    #[test]
    fn test_non_finite_coordinates_are_ignored() {
        let bounds = Bounds::from_coords([
            Coord { x: f64::NAN, y: 0.0 },
            Coord { x: 3.0, y: 4.0 },
            Coord {
                x: f64::INFINITY,
                y: 9.0,
            },
        ])
        .unwrap();
        assert_eq!(bounds.rect(), Rect::new(Coord { x: 3.0, y: 4.0 }, Coord { x: 3.0, y: 4.0 }));
    }
}
