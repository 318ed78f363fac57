//! GeoJSON dataset model
//!
//! The model keeps unknown members verbatim so that a collection can be reprojected and written
//! back without losing anything. Only the members the presenter consumes are typed.

use crate::{DataError, Result};
use geo::{Coord, LineString, MultiLineString};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

/// An ordered, read-only collection of track features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection_kind")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Foreign members (`name`, `crs`, `bbox`, ...)
    #[serde(flatten)]
    pub foreign: Map<String, Value>,
}

/// One track segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "properties_from_value")]
    pub properties: TrackProperties,
    #[serde(flatten)]
    pub foreign: Map<String, Value>,
}

/// Properties of a track feature
///
/// Decoding never fails on property values: a `TRACK_ID` that is not an integer is treated as
/// absent and kept verbatim in `other`, and any scalar `ELR` is read as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct TrackProperties {
    /// Track classification code
    #[serde(rename = "TRACK_ID", skip_serializing_if = "Option::is_none")]
    pub track_id: Option<i64>,
    /// Engineer's Line Reference
    #[serde(rename = "ELR", skip_serializing_if = "Option::is_none")]
    pub elr: Option<String>,
    /// Label fill override (`#RRGGBB`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A GeoJSON geometry with its coordinates kept as raw JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Empty when the input omits `type`, which makes the geometry pass through untouched
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Value>,
    #[serde(flatten)]
    pub foreign: Map<String, Value>,
}

/// Typed view of the geometry kinds tracks are drawn from
#[derive(Debug, Clone, PartialEq)]
pub enum TrackShape {
    Line(LineString<f64>),
    MultiLine(MultiLineString<f64>),
}

fn feature_collection_kind() -> String {
    "FeatureCollection".to_string()
}

fn feature_kind() -> String {
    "Feature".to_string()
}

/// `null`, a missing member or a non-object all decode as empty properties
fn properties_from_value<'de, D>(deserializer: D) -> std::result::Result<TrackProperties, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => TrackProperties::from(map),
        None | Some(Value::Null) => TrackProperties::default(),
        Some(other) => {
            tracing::warn!("Ignoring non-object feature properties: {other}");
            TrackProperties::default()
        }
    })
}

/// Accepts integers, integral floats (shapefile exports) and numeric strings.
///
/// `Ok(None)` means no identifier; `Err` carries the reason the value was rejected.
fn track_id_from_value(value: &Value) -> std::result::Result<Option<i64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                let in_range = i64::MIN as f64..i64::MAX as f64;
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && in_range.contains(f))
                    .map(|f| f as i64)
            })
            .map(Some)
            .ok_or_else(|| format!("{n} is not an integer")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| format!("{s:?} is not an integer")),
        other => Err(format!("expected a number, got {other}")),
    }
}

/// Scalars are read as text, anything else is left in the raw properties
fn elr_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl From<Map<String, Value>> for TrackProperties {
    fn from(mut other: Map<String, Value>) -> Self {
        let track_id = match other.get("TRACK_ID").map(track_id_from_value) {
            Some(Ok(track_id)) => {
                other.remove("TRACK_ID");
                track_id
            }
            Some(Err(reason)) => {
                tracing::warn!("Ignoring TRACK_ID: {reason}");
                None
            }
            None => None,
        };

        let elr = other.get("ELR").and_then(elr_from_value);
        if elr.is_some() {
            other.remove("ELR");
        }

        let color = match other.get("color") {
            Some(Value::String(color)) => Some(color.clone()),
            _ => None,
        };
        if color.is_some() {
            other.remove("color");
        }

        Self {
            track_id,
            elr,
            color,
            other,
        }
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl FeatureCollection {
    /// Load a collection from a GeoJSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let collection = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::info!(
            "Loaded {} features from {}",
            collection.features.len(),
            path.display()
        );
        Ok(collection)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: feature_collection_kind(),
            features,
            foreign: Map::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Feature {
    pub fn new(geometry: Option<Geometry>, properties: TrackProperties) -> Self {
        Self {
            kind: feature_kind(),
            geometry,
            properties,
            foreign: Map::new(),
        }
    }
}

impl TrackProperties {
    pub fn new(track_id: Option<i64>, elr: Option<&str>) -> Self {
        Self {
            track_id,
            elr: elr.map(str::to_string),
            ..Default::default()
        }
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Geometry {
    pub const LINE_STRING: &'static str = "LineString";
    pub const MULTI_LINE_STRING: &'static str = "MultiLineString";

    /// Build a geometry from a typed shape
    pub fn from_shape(shape: &TrackShape) -> Self {
        let (kind, coordinates) = match shape {
            TrackShape::Line(line) => (Self::LINE_STRING, line_to_value(line)),
            TrackShape::MultiLine(lines) => (
                Self::MULTI_LINE_STRING,
                Value::Array(lines.iter().map(line_to_value).collect()),
            ),
        };
        Self {
            kind: kind.to_string(),
            coordinates: Some(coordinates),
            foreign: Map::new(),
        }
    }

    /// Replace the coordinates with those of `shape`, keeping foreign members
    pub fn with_shape(&self, shape: &TrackShape) -> Self {
        Self {
            foreign: self.foreign.clone(),
            ..Self::from_shape(shape)
        }
    }

    #[inline]
    pub fn is_track_kind(&self) -> bool {
        self.kind == Self::LINE_STRING || self.kind == Self::MULTI_LINE_STRING
    }

    /// Parse the coordinates of a `LineString` or `MultiLineString`.
    ///
    /// Returns `Ok(None)` for other geometry kinds and for geometries without coordinates.
    /// Positions must hold two or three finite numbers, a third (elevation) is dropped.
    pub fn shape(&self) -> Result<Option<TrackShape>> {
        let Some(coordinates) = &self.coordinates else {
            return Ok(None);
        };

        match self.kind.as_str() {
            Self::LINE_STRING => {
                parse_line(coordinates, "coordinates").map(|line| Some(TrackShape::Line(line)))
            }
            Self::MULTI_LINE_STRING => {
                let parts = as_array(coordinates, "coordinates")?
                    .iter()
                    .enumerate()
                    .map(|(i, part)| parse_line(part, &format!("coordinates[{i}]")))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Some(TrackShape::MultiLine(MultiLineString::new(parts))))
            }
            _ => Ok(None),
        }
    }
}

impl TrackShape {
    /// Iterate over the line parts (one for a `Line`)
    pub fn lines(&self) -> impl Iterator<Item = &LineString<f64>> {
        let lines: &[LineString<f64>] = match self {
            TrackShape::Line(line) => std::slice::from_ref(line),
            TrackShape::MultiLine(lines) => &lines.0,
        };
        lines.iter()
    }

    pub fn coord_count(&self) -> usize {
        self.lines().map(|line| line.0.len()).sum()
    }
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| {
        DataError::InvalidGeometry(format!("{path} must be an array, got {value}"))
    })
}

fn parse_line(value: &Value, path: &str) -> Result<LineString<f64>> {
    as_array(value, path)?
        .iter()
        .enumerate()
        .map(|(i, position)| parse_position(position, &format!("{path}[{i}]")))
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

/// Validate and parse one `[x, y]` or `[x, y, z]` position
pub(crate) fn parse_position(value: &Value, path: &str) -> Result<Coord<f64>> {
    let malformed = |reason: String| DataError::MalformedPosition {
        path: path.to_string(),
        reason,
    };

    let numbers = value
        .as_array()
        .ok_or_else(|| malformed(format!("expected an array, got {value}")))?;

    if !(2..=3).contains(&numbers.len()) {
        return Err(malformed(format!(
            "expected 2 or 3 numbers, found {}",
            numbers.len()
        )));
    }

    let number = |i: usize| {
        numbers[i]
            .as_f64()
            .filter(|n| n.is_finite())
            .ok_or_else(|| malformed(format!("non-numeric value {}", numbers[i])))
    };

    Ok(Coord {
        x: number(0)?,
        y: number(1)?,
    })
}

fn line_to_value(line: &LineString<f64>) -> Value {
    Value::Array(
        line.coords()
            .map(|c| Value::Array(vec![Value::from(c.x), Value::from(c.y)]))
            .collect(),
    )
}
