//! Track presentation: colors, line styles, labels and viewport bounds
//!
//! Everything here is a pure function of the (reprojected) collection and the injected
//! [`PresenterConfig`], so a [`Presentation`] can be computed once per dataset and reused on
//! every frame.

use crate::bounds::{Bounds, compute_bounds};
use crate::config::PresenterConfig;
use crate::model::{Feature, FeatureCollection};
use crate::reproject::{FeatureError, Reprojector};
use crate::{ColorMap, Rgb};
use geo::LineString;

/// Line style of one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackStyle {
    pub color: Rgb,
    /// Line width in pixels
    pub weight: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Text attributes of a track label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub fill: Rgb,
    pub font_weight: FontWeight,
    /// Font size in pixels
    pub font_size: f32,
    /// Distance in pixels between the line and the label
    pub offset: f32,
    /// Whether the label is centered along the line
    pub center: bool,
}

/// A feature ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedTrack {
    /// Line parts in longitude/latitude, empty when there is nothing to draw
    pub lines: Vec<LineString<f64>>,
    pub style: TrackStyle,
    pub label: String,
    pub label_style: LabelStyle,
}

/// One distinct track identifier with its color and configured name
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub track_id: i64,
    pub color: Rgb,
    /// `None` for identifiers missing from the name table
    pub name: Option<String>,
}

/// Everything derived from one dataset
#[derive(Debug)]
pub struct Presentation {
    /// The reprojected collection
    pub collection: FeatureCollection,
    pub colors: ColorMap,
    /// One entry per color map entry, in the same order
    pub legend: Vec<LegendEntry>,
    /// One entry per feature, in collection order
    pub tracks: Vec<PresentedTrack>,
    /// `None` when the collection has no valid coordinate
    pub bounds: Option<Bounds>,
    /// Features whose geometry could not be reprojected
    pub errors: Vec<FeatureError>,
}

pub struct TrackPresenter {
    config: PresenterConfig,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TrackPresenter {
    pub fn new(config: PresenterConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    /// Assign palette colors to track identifiers in collection order
    pub fn color_map(&self, collection: &FeatureCollection) -> ColorMap {
        ColorMap::build(
            collection.features.iter().map(|f| f.properties.track_id),
            &self.config.palette,
        )
    }

    pub fn style(&self, feature: &Feature, colors: &ColorMap) -> TrackStyle {
        match feature.properties.track_id.and_then(|id| colors.get(id)) {
            Some(color) => TrackStyle {
                color,
                weight: self.config.track_weight,
            },
            None => self.config.fallback_style,
        }
    }

    /// Descriptive name of a track classification code
    pub fn track_name(&self, track_id: Option<i64>) -> Option<&str> {
        track_id
            .and_then(|id| self.config.track_names.get(&id))
            .map(String::as_str)
    }

    /// `"{name}  {id}\n{elr}"`, with empty segments for unknown or missing values
    pub fn label(&self, feature: &Feature) -> String {
        let properties = &feature.properties;
        let name = self.track_name(properties.track_id).unwrap_or_default();
        let id = properties
            .track_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let elr = properties.elr.as_deref().unwrap_or_default();
        format!("{name}  {id}\n{elr}")
    }

    pub fn label_style(&self, feature: &Feature) -> LabelStyle {
        let fill = match feature.properties.color.as_deref().map(Rgb::from_hex) {
            Some(Ok(color)) => color,
            Some(Err(err)) => {
                tracing::debug!("Ignoring label color override: {err}");
                self.config.label_fill
            }
            None => self.config.label_fill,
        };

        LabelStyle {
            fill,
            font_weight: self.config.label_font_weight,
            font_size: self.config.label_font_size,
            offset: self.config.label_offset,
            center: true,
        }
    }

    /// Name every entry of `colors` from the configured name table
    pub fn legend(&self, colors: &ColorMap) -> Vec<LegendEntry> {
        colors
            .iter()
            .map(|(track_id, color)| LegendEntry {
                track_id,
                color,
                name: self.track_name(Some(track_id)).map(str::to_string),
            })
            .collect()
    }

    pub fn bounds(&self, collection: &FeatureCollection) -> Option<Bounds> {
        compute_bounds(collection)
    }

    /// Reproject `source` and derive its presentation
    pub fn present(&self, reprojector: &Reprojector, source: &FeatureCollection) -> Presentation {
        let reprojection = reprojector.reproject_collection(source);
        let mut presentation = self.present_reprojected(reprojection.collection);
        presentation.errors = reprojection.errors;
        presentation
    }

    /// Derive the presentation of an already reprojected collection
    pub fn present_reprojected(&self, collection: FeatureCollection) -> Presentation {
        let colors = self.color_map(&collection);

        let tracks = collection
            .features
            .iter()
            .map(|feature| PresentedTrack {
                lines: track_lines(feature),
                style: self.style(feature, &colors),
                label: self.label(feature),
                label_style: self.label_style(feature),
            })
            .collect();

        let legend = self.legend(&colors);
        let bounds = self.bounds(&collection);
        if bounds.is_none() {
            tracing::warn!("Dataset has no valid coordinates, keeping the default viewport");
        }

        tracing::debug!(
            "Presented {} features with {} distinct tracks",
            collection.len(),
            colors.len()
        );

        Presentation {
            collection,
            colors,
            legend,
            tracks,
            bounds,
            errors: Vec::new(),
        }
    }
}

impl Default for TrackPresenter {
    fn default() -> Self {
        Self::new(PresenterConfig::default())
    }
}

fn track_lines(feature: &Feature) -> Vec<LineString<f64>> {
    let Some(geometry) = &feature.geometry else {
        return Vec::new();
    };
    match geometry.shape() {
        Ok(Some(shape)) => shape.lines().cloned().collect(),
        Ok(None) => Vec::new(),
        Err(err) => {
            tracing::warn!("Not drawing feature with TRACK_ID {:?}: {err}", feature.properties.track_id);
            Vec::new()
        }
    }
}

impl Presentation {
    /// Total number of coordinates that will be drawn
    pub fn drawn_coord_count(&self) -> usize {
        self.tracks
            .iter()
            .flat_map(|t| &t.lines)
            .map(|l| l.0.len())
            .sum()
    }
}
