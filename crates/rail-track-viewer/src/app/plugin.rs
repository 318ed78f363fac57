//! Walkers plugin drawing the presented railway tracks on the map
//!
//! Lines are drawn with their per-track style. Labels follow the longest part of each track,
//! rotated along it and kept upright.

use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Pos2, Stroke};
use geo::{BoundingRect, Intersects, LineString, Rect};
use rail_track_lib::{FontWeight, LabelStyle, Presentation, PresentedTrack, Rgb};
use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;
use walkers::{Plugin, Projector};

/// Horizontal shift used to fake a bold face
const BOLD_SHIFT: f32 = 0.6;

/// Plugin for rendering railway tracks on the map
pub struct TrackPlugin {
    presentation: Arc<Presentation>,
    show_labels: bool,
}

impl TrackPlugin {
    pub fn new(presentation: Arc<Presentation>, show_labels: bool) -> Self {
        Self {
            presentation,
            show_labels,
        }
    }

    fn render_track(
        &self,
        track: &PresentedTrack,
        viewport: &Rect<f64>,
        projector: &Projector,
        painter: &egui::Painter,
    ) {
        let stroke = Stroke::new(track.style.weight, color32(track.style.color));
        let mut longest: Option<(f32, Vec<Pos2>)> = None;

        for line in &track.lines {
            if !is_visible(line, viewport) {
                continue;
            }

            let screen_points: Vec<Pos2> = line
                .coords()
                .map(|c| {
                    let screen_vec = projector.project(walkers::lat_lon(c.y, c.x));
                    Pos2::new(screen_vec.x, screen_vec.y)
                })
                .collect();

            if screen_points.len() < 2 {
                continue;
            }
            painter.add(egui::Shape::line(screen_points.clone(), stroke));

            if self.show_labels {
                let length = path_length(&screen_points);
                if longest.as_ref().is_none_or(|(l, _)| length > *l) {
                    longest = Some((length, screen_points));
                }
            }
        }

        if let Some((_, points)) = longest {
            render_label(&track.label, &track.label_style, &points, painter);
        }
    }
}

impl Plugin for TrackPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("TrackPlugin::run");

        let painter = ui.painter();

        let rect = response.rect;
        let top_left = projector.unproject(egui::Vec2::new(rect.min.x, rect.min.y));
        let bottom_right = projector.unproject(egui::Vec2::new(rect.max.x, rect.max.y));
        let viewport = Rect::new(
            geo::Coord {
                x: top_left.x(),
                y: top_left.y(),
            },
            geo::Coord {
                x: bottom_right.x(),
                y: bottom_right.y(),
            },
        );

        for track in &self.presentation.tracks {
            self.render_track(track, &viewport, projector, painter);
        }
    }
}

fn is_visible(line: &LineString<f64>, viewport: &Rect<f64>) -> bool {
    line.bounding_rect()
        .is_some_and(|bbox| bbox.intersects(viewport))
}

fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

fn path_length(points: &[Pos2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Point halfway along `points` and the direction of the segment it lies on.
///
/// The angle is folded into `[-pi/2, pi/2]` so text drawn along it reads left to right.
fn label_anchor(points: &[Pos2]) -> Option<(Pos2, f32)> {
    let half = path_length(points) / 2.0;
    if half <= 0.0 {
        return None;
    }

    let mut walked = 0.0;
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let segment = a.distance(b);
        if segment > 0.0 && walked + segment >= half {
            let t = (half - walked) / segment;
            let mut angle = (b - a).angle();
            if angle > FRAC_PI_2 {
                angle -= PI;
            } else if angle < -FRAC_PI_2 {
                angle += PI;
            }
            return Some((a.lerp(b, t), angle));
        }
        walked += segment;
    }
    None
}

fn render_label(
    text: &str,
    style: &LabelStyle,
    points: &[Pos2],
    painter: &egui::Painter,
) {
    let Some((middle, angle)) = label_anchor(points) else {
        return;
    };

    let galley = painter.layout_no_wrap(
        text.to_string(),
        FontId::proportional(style.font_size),
        color32(style.fill),
    );
    let (sin, cos) = angle.sin_cos();
    let along = egui::vec2(cos, sin);
    let up = egui::vec2(sin, -cos);
    let pos = middle + up * style.offset;
    let anchor = if style.center {
        Align2::CENTER_BOTTOM
    } else {
        Align2::LEFT_BOTTOM
    };

    if style.font_weight == FontWeight::Bold {
        painter.add(
            TextShape::new(pos + along * BOLD_SHIFT, galley.clone(), Color32::PLACEHOLDER)
                .with_angle_and_anchor(angle, anchor),
        );
    }
    painter.add(
        TextShape::new(pos, galley, Color32::PLACEHOLDER).with_angle_and_anchor(angle, anchor),
    );
}
