//! Point, stroke and stroke identifier types.

use crate::draw::Color;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single pointer sample in surface pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in backing-buffer pixels
    pub x: f64,
    /// Vertical position in backing-buffer pixels
    pub y: f64,
    /// Reported pressure (0.0 - 1.0), 1.0 when the device reports none
    #[serde(default = "default_pressure")]
    pub pressure: f64,
}

fn default_pressure() -> f64 {
    1.0
}

impl Point {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }

    /// Builds a point from a device sample, normalising the reported pressure.
    ///
    /// Missing or non-finite pressure becomes 1.0; anything else is clamped
    /// into 0.0 - 1.0.
    pub fn sampled(x: f64, y: f64, reported: Option<f64>) -> Self {
        let pressure = reported
            .filter(|p| p.is_finite())
            .map(|p| p.clamp(0.0, 1.0))
            .unwrap_or(1.0);
        Self { x, y, pressure }
    }
}

/// Pressure used for width computation. Zero-reported pressure counts as 1.0
/// (mice and some pens report 0 while hovering or when unsupported).
pub fn effective_pressure(pressure: f64) -> f64 {
    if pressure > 0.0 && pressure.is_finite() {
        pressure.min(1.0)
    } else {
        1.0
    }
}

/// Live stroke width for a tool base width and a sampled pressure.
pub fn width_for_pressure(base_width: f64, pressure: f64) -> f64 {
    base_width * effective_pressure(pressure)
}

/// Opaque, never-reused stroke identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(String);

impl StrokeId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StrokeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StrokeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One continuous freehand drawing action.
///
/// `points` only grows while the stroke is active. Once the stroke is
/// committed to the store it is replaced wholesale (by id) or not at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub id: StrokeId,
    pub points: Vec<Point>,
    pub color: Color,
    /// Line width in surface pixels
    pub width: f64,
    pub author_id: String,
    /// Creation time, milliseconds since the Unix epoch
    pub created_at_ms: i64,
}

impl Stroke {
    /// Starts a new stroke at `first`, stamping a fresh id and the current time.
    ///
    /// The width is derived from the tool width and the first sample's pressure.
    pub fn begin(author_id: impl Into<String>, color: Color, base_width: f64, first: Point) -> Self {
        Self {
            id: StrokeId::generate(),
            points: vec![first],
            color,
            width: width_for_pressure(base_width, first.pressure),
            author_id: author_id.into(),
            created_at_ms: Utc::now().timestamp_millis(),
        }
    }

    /// Appends a sample and recomputes the width from its pressure.
    pub fn push_point(&mut self, point: Point, base_width: f64) {
        self.points.push(point);
        self.width = width_for_pressure(base_width, point.pressure);
    }

    /// Whether the stroke has enough points to be drawn as a line.
    pub fn is_line(&self) -> bool {
        self.points.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;

    #[test]
    fn sampled_point_defaults_missing_pressure() {
        assert_eq!(Point::sampled(1.0, 2.0, None).pressure, 1.0);
        assert_eq!(Point::sampled(1.0, 2.0, Some(f64::NAN)).pressure, 1.0);
        assert_eq!(Point::sampled(1.0, 2.0, Some(1.7)).pressure, 1.0);
        assert_eq!(Point::sampled(1.0, 2.0, Some(0.25)).pressure, 0.25);
    }

    #[test]
    fn zero_pressure_counts_as_full_width() {
        assert_eq!(width_for_pressure(4.0, 0.0), 4.0);
        assert_eq!(width_for_pressure(4.0, 0.5), 2.0);
        assert_eq!(width_for_pressure(4.0, 1.0), 4.0);
    }

    #[test]
    fn width_tracks_latest_pressure() {
        let mut stroke = Stroke::begin("u1", BLACK, 10.0, Point::new(0.0, 0.0, 0.2));
        assert_eq!(stroke.width, 2.0);
        assert!(!stroke.is_line());

        stroke.push_point(Point::new(5.0, 0.0, 0.8), 10.0);
        assert_eq!(stroke.width, 8.0);
        assert!(stroke.is_line());
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = StrokeId::generate();
        let b = StrokeId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn stroke_json_uses_camel_case_and_hex_color() {
        let stroke = Stroke {
            id: StrokeId::from("s-1"),
            points: vec![Point::new(1.0, 2.0, 0.5)],
            color: BLACK,
            width: 2.5,
            author_id: "u1".into(),
            created_at_ms: 42,
        };
        let json = serde_json::to_string(&stroke).unwrap();
        assert!(json.contains("\"authorId\":\"u1\""));
        assert!(json.contains("\"createdAtMs\":42"));
        assert!(json.contains("\"color\":\"#000000\""));

        let back: Stroke = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stroke);
    }

    #[test]
    fn point_pressure_defaults_when_missing_from_json() {
        let point: Point = serde_json::from_str(r#"{"x": 3, "y": 4}"#).unwrap();
        assert_eq!(point, Point::new(3.0, 4.0, 1.0));
    }
}
