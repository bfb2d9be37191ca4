//! Midpoint curve smoothing for freehand strokes.
//!
//! Sampled points are joined by curves whose joints sit on the midpoints
//! between consecutive samples. The first segment is a quadratic curve from
//! the first sample to the first midpoint; every later segment is a cubic
//! curve from the previous midpoint to the next one, with its control points
//! anchored at the previous midpoint and the sample between them.
//!
//! Segment `i` depends only on samples `i-2..=i`, so a live stroke can paint
//! its newest segment without recomputing the rest of the path. The full
//! repaint and the live paint both go through [`segment_at`], which keeps the
//! two renderings identical.

use crate::stroke::Point;

/// A position on the smoothed path, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn lerp(self, other: PathPoint, t: f64) -> PathPoint {
        PathPoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl From<Point> for PathPoint {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<&Point> for PathPoint {
    fn from(point: &Point) -> Self {
        Self::from(*point)
    }
}

/// One drawing command of a smoothed path. The segment starts wherever the
/// previous one ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Quadratic Bézier curve (only used for the first segment)
    Quadratic { control: PathPoint, to: PathPoint },
    /// Cubic Bézier curve
    Cubic {
        control1: PathPoint,
        control2: PathPoint,
        to: PathPoint,
    },
}

impl PathSegment {
    /// End point of the segment (a midpoint between two samples).
    pub fn end(&self) -> PathPoint {
        match self {
            PathSegment::Quadratic { to, .. } | PathSegment::Cubic { to, .. } => *to,
        }
    }

    /// Returns the cubic control points `[c1, c2, end]` describing this segment.
    ///
    /// Cairo only knows cubic curves, so quadratic segments are elevated:
    /// `c1 = from + 2/3 (q - from)` and `c2 = to + 2/3 (q - to)`.
    pub fn to_cubic(&self, from: PathPoint) -> [PathPoint; 3] {
        match *self {
            PathSegment::Quadratic { control, to } => [
                from.lerp(control, 2.0 / 3.0),
                to.lerp(control, 2.0 / 3.0),
                to,
            ],
            PathSegment::Cubic {
                control1,
                control2,
                to,
            } => [control1, control2, to],
        }
    }
}

/// A full smoothed path: a start point followed by a chain of segments.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothPath {
    pub start: PathPoint,
    pub segments: Vec<PathSegment>,
}

/// Midpoint between two samples.
pub fn midpoint(a: &Point, b: &Point) -> PathPoint {
    PathPoint {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

/// Builds segment `index` (1-based, `1 <= index < points.len()`).
///
/// Returns the point the segment starts from together with the segment, or
/// `None` when `index` is out of range.
pub fn segment_at(points: &[Point], index: usize) -> Option<(PathPoint, PathSegment)> {
    if index == 0 || index >= points.len() {
        return None;
    }

    let p0 = &points[index - 1];
    let p1 = &points[index];
    let mid = midpoint(p0, p1);

    if index == 1 {
        return Some((
            PathPoint::from(p0),
            PathSegment::Quadratic {
                control: PathPoint::from(p0),
                to: mid,
            },
        ));
    }

    let prev_mid = midpoint(&points[index - 2], p0);
    Some((
        prev_mid,
        PathSegment::Cubic {
            control1: prev_mid,
            control2: PathPoint::from(p0),
            to: mid,
        },
    ))
}

/// Smooths a whole stroke. Fewer than two points produce no path.
pub fn smooth_path(points: &[Point]) -> Option<SmoothPath> {
    if points.len() < 2 {
        return None;
    }

    let segments = (1..points.len())
        .filter_map(|index| segment_at(points, index).map(|(_, segment)| segment))
        .collect();

    Some(SmoothPath {
        start: PathPoint::from(&points[0]),
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y, 1.0)
    }

    #[test]
    fn fewer_than_two_points_yield_nothing() {
        assert!(smooth_path(&[]).is_none());
        assert!(smooth_path(&[pt(3.0, 4.0)]).is_none());
        assert!(segment_at(&[pt(3.0, 4.0)], 1).is_none());
    }

    #[test]
    fn first_segment_is_quadratic_to_midpoint() {
        let points = [pt(0.0, 0.0), pt(10.0, 20.0)];
        let path = smooth_path(&points).unwrap();
        assert_eq!(path.start, PathPoint::new(0.0, 0.0));
        assert_eq!(
            path.segments,
            vec![PathSegment::Quadratic {
                control: PathPoint::new(0.0, 0.0),
                to: PathPoint::new(5.0, 10.0),
            }]
        );
    }

    #[test]
    fn later_segments_are_cubic_between_midpoints() {
        let points = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
        let path = smooth_path(&points).unwrap();
        assert_eq!(path.segments.len(), 3);
        assert_eq!(
            path.segments[1],
            PathSegment::Cubic {
                control1: PathPoint::new(5.0, 0.0),
                control2: PathPoint::new(10.0, 0.0),
                to: PathPoint::new(10.0, 5.0),
            }
        );
        assert_eq!(
            path.segments[2],
            PathSegment::Cubic {
                control1: PathPoint::new(10.0, 5.0),
                control2: PathPoint::new(10.0, 10.0),
                to: PathPoint::new(5.0, 10.0),
            }
        );
    }

    #[test]
    fn segments_chain_end_to_start() {
        let points: Vec<Point> = (0..8)
            .map(|i| pt(i as f64 * 3.0, ((i * i) % 7) as f64))
            .collect();
        let path = smooth_path(&points).unwrap();
        let mut cursor = path.start;
        for index in 1..points.len() {
            let (from, segment) = segment_at(&points, index).unwrap();
            assert_eq!(from, cursor, "segment {index} must start where the last ended");
            assert_eq!(segment, path.segments[index - 1]);
            cursor = segment.end();
        }
    }

    #[test]
    fn quadratic_elevation_keeps_endpoints() {
        let segment = PathSegment::Quadratic {
            control: PathPoint::new(0.0, 0.0),
            to: PathPoint::new(6.0, 0.0),
        };
        let [c1, c2, end] = segment.to_cubic(PathPoint::new(0.0, 0.0));
        assert_eq!(c1, PathPoint::new(0.0, 0.0));
        assert!((c2.x - 2.0).abs() < 1e-12 && c2.y.abs() < 1e-12);
        assert_eq!(end, PathPoint::new(6.0, 0.0));
    }
}
