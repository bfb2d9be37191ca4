//! Cairo-based stroke rendering.
//!
//! Both the full repaint and the live (incremental) paint end up here, and
//! both take their geometry from [`super::smoothing`].

use super::color::Color;
use super::smoothing::{self, PathPoint, PathSegment, SmoothPath};
use crate::stroke::{Point, Stroke};

/// Appearance options shared by every paint path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Draw single-point strokes as a filled dot (diameter = stroke width).
    /// When disabled they are not drawn at all.
    pub single_point_dots: bool,
    /// Color painted after clearing; `None` leaves the surface transparent
    pub background: Option<Color>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            single_point_dots: true,
            background: None,
        }
    }
}

/// Clears the entire surface, then fills the background if one is set.
pub fn clear_surface(ctx: &cairo::Context, background: Option<Color>) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    let _ = ctx.restore();

    if let Some(bg) = background {
        ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
        let _ = ctx.paint(); // a failed paint only leaves the surface transparent
    }
}

/// Renders all strokes in order (first stroke = bottom layer).
pub fn render_strokes(ctx: &cairo::Context, strokes: &[Stroke], options: &RenderOptions) {
    for stroke in strokes {
        render_stroke(ctx, stroke, options);
    }
}

/// Renders a single committed stroke with its own color and width.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke, options: &RenderOptions) {
    match smoothing::smooth_path(&stroke.points) {
        Some(path) => render_path(ctx, &path, stroke.color, stroke.width),
        None => {
            if options.single_point_dots {
                if let Some(point) = stroke.points.first() {
                    render_dot(ctx, point, stroke.color, stroke.width);
                }
            }
        }
    }
}

/// Strokes a whole smoothed path with round caps and joins.
pub fn render_path(ctx: &cairo::Context, path: &SmoothPath, color: Color, width: f64) {
    apply_pen(ctx, color, width);

    ctx.move_to(path.start.x, path.start.y);
    let mut cursor = path.start;
    for segment in &path.segments {
        trace_segment(ctx, cursor, segment);
        cursor = segment.end();
    }

    let _ = ctx.stroke();
}

/// Strokes one segment on its own, starting at `from`.
///
/// Used by the live paint, which draws only the newest segment per sample.
pub fn render_segment(
    ctx: &cairo::Context,
    from: PathPoint,
    segment: &PathSegment,
    color: Color,
    width: f64,
) {
    apply_pen(ctx, color, width);
    ctx.move_to(from.x, from.y);
    trace_segment(ctx, from, segment);
    let _ = ctx.stroke();
}

/// Fills a dot of diameter `width` centred on `point`.
pub fn render_dot(ctx: &cairo::Context, point: &Point, color: Color, width: f64) {
    if width <= 0.0 {
        return;
    }
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.new_path();
    ctx.arc(point.x, point.y, width / 2.0, 0.0, std::f64::consts::PI * 2.0);
    let _ = ctx.fill();
}

fn apply_pen(ctx: &cairo::Context, color: Color, width: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
}

fn trace_segment(ctx: &cairo::Context, from: PathPoint, segment: &PathSegment) {
    let [c1, c2, end] = segment.to_cubic(from);
    ctx.curve_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
}
