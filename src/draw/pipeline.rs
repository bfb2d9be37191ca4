//! Render pipeline: keeps the surface in sync with the committed strokes.
//!
//! Committed strokes are always painted from the model. The in-progress stroke
//! is painted segment by segment while it is being drawn and is never part of
//! a full repaint; once a live segment has been painted the next sync repaints
//! everything so the committed rendering replaces the live one.

use super::color::Color;
use super::dirty::{DirtyTracker, RepaintPlan};
use super::render::{self, RenderOptions};
use super::smoothing;
use super::surface::{DisplayRect, Surface};
use crate::export::ExportError;
use crate::stroke::{Point, StrokeStore};
use log::{debug, trace};

/// Owns the surface and decides between full and incremental repaints.
pub struct RenderPipeline {
    surface: Surface,
    dirty: DirtyTracker,
    options: RenderOptions,
}

impl RenderPipeline {
    pub fn new(surface: Surface, options: RenderOptions) -> Self {
        Self {
            surface,
            dirty: DirtyTracker::new(),
            options,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Resizes the backing buffer and repaints every committed stroke.
    ///
    /// Resizing discards the buffer's pixels, so the repaint is unconditional.
    /// A stroke being drawn during the resize disappears until it is committed.
    pub fn resize(&mut self, layout: DisplayRect, store: &StrokeStore) {
        self.surface.resize(layout);
        self.full_repaint(store);
    }

    /// Same as [`RenderPipeline::resize`] with an explicit backing size.
    pub fn resize_backing(&mut self, layout: DisplayRect, width: i32, height: i32, store: &StrokeStore) {
        self.surface.resize_backing(layout, width, height);
        self.full_repaint(store);
    }

    /// Clears the surface and paints all committed strokes in store order.
    pub fn full_repaint(&mut self, store: &StrokeStore) {
        let options = self.options;
        let painted = self.surface.with_context(|ctx| {
            render::clear_surface(ctx, options.background);
            render::render_strokes(ctx, store.strokes(), &options);
        });

        if painted {
            trace!("Full repaint of {} strokes", store.len());
            self.dirty.record_full(store.len(), store.generation());
        } else {
            self.dirty.mark_full();
        }
    }

    /// Brings the surface up to date with `store`, painting as little as possible.
    ///
    /// The result is pixel-identical to [`RenderPipeline::full_repaint`].
    pub fn sync(&mut self, store: &StrokeStore) -> RepaintPlan {
        let plan = self.dirty.plan(store.len(), store.generation());
        match plan {
            RepaintPlan::Full => self.full_repaint(store),
            RepaintPlan::Append { from } => {
                let options = self.options;
                let painted = self.surface.with_context(|ctx| {
                    render::render_strokes(ctx, &store.strokes()[from..], &options);
                });
                if painted {
                    debug!("Painted {} appended strokes", store.len() - from);
                    self.dirty.record_appended(store.len());
                } else {
                    self.dirty.mark_full();
                }
            }
            RepaintPlan::Clean => {}
        }
        plan
    }

    /// Paints segment `index` of an in-progress stroke.
    pub fn paint_live_segment(&mut self, points: &[Point], index: usize, color: Color, width: f64) {
        let Some((from, segment)) = smoothing::segment_at(points, index) else {
            return;
        };
        if self
            .surface
            .with_context(|ctx| render::render_segment(ctx, from, &segment, color, width))
        {
            self.dirty.mark_full();
        }
    }

    /// Paints the first sample of an in-progress stroke as a dot, when enabled.
    pub fn paint_live_dot(&mut self, point: &Point, color: Color, width: f64) {
        if !self.options.single_point_dots {
            return;
        }
        if self
            .surface
            .with_context(|ctx| render::render_dot(ctx, point, color, width))
        {
            self.dirty.mark_full();
        }
    }

    /// Encodes the current pixels as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        self.surface.encode_png()
    }

    /// Releases the backing buffer; later paints are no-ops.
    pub fn detach(&mut self) {
        self.surface.detach();
        self.dirty.mark_full();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED};
    use crate::stroke::{Stroke, StrokeId};

    fn pipeline(width: f64, height: f64) -> RenderPipeline {
        RenderPipeline::new(
            Surface::with_layout(DisplayRect::sized(width, height), 1.0),
            RenderOptions::default(),
        )
    }

    fn line(id: &str, color: Color, y: f64) -> Stroke {
        Stroke {
            id: StrokeId::from(id),
            points: vec![
                Point::new(2.0, y, 1.0),
                Point::new(20.0, y, 1.0),
                Point::new(38.0, y, 1.0),
            ],
            color,
            width: 6.0,
            author_id: "u".into(),
            created_at_ms: 0,
        }
    }

    #[test]
    fn append_only_changes_paint_incrementally() {
        let mut store = StrokeStore::new();
        let mut pipeline = pipeline(40.0, 40.0);
        assert_eq!(pipeline.sync(&store), RepaintPlan::Full);

        store.add_stroke(line("a", BLACK, 10.0));
        assert_eq!(pipeline.sync(&store), RepaintPlan::Append { from: 0 });
        assert_eq!(pipeline.sync(&store), RepaintPlan::Clean);

        store.clear_canvas();
        assert_eq!(pipeline.sync(&store), RepaintPlan::Full);
    }

    #[test]
    fn incremental_result_matches_full_repaint() {
        let mut store = StrokeStore::new();
        let mut incremental = pipeline(40.0, 40.0);
        incremental.sync(&store);
        for (i, color) in [BLACK, RED, BLACK].into_iter().enumerate() {
            store.add_stroke(line(&format!("s{i}"), color, 10.0 + i as f64 * 4.0));
            incremental.sync(&store);
        }

        let mut full = pipeline(40.0, 40.0);
        full.full_repaint(&store);

        assert_eq!(
            incremental.surface_mut().snapshot(),
            full.surface_mut().snapshot()
        );
    }

    #[test]
    fn live_paint_forces_next_sync_to_be_full() {
        let store = StrokeStore::new();
        let mut pipeline = pipeline(40.0, 40.0);
        pipeline.sync(&store);

        let points = [Point::new(5.0, 5.0, 1.0), Point::new(30.0, 30.0, 1.0)];
        pipeline.paint_live_segment(&points, 1, RED, 4.0);
        assert_eq!(pipeline.sync(&store), RepaintPlan::Full);
        assert!(
            pipeline
                .surface_mut()
                .snapshot()
                .unwrap()
                .iter()
                .all(|b| *b == 0)
        );
    }

    #[test]
    fn detached_pipeline_ignores_paints() {
        let mut store = StrokeStore::new();
        store.add_stroke(line("a", BLACK, 10.0));
        let mut pipeline = pipeline(40.0, 40.0);
        pipeline.detach();

        pipeline.full_repaint(&store);
        pipeline.paint_live_dot(&Point::new(1.0, 1.0, 1.0), BLACK, 3.0);
        assert!(matches!(
            pipeline.export_png(),
            Err(ExportError::SurfaceUnavailable)
        ));
    }
}
