//! The drawing board: one explicit owner for the store, the render pipeline
//! and the capture state machine.
//!
//! Hosts (a windowing backend, the replay script runner, tests) talk to a
//! [`Board`] only. It routes pointer events into the capture machine, applies
//! tool selection and remote changes to the store, and keeps the surface in
//! sync with the committed strokes after every change.

use crate::config::Config;
use crate::draw::{Color, DisplayRect, RenderOptions, RenderPipeline, RepaintPlan, Surface};
use crate::export::ExportError;
use crate::input::{Actor, InputCapture, PointerEvent, PointerOutcome};
use crate::stroke::{
    StoreError, StoreEvent, Stroke, StrokeStore, SubscriptionId, ToolSettings,
};
use log::{debug, info, warn};

/// A single shared drawing canvas as seen by one participant.
pub struct Board {
    store: StrokeStore,
    pipeline: RenderPipeline,
    capture: InputCapture,
    brush_sizes: Vec<f64>,
    eraser_color: Color,
}

impl Board {
    /// Creates a board from the configuration and paints the (empty) canvas.
    ///
    /// # Arguments
    /// * `config` - Tool defaults, surface geometry and render options
    /// * `actor` - User strokes are attributed to; `None` refuses drawing
    pub fn new(config: &Config, actor: Option<Actor>) -> Self {
        let tool = ToolSettings {
            current_color: config.drawing.default_color.to_color(),
            current_width: config.drawing.default_width,
        };
        let options = RenderOptions {
            single_point_dots: config.render.single_point_dots,
            background: config.surface.background.as_ref().map(|bg| bg.to_color()),
        };
        let surface = Surface::with_layout(
            DisplayRect::sized(config.surface.width, config.surface.height),
            config.surface.device_pixel_ratio,
        );
        let (width, height) = surface.backing_size();
        info!(
            "Board created: {}x{} backing buffer, actor {}",
            width,
            height,
            actor.as_ref().map_or("<none>", |a| a.id.as_str())
        );

        let store = StrokeStore::with_tool(tool);
        let mut pipeline = RenderPipeline::new(surface, options);
        pipeline.full_repaint(&store);

        Self {
            store,
            pipeline,
            capture: InputCapture::new(actor),
            brush_sizes: config.drawing.brush_sizes.clone(),
            eraser_color: config.drawing.eraser_color.to_color(),
        }
    }

    /// Feeds one pointer event to the capture machine.
    ///
    /// A committed stroke is painted into the surface before this returns.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> PointerOutcome {
        let outcome = self
            .capture
            .handle(event, &mut self.store, &mut self.pipeline);
        if matches!(outcome, PointerOutcome::Committed(_)) {
            self.sync();
        }
        outcome
    }

    /// Sets (or clears) the user new strokes are attributed to.
    pub fn set_actor(&mut self, actor: Option<Actor>) {
        self.capture.set_actor(actor);
    }

    pub fn set_color(&mut self, color: Color) {
        debug!("Tool color set to {}", color);
        self.store.set_current_color(color);
    }

    pub fn set_width(&mut self, width: f64) {
        self.store.set_current_width(width);
    }

    /// Selects brush size preset `index`. Returns `false` for an unknown index.
    pub fn select_brush_size(&mut self, index: usize) -> bool {
        match self.brush_sizes.get(index) {
            Some(&size) => {
                debug!("Brush size preset {} selected ({}px)", index, size);
                self.store.set_current_width(size);
                true
            }
            None => {
                warn!(
                    "Brush size preset {} out of range ({} presets)",
                    index,
                    self.brush_sizes.len()
                );
                false
            }
        }
    }

    /// Switches to the eraser: the current color becomes the eraser color.
    pub fn select_eraser(&mut self) {
        debug!("Eraser selected");
        self.store.set_current_color(self.eraser_color);
    }

    pub fn brush_sizes(&self) -> &[f64] {
        &self.brush_sizes
    }

    /// Removes every committed stroke and repaints.
    pub fn clear_canvas(&mut self) {
        info!("Clearing canvas ({} strokes)", self.store.len());
        self.store.clear_canvas();
        self.sync();
    }

    /// Replaces a committed stroke by id and repaints.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when no stroke has that id and
    /// [`StoreError::EmptyStroke`] when the replacement has no points; nothing
    /// changes in either case.
    pub fn update_stroke(&mut self, stroke: Stroke) -> Result<(), StoreError> {
        if let Err(err) = self.store.update_stroke(stroke) {
            warn!("Stroke update rejected: {err}");
            return Err(err);
        }
        self.sync();
        Ok(())
    }

    /// Adds a stroke received from another participant and paints it.
    ///
    /// Returns its sequence number, or `None` if it was rejected.
    pub fn apply_remote_stroke(&mut self, stroke: Stroke) -> Option<u64> {
        let seq = self.store.add_remote_stroke(stroke)?;
        self.sync();
        Some(seq)
    }

    /// Resizes the surface for a new layout and repaints everything.
    pub fn resize(&mut self, layout: DisplayRect) {
        self.pipeline.resize(layout, &self.store);
    }

    /// Resizes with an explicit backing buffer size (host-chosen pixel density).
    pub fn resize_backing(&mut self, layout: DisplayRect, width: i32, height: i32) {
        self.pipeline
            .resize_backing(layout, width, height, &self.store);
    }

    /// Brings the surface up to date with the store.
    pub fn sync(&mut self) -> RepaintPlan {
        self.pipeline.sync(&self.store)
    }

    /// Encodes the current surface pixels as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        self.pipeline.export_png()
    }

    /// Registers a store change listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent<'_>) + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut RenderPipeline {
        &mut self.pipeline
    }

    pub fn capture(&self) -> &InputCapture {
        &self.capture
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_drawing()
    }

    /// Releases the surface. The store survives; later paints are no-ops.
    pub fn teardown(&mut self) {
        info!("Tearing down board");
        self.pipeline.detach();
    }
}
