use crate::draw::RenderPipeline;
use crate::input::events::{PointerEvent, PointerKind};
use crate::stroke::{Point, Stroke, StrokeStore};
use log::{debug, trace};

use super::{CaptureState, IgnoreReason, InputCapture, PointerOutcome};

impl InputCapture {
    /// Feeds one pointer event through the state machine.
    ///
    /// # Arguments
    /// * `event` - Pointer sample in display coordinates
    /// * `store` - Supplies tool settings and receives committed strokes
    /// * `pipeline` - Maps coordinates and paints the live stroke
    ///
    /// # Behavior
    /// - Down while Idle (with an actor): starts a stroke and captures the pointer
    /// - Move while Drawing: appends a sample and paints the newest segment
    /// - Up / Leave / Cancel while Drawing: commits the stroke to the store
    /// - Anything else: [`PointerOutcome::Ignored`]
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        store: &mut StrokeStore,
        pipeline: &mut RenderPipeline,
    ) -> PointerOutcome {
        match event.kind {
            PointerKind::Down => self.on_pointer_down(event, store, pipeline),
            PointerKind::Move => self.on_pointer_move(event, store, pipeline),
            PointerKind::Up | PointerKind::Leave | PointerKind::Cancel => {
                self.on_pointer_release(event, store)
            }
        }
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        store: &StrokeStore,
        pipeline: &mut RenderPipeline,
    ) -> PointerOutcome {
        if self.is_drawing() {
            debug!(
                "Pointer {} down while a stroke is in progress; ignoring",
                event.pointer_id
            );
            return PointerOutcome::Ignored(IgnoreReason::AlreadyDrawing);
        }

        let Some(actor) = &self.actor else {
            trace!("Pointer down without an actor; ignoring");
            return PointerOutcome::Ignored(IgnoreReason::NoActor);
        };

        let (x, y) = pipeline
            .surface()
            .to_surface_point(event.client_x, event.client_y);
        let point = Point::sampled(x, y, event.pressure);
        let tool = store.tool();
        let stroke = Stroke::begin(actor.id.clone(), tool.current_color, tool.current_width, point);

        pipeline.paint_live_dot(&point, stroke.color, stroke.width);

        debug!(
            "Stroke {} started by {} at ({:.1}, {:.1}), width {:.2}",
            stroke.id, actor.id, x, y, stroke.width
        );
        let id = stroke.id.clone();
        self.state = CaptureState::Drawing {
            pointer_id: event.pointer_id,
            stroke,
        };
        PointerOutcome::Started(id)
    }

    fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        store: &StrokeStore,
        pipeline: &mut RenderPipeline,
    ) -> PointerOutcome {
        let CaptureState::Drawing { pointer_id, stroke } = &mut self.state else {
            return PointerOutcome::Ignored(IgnoreReason::NotDrawing);
        };
        if *pointer_id != event.pointer_id {
            trace!(
                "Move from pointer {} while pointer {} is captured",
                event.pointer_id, pointer_id
            );
            return PointerOutcome::Ignored(IgnoreReason::NotCaptured);
        }

        let (x, y) = pipeline
            .surface()
            .to_surface_point(event.client_x, event.client_y);
        stroke.push_point(
            Point::sampled(x, y, event.pressure),
            store.tool().current_width,
        );

        // Only the newest segment is painted; earlier ones are already on the surface.
        let index = stroke.points.len() - 1;
        pipeline.paint_live_segment(&stroke.points, index, stroke.color, stroke.width);

        PointerOutcome::Extended {
            points: stroke.points.len(),
            width: stroke.width,
        }
    }

    fn on_pointer_release(&mut self, event: &PointerEvent, store: &mut StrokeStore) -> PointerOutcome {
        match &self.state {
            CaptureState::Idle => {
                trace!("{:?} with no active stroke; ignoring", event.kind);
                return PointerOutcome::Ignored(IgnoreReason::NotDrawing);
            }
            CaptureState::Drawing { pointer_id, .. } if *pointer_id != event.pointer_id => {
                trace!(
                    "{:?} from pointer {} while pointer {} is captured",
                    event.kind, event.pointer_id, pointer_id
                );
                return PointerOutcome::Ignored(IgnoreReason::NotCaptured);
            }
            CaptureState::Drawing { .. } => {}
        }

        let CaptureState::Drawing { stroke, .. } =
            std::mem::replace(&mut self.state, CaptureState::Idle)
        else {
            return PointerOutcome::Ignored(IgnoreReason::NotDrawing);
        };

        // Cancel commits like Up: partially drawn strokes are still user work.
        debug!(
            "{:?} commits stroke {} with {} points",
            event.kind,
            stroke.id,
            stroke.points.len()
        );
        let id = stroke.id.clone();
        store.add_stroke(stroke);
        PointerOutcome::Committed(id)
    }
}
