//! Capture state machine types.

use crate::input::identity::Actor;
use crate::stroke::{Stroke, StrokeId};

/// Current capture state.
///
/// `Idle` until an authorised pointer-down starts a stroke, `Drawing` until
/// the owning pointer is released, leaves or is cancelled.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    /// Not drawing - waiting for a pointer-down
    Idle,
    /// A stroke is in progress
    Drawing {
        /// Pointer that owns the stroke (pointer capture)
        pointer_id: i32,
        /// The in-progress stroke; moved into the store on release
        stroke: Stroke,
    },
}

/// Why an event was ignored. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Pointer-down without an authenticated actor
    NoActor,
    /// Pointer-down while a stroke is already in progress
    AlreadyDrawing,
    /// Move/release without an active stroke
    NotDrawing,
    /// Event from a pointer other than the one that owns the stroke
    NotCaptured,
}

/// Result of feeding one pointer event to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// Idle → Drawing: a stroke was started
    Started(StrokeId),
    /// Drawing → Drawing: a sample was appended
    Extended {
        /// Number of points in the stroke after the append
        points: usize,
        /// Live width after the append
        width: f64,
    },
    /// Drawing → Idle: the stroke was committed to the store
    Committed(StrokeId),
    /// Event had no effect
    Ignored(IgnoreReason),
}

/// Input capture state machine.
///
/// Holds the capture state and the actor strokes are attributed to. The store
/// and render pipeline are passed in with each event (see
/// [`InputCapture::handle`]), so the machine owns no drawing state besides the
/// in-progress stroke.
#[derive(Debug)]
pub struct InputCapture {
    pub(super) state: CaptureState,
    pub(super) actor: Option<Actor>,
}

impl Default for InputCapture {
    fn default() -> Self {
        Self::new(None)
    }
}

impl InputCapture {
    /// Creates an idle state machine. Without an actor every draw start is refused.
    pub fn new(actor: Option<Actor>) -> Self {
        Self {
            state: CaptureState::Idle,
            actor,
        }
    }

    /// Replaces the actor. Affects only strokes started afterwards.
    pub fn set_actor(&mut self, actor: Option<Actor>) {
        self.actor = actor;
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// The drawing flag: true between a stroke-starting pointer-down and its release.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, CaptureState::Drawing { .. })
    }

    /// The in-progress stroke, if any.
    pub fn current_stroke(&self) -> Option<&Stroke> {
        match &self.state {
            CaptureState::Drawing { stroke, .. } => Some(stroke),
            CaptureState::Idle => None,
        }
    }

    /// Pointer currently captured by the in-progress stroke.
    pub fn captured_pointer(&self) -> Option<i32> {
        match self.state {
            CaptureState::Drawing { pointer_id, .. } => Some(pointer_id),
            CaptureState::Idle => None,
        }
    }
}
