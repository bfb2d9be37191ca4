//! Pointer input handling and the stroke capture state machine.
//!
//! This module translates pointer events into strokes. It tracks who is
//! drawing (the [`Actor`]), which pointer owns the current stroke, and paints
//! the stroke incrementally while it is being drawn.

pub mod events;
pub mod identity;
pub mod state;

// Re-export commonly used types at module level
pub use events::{PointerEvent, PointerKind};
pub use identity::Actor;
pub use state::{CaptureState, IgnoreReason, InputCapture, PointerOutcome};
