mod core;
mod pointer;

pub use core::{CaptureState, IgnoreReason, InputCapture, PointerOutcome};
