//! Rendering primitives (Cairo-based).
//!
//! This module turns committed and in-progress strokes into pixels:
//! - [`Color`]: RGBA color with hex (de)serialisation
//! - [`smoothing`]: midpoint curve smoothing shared by every paint path
//! - [`Surface`]: the backing buffer and display-to-surface coordinate mapping
//! - [`RenderPipeline`]: full and incremental repaints with dirty tracking

pub mod color;
pub mod dirty;
pub mod pipeline;
pub mod render;
pub mod smoothing;
pub mod surface;

pub use color::{Color, ColorParseError};
pub use dirty::{DirtyTracker, RepaintPlan};
pub use pipeline::RenderPipeline;
pub use render::{RenderOptions, render_stroke, render_strokes};
pub use smoothing::{PathPoint, PathSegment, SmoothPath, segment_at, smooth_path};
pub use surface::{DisplayRect, Surface};
