//! Freehand stroke capture, smoothing and rendering for a shared drawing board.
//!
//! The [`Board`] is the entry point: it owns the committed strokes, the
//! render surface and the pointer capture state machine. Hosts feed it
//! pointer events and tool changes; remote participants' strokes arrive
//! through [`Board::apply_remote_stroke`].

pub mod board;
pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod script;
pub mod stroke;

pub use board::Board;
pub use config::Config;
