//! Backend-neutral pointer event types.

use serde::{Deserialize, Serialize};

/// Pointer event kinds the capture state machine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Button/contact pressed
    Down,
    /// Pointer moved (with or without contact)
    Move,
    /// Button/contact released
    Up,
    /// Pointer left the surface
    Leave,
    /// Platform cancelled the pointer (palm rejection, surface lost, ...)
    Cancel,
}

/// A raw pointer sample in display (client) coordinates.
///
/// Backends fill this in from their native events; the capture state machine
/// maps the position into surface pixels itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Identifies the input device/contact (mouse, pen, finger)
    #[serde(default)]
    pub pointer_id: i32,
    pub client_x: f64,
    pub client_y: f64,
    /// Reported pressure in 0.0 - 1.0; `None` when the device has no sensor
    #[serde(default)]
    pub pressure: Option<f64>,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            pointer_id: 0,
            client_x,
            client_y,
            pressure: None,
        }
    }

    pub fn down(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerKind::Down, client_x, client_y)
    }

    pub fn moved(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerKind::Move, client_x, client_y)
    }

    pub fn up(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerKind::Up, client_x, client_y)
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_pointer(mut self, pointer_id: i32) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}
