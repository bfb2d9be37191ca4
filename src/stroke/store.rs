//! Committed stroke collection and drawing tool settings.

use super::model::{Stroke, StrokeId};
use crate::draw::Color;
use crate::draw::color::BLACK;
use log::{debug, warn};
use std::fmt;
use thiserror::Error;

/// Default pen width in surface pixels.
pub const DEFAULT_WIDTH: f64 = 5.0;

/// Current drawing tool selection.
///
/// Read by the input capture state machine when a stroke starts and on every
/// sample; changing it never touches strokes already committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    pub current_color: Color,
    pub current_width: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            current_color: BLACK,
            current_width: DEFAULT_WIDTH,
        }
    }
}

/// Where a stroke entering the store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeOrigin {
    /// Drawn on this board
    Local,
    /// Received from another participant
    Remote,
}

/// Change notification delivered to store subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreEvent<'a> {
    Added {
        /// Store-assigned sequence number (strictly increasing)
        seq: u64,
        origin: StrokeOrigin,
        stroke: &'a Stroke,
    },
    Updated {
        stroke: &'a Stroke,
    },
    Cleared,
}

/// Handle returned by [`StrokeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Errors reported by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no stroke with id {id} in the store")]
    NotFound { id: StrokeId },

    #[error("replacement for stroke {id} has no points")]
    EmptyStroke { id: StrokeId },
}

type Listener = Box<dyn FnMut(&StoreEvent<'_>)>;

/// Container for all committed strokes on a board.
///
/// Strokes are kept in insertion order, which is also the paint order: later
/// strokes cover earlier ones. Every mutation (local or remote) goes through
/// this type so the order is deterministic.
pub struct StrokeStore {
    strokes: Vec<Stroke>,
    tool: ToolSettings,
    /// Bumped by changes that invalidate already painted pixels (update/clear)
    generation: u64,
    next_seq: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for StrokeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StrokeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrokeStore")
            .field("strokes", &self.strokes.len())
            .field("tool", &self.tool)
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl StrokeStore {
    /// Creates an empty store with default tool settings (black, 5px).
    pub fn new() -> Self {
        Self::with_tool(ToolSettings::default())
    }

    pub fn with_tool(tool: ToolSettings) -> Self {
        Self {
            strokes: Vec::new(),
            tool,
            generation: 0,
            next_seq: 1,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Appends a locally drawn stroke (painted on top of existing strokes).
    ///
    /// Returns the assigned sequence number, or `None` when the stroke has no
    /// points and was dropped.
    pub fn add_stroke(&mut self, stroke: Stroke) -> Option<u64> {
        self.add_stroke_from(stroke, StrokeOrigin::Local)
    }

    /// Appends a stroke received from another participant.
    pub fn add_remote_stroke(&mut self, stroke: Stroke) -> Option<u64> {
        self.add_stroke_from(stroke, StrokeOrigin::Remote)
    }

    /// Appends a stroke, tagging the change notification with its origin.
    pub fn add_stroke_from(&mut self, stroke: Stroke, origin: StrokeOrigin) -> Option<u64> {
        if stroke.points.is_empty() {
            warn!("Dropping stroke {} with no points", stroke.id);
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        debug!(
            "Adding {:?} stroke {} (seq {}, {} points)",
            origin,
            stroke.id,
            seq,
            stroke.points.len()
        );
        self.strokes.push(stroke);

        if let Some(stroke) = self.strokes.last() {
            notify(
                &mut self.listeners,
                &StoreEvent::Added {
                    seq,
                    origin,
                    stroke,
                },
            );
        }
        Some(seq)
    }

    /// Replaces the first stroke with the same id.
    ///
    /// # Errors
    /// Returns [`StoreError::EmptyStroke`] when the replacement has no points
    /// and [`StoreError::NotFound`] when no stroke has that id. In both cases
    /// the store is left untouched.
    pub fn update_stroke(&mut self, stroke: Stroke) -> Result<(), StoreError> {
        if stroke.points.is_empty() {
            return Err(StoreError::EmptyStroke { id: stroke.id });
        }
        let Some(index) = self.strokes.iter().position(|s| s.id == stroke.id) else {
            return Err(StoreError::NotFound { id: stroke.id });
        };

        debug!("Replacing stroke {} at index {}", stroke.id, index);
        self.strokes[index] = stroke;
        self.generation += 1;

        notify(
            &mut self.listeners,
            &StoreEvent::Updated {
                stroke: &self.strokes[index],
            },
        );
        Ok(())
    }

    /// Removes all strokes. Irreversible.
    pub fn clear_canvas(&mut self) {
        debug!("Clearing {} strokes", self.strokes.len());
        self.strokes.clear();
        self.generation += 1;
        notify(&mut self.listeners, &StoreEvent::Cleared);
    }

    /// Sets the color used by strokes started after this call.
    pub fn set_current_color(&mut self, color: Color) {
        self.tool.current_color = color;
    }

    /// Sets the base width used for strokes sampled after this call.
    ///
    /// Non-positive or non-finite widths are ignored.
    pub fn set_current_width(&mut self, width: f64) {
        if !(width.is_finite() && width > 0.0) {
            warn!("Ignoring invalid stroke width {width}");
            return;
        }
        self.tool.current_width = width;
    }

    pub fn tool(&self) -> ToolSettings {
        self.tool
    }

    /// Committed strokes in paint order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn get(&self, id: &StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| &s.id == id)
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Counter of destructive changes; a renderer that painted at an older
    /// generation must repaint everything.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Registers a change listener (the outbound half of a stroke feed).
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

fn notify(listeners: &mut [(SubscriptionId, Listener)], event: &StoreEvent<'_>) {
    for (_, listener) in listeners.iter_mut() {
        listener(event);
    }
}
