//! Dirty tracking for incremental repaints.
//!
//! Remembers how much of the committed stroke collection is already on the
//! surface, so appended strokes can be painted on top instead of repainting
//! everything.

/// What the pipeline has to do to bring the surface up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintPlan {
    /// Clear and repaint every stroke
    Full,
    /// Paint strokes `from..` on top of what is already there
    Append { from: usize },
    /// Nothing changed since the last paint
    Clean,
}

/// Tracks the painted prefix of the stroke collection.
#[derive(Debug)]
pub struct DirtyTracker {
    painted: usize,
    generation: u64,
    force_full: bool,
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtyTracker {
    /// Creates a tracker that asks for a full repaint first.
    pub fn new() -> Self {
        Self {
            painted: 0,
            generation: 0,
            force_full: true,
        }
    }

    /// Forces the next plan to be a full repaint (resize, live paint, ...).
    pub fn mark_full(&mut self) {
        self.force_full = true;
    }

    pub fn needs_full(&self) -> bool {
        self.force_full
    }

    /// Decides how to catch up with a collection of `len` strokes at `generation`.
    pub fn plan(&self, len: usize, generation: u64) -> RepaintPlan {
        if self.force_full || generation != self.generation || len < self.painted {
            RepaintPlan::Full
        } else if len > self.painted {
            RepaintPlan::Append { from: self.painted }
        } else {
            RepaintPlan::Clean
        }
    }

    /// Records that the whole collection was repainted.
    pub fn record_full(&mut self, len: usize, generation: u64) {
        self.painted = len;
        self.generation = generation;
        self.force_full = false;
    }

    /// Records that strokes up to `len` are now on the surface.
    pub fn record_appended(&mut self, len: usize) {
        self.painted = len;
    }
}
