//! Replayable board sessions.
//!
//! A script is a JSON document describing a sequence of pointer events and
//! tool/store operations. Replaying it against a [`Board`] reproduces the
//! drawing exactly, which is what the `inkboard` binary uses to render PNGs
//! headlessly.
//!
//! ```json
//! {
//!   "surface": { "width": 400, "height": 300, "devicePixelRatio": 2 },
//!   "actor": { "id": "u1", "displayName": "Demo User" },
//!   "steps": [
//!     { "op": "setColor", "color": "#ff0000" },
//!     { "op": "pointer", "kind": "down", "clientX": 10, "clientY": 10, "pressure": 0.5 },
//!     { "op": "pointer", "kind": "move", "clientX": 20, "clientY": 10 },
//!     { "op": "pointer", "kind": "up", "clientX": 20, "clientY": 10 }
//!   ]
//! }
//! ```

use crate::board::Board;
use crate::config::Config;
use crate::draw::{Color, DisplayRect};
use crate::input::{Actor, PointerEvent, PointerOutcome};
use crate::stroke::{StoreError, Stroke};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Surface geometry requested by a script. Overrides the config file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptSurface {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub device_pixel_ratio: Option<f64>,
}

/// One replay step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Step {
    /// Raw pointer event in display coordinates
    Pointer(PointerEvent),
    SetColor {
        color: Color,
    },
    SetWidth {
        width: f64,
    },
    /// Select a configured brush size preset
    BrushSize {
        index: usize,
    },
    Eraser,
    Clear,
    Resize {
        width: f64,
        height: f64,
        #[serde(default)]
        left: f64,
        #[serde(default)]
        top: f64,
    },
    /// Stroke arriving from another participant
    RemoteStroke {
        stroke: Stroke,
    },
    UpdateStroke {
        stroke: Stroke,
    },
}

/// A parsed replay script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub surface: Option<ScriptSurface>,
    /// Who draws. Omitted means a local default user; `null` means nobody,
    /// so every pointer-down is refused.
    #[serde(default = "default_actor")]
    pub actor: Option<Actor>,
    pub steps: Vec<Step>,
}

fn default_actor() -> Option<Actor> {
    Some(Actor::new("local", "Local User"))
}

/// Tally of what a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub steps: usize,
    /// Strokes committed through pointer input
    pub committed: usize,
    /// Pointer events the capture machine ignored
    pub ignored: usize,
    pub remote_added: usize,
    /// Updates naming a stroke id the store does not have
    pub not_found: usize,
    /// Updates refused because the replacement stroke was empty
    pub rejected: usize,
}

impl Script {
    /// Parses a script from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script = Self::from_json(&text)
            .with_context(|| format!("Failed to parse script {}", path.display()))?;
        debug!("Loaded script {} ({} steps)", path.display(), script.steps.len());
        Ok(script)
    }

    /// Applies the script's surface request on top of `config`.
    pub fn apply_surface(&self, config: &mut Config) {
        if let Some(surface) = self.surface {
            config.surface.width = surface.width;
            config.surface.height = surface.height;
            if let Some(ratio) = surface.device_pixel_ratio {
                config.surface.device_pixel_ratio = ratio;
            }
            config.validate_and_clamp();
        }
    }

    /// Creates a board for this script: config, then script surface, then actor.
    pub fn board(&self, config: &Config) -> Board {
        let mut config = config.clone();
        self.apply_surface(&mut config);
        Board::new(&config, self.actor.clone())
    }

    /// Feeds every step through `board` in order.
    pub fn run(&self, board: &mut Board) -> ReplayReport {
        let mut report = ReplayReport::default();

        for step in &self.steps {
            report.steps += 1;
            match step {
                Step::Pointer(event) => match board.handle_pointer(event) {
                    PointerOutcome::Committed(_) => report.committed += 1,
                    PointerOutcome::Ignored(_) => report.ignored += 1,
                    PointerOutcome::Started(_) | PointerOutcome::Extended { .. } => {}
                },
                Step::SetColor { color } => board.set_color(*color),
                Step::SetWidth { width } => board.set_width(*width),
                Step::BrushSize { index } => {
                    board.select_brush_size(*index);
                }
                Step::Eraser => board.select_eraser(),
                Step::Clear => board.clear_canvas(),
                Step::Resize {
                    width,
                    height,
                    left,
                    top,
                } => board.resize(DisplayRect::new(*left, *top, *width, *height)),
                Step::RemoteStroke { stroke } => {
                    if board.apply_remote_stroke(stroke.clone()).is_some() {
                        report.remote_added += 1;
                    }
                }
                Step::UpdateStroke { stroke } => match board.update_stroke(stroke.clone()) {
                    Ok(()) => {}
                    Err(StoreError::NotFound { .. }) => report.not_found += 1,
                    Err(StoreError::EmptyStroke { .. }) => report.rejected += 1,
                },
            }
        }

        board.sync();
        info!(
            "Replayed {} steps: {} committed, {} ignored, {} remote, {} updates not found, {} rejected",
            report.steps,
            report.committed,
            report.ignored,
            report.remote_added,
            report.not_found,
            report.rejected
        );
        report
    }
}
