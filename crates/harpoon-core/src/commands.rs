//! Semantic player commands consumed by the simulation.
//!
//! Raw input wiring lives in the host; only the resulting intents reach the
//! engine, queued and applied at the next tick boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Movement intent on the ground plane. Normalised by the engine; zero stops.
    Move { intent: Vec2 },
    /// Pointer-facing direction.
    Face { direction: Vec2 },
    /// Fire every loaded harpoon.
    Fire,
    Melee,
    Reload,
    Dash,
}
