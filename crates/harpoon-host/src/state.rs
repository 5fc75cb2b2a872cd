//! State shared between the driver thread and the game loop thread.

use std::sync::{Arc, Mutex};

use harpoon_core::commands::PlayerCommand;
use harpoon_core::state::SimSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<SimSnapshot>>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}
