//! Headless HARPOON host.
//!
//! Drives the simulation engine on its own thread at a fixed tick rate,
//! feeds it scripted player commands and logs the events it produces.

pub mod game_loop;
pub mod options;
pub mod script;
pub mod state;

pub use harpoon_core as core;
