//! Simulation engine for HARPOON.
//!
//! Owns the hecs ECS world, advances it one host-driven tick at a time,
//! and produces snapshots and events for the renderer.

pub mod engine;
pub mod error;
pub mod systems;
pub mod world_setup;

pub use harpoon_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use error::SimError;
