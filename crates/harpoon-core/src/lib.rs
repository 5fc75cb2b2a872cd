//! Core types and definitions for the HARPOON simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, events, snapshots, constants, tuning and the
//! per-type definition table. It has no dependency on the ECS or on any
//! rendering/runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod definitions;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
