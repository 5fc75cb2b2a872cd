//! Combat AI for HARPOON.
//!
//! Finite state machines for the enemy archetypes and the player. Both are
//! pure with respect to the world: they read a context struct built by the
//! engine, mutate only the entity's own mind, and return the motion and
//! actions for the engine to apply. No ECS dependency.

pub mod fsm;
pub mod player;

pub use harpoon_core as core;

use glam::{Vec2, Vec3};
use harpoon_core::types::Aabb;

/// Height of the strike point above the attacker's feet.
pub const STRIKE_HEIGHT: f32 = 1.0;

/// Hit-scan box for a melee strike: a cube of half extent `reach`, centred
/// `range` ahead of the attacker along its facing.
pub fn melee_hitbox(position: Vec2, elevation: f32, facing: Vec2, range: f32, reach: f32) -> Aabb {
    let ahead = position + facing * range;
    Aabb::from_center(
        Vec3::new(ahead.x, elevation + STRIKE_HEIGHT, ahead.y),
        Vec3::splat(reach),
    )
}

#[cfg(test)]
mod tests;
