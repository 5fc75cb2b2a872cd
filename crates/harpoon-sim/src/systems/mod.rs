//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for
//! read-only) plus the tick context. They do not own state; entity state
//! lives in components and wave state lives in the director.

pub mod animation;
pub mod cleanup;
pub mod collision;
pub mod combat;
pub mod enemy_ai;
pub mod movement;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod wave_director;
pub mod weapon;

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use harpoon_core::components::{Body, PlayerMind};
use harpoon_core::config::TuningConfig;
use harpoon_core::definitions::DefinitionTable;
use harpoon_core::enums::PlayerState;
use harpoon_core::events::SimEvent;

use self::cleanup::DespawnQueue;
use self::wave_director::WaveDirector;

/// Everything a system may read or change besides the world itself.
pub struct TickContext<'a> {
    /// Simulation time of this tick (seconds).
    pub now: f64,
    pub dt: f64,
    pub tuning: &'a TuningConfig,
    pub definitions: &'a DefinitionTable,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<SimEvent>,
    pub director: &'a mut WaveDirector,
    pub despawn: &'a mut DespawnQueue,
}

/// The living player that is not scheduled for removal, with its position.
pub fn living_player(world: &World, despawn: &DespawnQueue) -> Option<(Entity, Vec2)> {
    world
        .query::<(&Body, &PlayerMind)>()
        .iter()
        .find(|(entity, (_, mind))| mind.state != PlayerState::Dead && !despawn.contains(*entity))
        .map(|(entity, (body, _))| (entity, body.position))
}
