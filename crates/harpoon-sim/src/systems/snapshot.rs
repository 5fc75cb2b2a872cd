//! Snapshot system: queries the ECS world and builds a `SimSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use harpoon_anim::AnimationRig;
use harpoon_core::components::{Body, PlayerMind};
use harpoon_core::state::*;
use harpoon_core::types::{Pose, SimTime};

use super::wave_director::WaveDirector;
use crate::world_setup::entity_id;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(world: &World, time: &SimTime, director: &WaveDirector) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        wave: director.view(),
        player: build_player(world),
        entities: build_entities(world),
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<&PlayerMind>()
        .iter()
        .next()
        .map(|(entity, mind)| PlayerView {
            id: entity_id(entity),
            state: mind.state,
            health: mind.health,
            loaded_ammo: mind.loaded_ammo,
            ammo_capacity: mind.ammo_capacity,
        })
}

/// Every live entity, ordered by id.
fn build_entities(world: &World) -> Vec<EntityView> {
    let mut entities: Vec<EntityView> = world
        .query::<(&Body, Option<&AnimationRig>)>()
        .iter()
        .map(|(entity, (body, rig))| EntityView {
            id: entity_id(entity),
            kind: body.kind,
            position: body.position,
            elevation: body.elevation,
            facing: body.facing,
            pose: rig.map_or(Pose::IDENTITY, AnimationRig::pose),
        })
        .collect();
    entities.sort_by_key(|view| view.id);
    entities
}
