//! Weapons ride on their owners: same ground position, elevation and facing.

use hecs::{Entity, World};

use harpoon_core::components::{Body, WeaponMount};
use harpoon_core::types::EntityId;

use super::TickContext;
use crate::world_setup::entity_of;

pub fn run(world: &mut World, ctx: &mut TickContext) {
    let mounts: Vec<(Entity, EntityId)> = world
        .query::<&WeaponMount>()
        .iter()
        .map(|(entity, mount)| (entity, mount.owner))
        .collect();

    for (weapon, owner) in mounts {
        let carrier = entity_of(owner)
            .filter(|owner| !ctx.despawn.contains(*owner))
            .and_then(|owner| {
                world
                    .get::<&Body>(owner)
                    .ok()
                    .map(|body| (body.position, body.elevation, body.facing))
            });
        match carrier {
            Some((position, elevation, facing)) => {
                if let Ok(mut body) = world.get::<&mut Body>(weapon) {
                    body.position = position;
                    body.elevation = elevation;
                    body.facing = facing;
                }
            }
            None => {
                ctx.despawn.mark(weapon);
            }
        }
    }
}
