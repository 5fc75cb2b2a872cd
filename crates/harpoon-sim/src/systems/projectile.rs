//! Projectile steering and embedded projectiles.
//!
//! Bubbles home on the player; harpoons keep facing along their flight.
//! An embedded harpoon rides on its host and is removed once its lifetime
//! runs out or the host is gone.

use glam::Vec2;
use hecs::{Entity, World};

use harpoon_core::components::{Body, Projectile, ProjectilePhase};
use harpoon_core::enums::EntityType;
use harpoon_core::types::EntityId;

use super::{living_player, TickContext};
use crate::world_setup::entity_of;

pub fn run(world: &mut World, ctx: &mut TickContext) {
    let target = living_player(world, ctx.despawn).map(|(_, position)| position);
    let mut embedded: Vec<(Entity, EntityId, Vec2, f64)> = Vec::new();

    for (entity, (body, projectile)) in world.query_mut::<(&mut Body, &Projectile)>() {
        if ctx.despawn.contains(entity) {
            continue;
        }
        match projectile.phase {
            ProjectilePhase::InFlight if body.kind == EntityType::BubbleProjectile => {
                if let Some(heading) = target.and_then(|t| (t - body.position).try_normalize()) {
                    body.accel_intent = heading;
                    body.facing = heading;
                }
            }
            ProjectilePhase::InFlight => {
                if let Some(heading) = body.velocity.try_normalize() {
                    body.facing = heading;
                }
            }
            ProjectilePhase::Embedded {
                host,
                offset,
                expires_at,
            } => embedded.push((entity, host, offset, expires_at)),
        }
    }

    for (entity, host, offset, expires_at) in embedded {
        let host_position = entity_of(host)
            .filter(|host| !ctx.despawn.contains(*host))
            .and_then(|host| world.get::<&Body>(host).ok().map(|body| body.position));
        match host_position {
            Some(position) if ctx.now < expires_at => {
                if let Ok(mut body) = world.get::<&mut Body>(entity) {
                    body.position = position + offset;
                }
            }
            _ => {
                ctx.despawn.mark(entity);
            }
        }
    }
}
