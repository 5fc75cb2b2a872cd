//! Collision sweep and contact dispatch.
//!
//! Every dynamic body is tested against every rigid body with world-space
//! AABBs. An overlap pushes the dynamic body out along the minimum
//! translation vector (never the rigid one), unless either side avoids
//! displacement, and then runs the contact rule for the pair of types.
//! Rules are symmetric: the pair is tried in both orders.

use glam::{Vec2, Vec3};
use hecs::{Entity, World};

use harpoon_core::components::{Body, PlayerMind, Projectile, ProjectilePhase};
use harpoon_core::config::WorldSettings;
use harpoon_core::enums::EntityType;
use harpoon_core::events::SimEvent;
use harpoon_core::types::Aabb;

use super::{combat, TickContext};
use crate::world_setup::entity_id;

/// Smallest ground-plane push that separates `a` from `b`.
///
/// Candidates are the overlap depths along +x, +z, -x and -z (world z is
/// ground-plane y); the smallest non-negative one wins, earlier candidates
/// on ties. Zero when no candidate applies.
pub fn minimum_translation(a: &Aabb, b: &Aabb) -> Vec2 {
    let toward_max = b.max - a.min;
    let toward_min = a.max - b.min;
    [
        (toward_max.x, Vec2::X),
        (toward_max.z, Vec2::Y),
        (toward_min.x, Vec2::NEG_X),
        (toward_min.z, Vec2::NEG_Y),
    ]
    .into_iter()
    .filter(|(depth, _)| *depth >= 0.0)
    .min_by(|a, b| a.0.total_cmp(&b.0))
    .map_or(Vec2::ZERO, |(depth, direction)| direction * depth)
}

/// Type pairs that pass through each other, in either order.
pub fn ignores_contact(a: EntityType, b: EntityType) -> bool {
    fn one_way(a: EntityType, b: EntityType) -> bool {
        use EntityType::*;
        match (a, b) {
            (Player, HarpoonProjectile)
            | (BoltPickup, Crate)
            | (HarpoonProjectile, HarpoonProjectile)
            | (BubbleProjectile, BubbleProjectile) => true,
            (kind, BubbleProjectile) => kind.is_enemy(),
            _ => false,
        }
    }
    one_way(a, b) || one_way(b, a)
}

struct Contact {
    first: EntityType,
    second: EntityType,
    push: Option<Vec2>,
}

/// Overlap between dynamic `a` and rigid `b`, read from their current state.
fn contact(world: &World, a: Entity, b: Entity) -> Option<Contact> {
    let body_a = world.get::<&Body>(a).ok()?;
    let body_b = world.get::<&Body>(b).ok()?;
    if !body_a.flags.is_dynamic || !body_b.flags.is_rigid || ignores_contact(body_a.kind, body_b.kind) {
        return None;
    }
    let box_a = body_a.world_box()?;
    let box_b = body_b.world_box()?;
    if !box_a.intersects(&box_b) {
        return None;
    }
    let avoid = body_a.flags.avoid_displacement || body_b.flags.avoid_displacement;
    Some(Contact {
        first: body_a.kind,
        second: body_b.kind,
        push: (!avoid).then(|| minimum_translation(&box_a, &box_b)),
    })
}

/// Run the sweep, then keep the player inside the playable area.
pub fn run(world: &mut World, ctx: &mut TickContext) {
    let mut dynamic = Vec::new();
    let mut rigid = Vec::new();
    for (entity, body) in world.query::<&Body>().iter() {
        if body.bounding_box.is_none() || ctx.despawn.contains(entity) {
            continue;
        }
        if body.flags.is_dynamic {
            dynamic.push(entity);
        }
        if body.flags.is_rigid {
            rigid.push(entity);
        }
    }

    for &a in &dynamic {
        for &b in &rigid {
            if ctx.despawn.contains(a) {
                break;
            }
            if a == b || ctx.despawn.contains(b) {
                continue;
            }
            let Some(contact) = contact(world, a, b) else {
                continue;
            };
            if let Some(push) = contact.push {
                if let Ok(mut body) = world.get::<&mut Body>(a) {
                    body.position += push;
                }
            }
            if !resolve(world, (a, contact.first), (b, contact.second), ctx) {
                resolve(world, (b, contact.second), (a, contact.first), ctx);
            }
        }
    }

    enforce_playable_area(world, &ctx.tuning.world);
}

/// Apply the contact rule for `first` touching `second`, if this ordered
/// pair has one.
fn resolve(
    world: &mut World,
    (first, first_kind): (Entity, EntityType),
    (second, second_kind): (Entity, EntityType),
    ctx: &mut TickContext,
) -> bool {
    use EntityType::*;
    match (first_kind, second_kind) {
        (HarpoonProjectile, BubbleProjectile) => {
            ctx.despawn.mark(first);
            ctx.despawn.mark(second);
        }
        (HarpoonProjectile, kind) if kind.is_enemy() => {
            let damage = projectile_damage(world, first);
            ctx.despawn.mark(first);
            combat::damage_enemy(world, second, damage, ctx);
        }
        (HarpoonProjectile, Crate) => {
            let damage = projectile_damage(world, first);
            ctx.despawn.mark(first);
            combat::damage_crate(world, second, damage, ctx);
        }
        (HarpoonProjectile, kind) if kind.is_scenery() => embed(world, first, second, ctx),
        (BubbleProjectile, kind) if kind.is_scenery() || kind == Crate => {
            ctx.despawn.mark(first);
        }
        (Player, BubbleProjectile) => {
            let damage = projectile_damage(world, second);
            ctx.despawn.mark(second);
            combat::damage_player(world, first, damage, ctx);
        }
        (Player, BoltPickup) => collect_bolt(world, first, second, ctx),
        _ => return false,
    }
    true
}

fn projectile_damage(world: &World, projectile: Entity) -> f32 {
    world
        .get::<&Projectile>(projectile)
        .map_or(0.0, |projectile| projectile.damage)
}

/// Stick a harpoon into `host`: it stops, leaves integration and collision,
/// and follows the host until its lifetime runs out.
fn embed(world: &mut World, projectile: Entity, host: Entity, ctx: &mut TickContext) {
    let Ok(host_position) = world.get::<&Body>(host).map(|body| body.position) else {
        return;
    };
    let Ok((body, state)) = world.query_one_mut::<(&mut Body, &mut Projectile)>(projectile) else {
        return;
    };
    body.velocity = Vec2::ZERO;
    body.accel_intent = Vec2::ZERO;
    body.flags.is_dynamic = false;
    body.flags.is_rigid = false;
    state.phase = ProjectilePhase::Embedded {
        host: entity_id(host),
        offset: body.position - host_position,
        expires_at: ctx.now + ctx.tuning.world.embedded_lifetime_secs,
    };
}

fn collect_bolt(world: &mut World, player: Entity, bolt: Entity, ctx: &mut TickContext) {
    if !ctx.despawn.mark(bolt) {
        return;
    }
    let Ok(mind) = world.query_one_mut::<&mut PlayerMind>(player) else {
        return;
    };
    mind.ammo_capacity += 1;
    log::debug!("bolt collected, capacity now {}", mind.ammo_capacity);
    ctx.events.push(SimEvent::BoltPickedUp {
        capacity: mind.ammo_capacity,
    });
    ctx.events.push(SimEvent::AmmoChanged {
        loaded: mind.loaded_ammo,
        capacity: mind.ammo_capacity,
    });
}

/// A player outside the playable area stops and is nudged back toward the
/// origin.
fn enforce_playable_area(world: &mut World, settings: &WorldSettings) {
    let half = settings.playable_half_extent;
    let area = Aabb::new(
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, settings.playable_height, half),
    );
    for (_entity, (body, _player)) in world.query_mut::<(&mut Body, &PlayerMind)>() {
        let point = Vec3::new(body.position.x, body.elevation, body.position.y);
        if area.contains(point) {
            continue;
        }
        body.velocity = Vec2::ZERO;
        body.position -= body.position.normalize_or_zero() * settings.boundary_nudge;
    }
}
