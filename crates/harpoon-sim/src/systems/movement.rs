//! Movement integration: intent acceleration, exponential friction, the speed
//! cap, gravity on the elevation axis, and culling of bodies that left the
//! world.

use glam::Vec2;
use hecs::World;

use harpoon_core::components::Body;

use super::TickContext;

/// Velocity multiplier for `dt` seconds at `friction` (fraction of speed lost
/// per second). Composes exactly: two half steps equal one full step.
pub fn friction_decay(friction: f32, dt: f32) -> f32 {
    if friction >= 1.0 {
        return 0.0;
    }
    if friction <= 0.0 {
        return 1.0;
    }
    (dt * (1.0 - friction).ln()).exp()
}

/// Integrate one body for `dt` seconds. Non-dynamic bodies and zero steps
/// leave the body untouched.
pub fn integrate(body: &mut Body, dt: f32) {
    if !body.flags.is_dynamic || dt <= 0.0 {
        return;
    }

    let mut velocity = body.velocity + body.accel_intent * body.acceleration * dt;
    let coasting = body.accel_intent == Vec2::ZERO;
    let over_cap = velocity.length() > body.max_speed && !body.flags.can_bypass_max_speed;
    // Decay is applied once per step even when both hold.
    if coasting || over_cap {
        velocity *= friction_decay(body.friction, dt);
    }
    body.velocity = velocity;
    body.position += velocity * dt;

    if body.gravity != 0.0 {
        body.vertical_speed -= body.gravity * dt;
        body.elevation += body.vertical_speed * dt;
        if body.elevation <= 0.0 {
            body.elevation = 0.0;
            body.vertical_speed = 0.0;
        }
    }
}

/// Integrate every dynamic body and schedule removal of those beyond the
/// cull radius.
pub fn run(world: &mut World, ctx: &mut TickContext) {
    let dt = ctx.dt as f32;
    let radius = ctx.tuning.world.cull_radius;
    let radius_sq = radius * radius;

    for (entity, body) in world.query_mut::<&mut Body>() {
        if ctx.despawn.contains(entity) {
            continue;
        }
        integrate(body, dt);
        if body.flags.is_dynamic && body.position.length_squared() > radius_sq && ctx.despawn.mark(entity) {
            log::debug!("culled {:?} at {}", body.kind, body.position);
        }
    }
}
