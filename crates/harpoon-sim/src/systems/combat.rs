//! Damage application shared by contacts, melee swings and enemy strikes.
//!
//! Death transitions happen here: the first lethal hit freezes the body,
//! plays the death track, emits the kill event and notifies the director.
//! Later hits on a dead target are ignored.

use glam::Vec2;
use hecs::{Entity, World};

use harpoon_ai::fsm::{self, DamageOutcome};
use harpoon_ai::player;
use harpoon_anim::AnimationRig;
use harpoon_core::components::{Body, Destructible, EnemyMind, PlayerMind};
use harpoon_core::config::WorldSettings;
use harpoon_core::enums::{AnimCue, AnimSlot, EnemyArchetype};
use harpoon_core::events::SimEvent;

use super::TickContext;
use crate::world_setup::entity_id;

/// Damage divisor for `target` from living tanks standing within the shield
/// radius. Each tank multiplies the divisor by the shield factor; tanks are
/// never shielded themselves.
pub fn shield_divisor(world: &World, target: Entity, settings: &WorldSettings) -> f32 {
    let position = match world.get::<&EnemyMind>(target) {
        Ok(mind) if mind.archetype == EnemyArchetype::Tank => return 1.0,
        Ok(_) => match world.get::<&Body>(target) {
            Ok(body) => body.position,
            Err(_) => return 1.0,
        },
        Err(_) => return 1.0,
    };
    let radius_sq = settings.tank_shield_radius * settings.tank_shield_radius;
    let tanks = world
        .query::<(&Body, &EnemyMind)>()
        .iter()
        .filter(|(entity, (body, mind))| {
            *entity != target
                && mind.archetype == EnemyArchetype::Tank
                && !mind.is_dead()
                && body.position.distance_squared(position) <= radius_sq
        })
        .count();
    settings.tank_shield_factor.powi(tanks as i32)
}

/// Hit an enemy for `amount` before shielding.
pub fn damage_enemy(world: &mut World, target: Entity, amount: f32, ctx: &mut TickContext) -> DamageOutcome {
    let dealt = amount / shield_divisor(world, target, &ctx.tuning.world);
    let Ok((body, mind, rig)) = world.query_one_mut::<(&mut Body, &mut EnemyMind, &mut AnimationRig)>(target) else {
        return DamageOutcome::Ignored;
    };
    let profile = ctx.tuning.enemies.profile(mind.archetype);
    let outcome = fsm::apply_damage(mind, dealt, ctx.now, profile);
    match outcome {
        DamageOutcome::Ignored => {}
        DamageOutcome::Wounded => {
            rig.cue(AnimSlot::TakeDamage, AnimCue::PlayOnce);
        }
        DamageOutcome::Killed => {
            freeze(body);
            rig.stop_all();
            rig.cue(AnimSlot::Death, AnimCue::PlayOnce);
            let (kind, archetype) = (body.kind, mind.archetype);
            let id = entity_id(target);
            log::debug!("{kind:?} {id} killed");
            ctx.events.push(SimEvent::EnemyKilled { id, kind });
            ctx.director.record_kill(id, archetype);
        }
    }
    outcome
}

pub fn damage_player(world: &mut World, target: Entity, amount: f32, ctx: &mut TickContext) -> DamageOutcome {
    let Ok((body, mind, rig)) = world.query_one_mut::<(&mut Body, &mut PlayerMind, &mut AnimationRig)>(target) else {
        return DamageOutcome::Ignored;
    };
    let outcome = player::apply_damage(mind, amount);
    match outcome {
        DamageOutcome::Ignored => {}
        DamageOutcome::Wounded => {
            ctx.events.push(SimEvent::PlayerDamaged { health: mind.health });
        }
        DamageOutcome::Killed => {
            freeze(body);
            rig.stop_all();
            log::info!("player killed");
            ctx.events.push(SimEvent::PlayerDamaged { health: mind.health });
            ctx.events.push(SimEvent::PlayerKilled);
        }
    }
    outcome
}

/// Damage a crate; breaking it schedules its removal and tells the director.
/// Returns true on the hit that broke it.
pub fn damage_crate(world: &mut World, target: Entity, amount: f32, ctx: &mut TickContext) -> bool {
    let Ok((body, crate_state)) = world.query_one_mut::<(&Body, &mut Destructible)>(target) else {
        return false;
    };
    crate_state.health -= amount;
    if crate_state.health > 0.0 || !ctx.despawn.mark(target) {
        return false;
    }
    let position: Vec2 = body.position;
    log::debug!("crate {} broken", entity_id(target));
    ctx.events.push(SimEvent::CrateBroken { position });
    ctx.director.notify_crate_broken();
    true
}

/// Damage whatever `target` is: an enemy, the player or a crate. Anything
/// else shrugs it off.
pub fn strike(world: &mut World, target: Entity, amount: f32, ctx: &mut TickContext) {
    if world.get::<&EnemyMind>(target).is_ok() {
        damage_enemy(world, target, amount, ctx);
    } else if world.get::<&PlayerMind>(target).is_ok() {
        damage_player(world, target, amount, ctx);
    } else if world.get::<&Destructible>(target).is_ok() {
        damage_crate(world, target, amount, ctx);
    }
}

/// Take a body out of integration and collision.
fn freeze(body: &mut Body) {
    body.flags.is_dynamic = false;
    body.flags.is_rigid = false;
    body.velocity = Vec2::ZERO;
    body.accel_intent = Vec2::ZERO;
    body.vertical_speed = 0.0;
}
