//! Enemy combat state machine.
//!
//! `CHASE_PLAYER → MELEE_ATTACK → {CHASE_PLAYER | POSITION_FOR_RANGED} →
//! RANGED_ATTACK → CHASE_PLAYER`, plus the terminal `DEAD`. Every timer is an
//! absolute deadline stored on the mind when a state is entered; nothing
//! here polls animation completion.

use glam::Vec2;

use harpoon_core::components::EnemyMind;
use harpoon_core::config::{EnemyProfile, RangedProfile};
use harpoon_core::enums::{AnimCue, AnimSlot, EnemyState};
use harpoon_core::types::{blend_facing, Aabb};

use crate::melee_hitbox;

/// What an enemy can see of the player.
#[derive(Debug, Clone, Copy)]
pub struct TargetView {
    pub position: Vec2,
    /// World-space bounding box.
    pub bounds: Aabb,
}

/// Input to the enemy FSM for a single entity.
pub struct EnemyContext<'a> {
    pub now: f64,
    pub dt: f64,
    pub position: Vec2,
    pub elevation: f32,
    pub facing: Vec2,
    /// `None` when there is no living player.
    pub player: Option<TargetView>,
    pub profile: &'a EnemyProfile,
}

impl EnemyContext<'_> {
    fn to_player(&self) -> Option<(Vec2, f32)> {
        let player = self.player?;
        let offset = player.position - self.position;
        Some((offset.normalize_or_zero(), offset.length()))
    }

    fn turn_toward(&self, direction: Vec2) -> Vec2 {
        if direction == Vec2::ZERO {
            return self.facing;
        }
        blend_facing(self.facing, direction, self.profile.turn_rate, self.dt as f32)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnemyAction {
    Animate(AnimSlot, AnimCue),
    DamagePlayer(f32),
    FireBubble { origin: Vec2, direction: Vec2 },
    /// Death animation has run its course.
    Remove,
}

/// Output from the enemy FSM.
#[derive(Debug, Clone)]
pub struct EnemyUpdate {
    pub facing: Vec2,
    pub accel_intent: Vec2,
    pub avoid_displacement: bool,
    pub state_changed: bool,
    pub actions: Vec<EnemyAction>,
}

/// Result of a damage call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed.
    Ignored,
    Wounded,
    /// This call killed the target. Returned at most once per target.
    Killed,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(mind: &mut EnemyMind, ctx: &EnemyContext) -> EnemyUpdate {
    let entry_state = mind.state;
    let mut update = EnemyUpdate {
        facing: ctx.facing,
        accel_intent: Vec2::ZERO,
        avoid_displacement: false,
        state_changed: false,
        actions: Vec::new(),
    };

    match mind.state {
        EnemyState::ChasePlayer => evaluate_chase(mind, ctx, &mut update),
        EnemyState::MeleeAttack => evaluate_melee(mind, ctx, &mut update),
        EnemyState::PositionForRanged | EnemyState::RangedAttack => match &ctx.profile.ranged {
            Some(ranged) if mind.state == EnemyState::PositionForRanged => {
                evaluate_positioning(mind, ctx, ranged, &mut update)
            }
            Some(_) => evaluate_ranged(mind, ctx, &mut update),
            None => {
                log::error!(
                    "{:?} enemy reached {:?} without a ranged profile; resetting to chase",
                    mind.archetype,
                    mind.state
                );
                enter_chase(mind, &mut update);
            }
        },
        EnemyState::Dead => evaluate_dead(mind, ctx, &mut update),
    }

    update.state_changed = mind.state != entry_state;
    update
}

fn evaluate_chase(mind: &mut EnemyMind, ctx: &EnemyContext, update: &mut EnemyUpdate) {
    let Some((direction, distance)) = ctx.to_player() else {
        return;
    };
    update.facing = ctx.turn_toward(direction);

    let profile = ctx.profile;
    if distance > profile.melee_range {
        update.accel_intent = direction;
    }
    if distance < profile.melee_range && ctx.now > mind.melee_ready_at {
        mind.state = EnemyState::MeleeAttack;
        mind.melee_ends_at = ctx.now + profile.melee_duration_secs;
        mind.melee_hit_at = ctx.now + profile.melee_duration_secs * profile.melee_hit_fraction;
        mind.melee_ready_at = mind.melee_ends_at + profile.melee_cooldown_secs;
        mind.melee_resolved = false;
        mind.melee_landed = false;
        update.accel_intent = Vec2::ZERO;
        update.avoid_displacement = true;
        update.actions.push(EnemyAction::Animate(AnimSlot::Run, AnimCue::Stop));
        update
            .actions
            .push(EnemyAction::Animate(AnimSlot::Melee, AnimCue::PlayOnce));
    }
}

fn evaluate_melee(mind: &mut EnemyMind, ctx: &EnemyContext, update: &mut EnemyUpdate) {
    let profile = ctx.profile;
    update.avoid_displacement = true;

    if !mind.melee_resolved && ctx.now >= mind.melee_hit_at {
        mind.melee_resolved = true;
        if let Some(player) = ctx.player {
            let strike = melee_hitbox(
                ctx.position,
                ctx.elevation,
                ctx.facing,
                profile.melee_range,
                profile.melee_reach,
            );
            if strike.intersects(&player.bounds) {
                mind.melee_landed = true;
                update
                    .actions
                    .push(EnemyAction::DamagePlayer(profile.melee_damage));
            }
        }
    }

    if ctx.now < mind.melee_ends_at {
        return;
    }

    update.avoid_displacement = false;
    match &profile.ranged {
        Some(ranged) if !mind.melee_landed => {
            mind.state = EnemyState::PositionForRanged;
            mind.ranged_window_ends_at = ctx.now + ranged.window_secs;
        }
        _ => enter_chase(mind, update),
    }
}

fn evaluate_positioning(
    mind: &mut EnemyMind,
    ctx: &EnemyContext,
    ranged: &RangedProfile,
    update: &mut EnemyUpdate,
) {
    let Some((direction, distance)) = ctx.to_player() else {
        enter_chase(mind, update);
        return;
    };
    update.facing = ctx.turn_toward(direction);

    if distance > ranged.max_range || ctx.now >= mind.ranged_window_ends_at {
        enter_chase(mind, update);
        return;
    }
    if distance >= ranged.min_range {
        mind.state = EnemyState::RangedAttack;
        mind.ranged_fire_at = ctx.now + ranged.windup_secs;
        update.avoid_displacement = true;
        update.actions.push(EnemyAction::Animate(AnimSlot::Run, AnimCue::Stop));
        update
            .actions
            .push(EnemyAction::Animate(AnimSlot::Ranged, AnimCue::PlayOnce));
        return;
    }
    // Too close: back off.
    update.accel_intent = -direction;
}

fn evaluate_ranged(mind: &mut EnemyMind, ctx: &EnemyContext, update: &mut EnemyUpdate) {
    update.avoid_displacement = true;
    let aim = ctx.to_player().map(|(direction, _)| direction);
    if let Some(direction) = aim {
        update.facing = ctx.turn_toward(direction);
    }
    if ctx.now < mind.ranged_fire_at {
        return;
    }

    let direction = match aim {
        Some(d) if d != Vec2::ZERO => d,
        _ => update.facing,
    };
    update.actions.push(EnemyAction::FireBubble {
        origin: ctx.position + direction,
        direction,
    });
    update.avoid_displacement = false;
    enter_chase(mind, update);
}

fn evaluate_dead(mind: &mut EnemyMind, ctx: &EnemyContext, update: &mut EnemyUpdate) {
    update.avoid_displacement = true;
    if ctx.now >= mind.remove_at {
        update.actions.push(EnemyAction::Remove);
    }
}

fn enter_chase(mind: &mut EnemyMind, update: &mut EnemyUpdate) {
    mind.state = EnemyState::ChasePlayer;
    update.actions.push(EnemyAction::Animate(AnimSlot::Run, AnimCue::Start));
}

/// Apply damage to an enemy. The first call that drops health to zero or
/// below moves it to `Dead` and schedules removal after the death animation;
/// any damage after that is ignored.
pub fn apply_damage(mind: &mut EnemyMind, amount: f32, now: f64, profile: &EnemyProfile) -> DamageOutcome {
    if mind.is_dead() {
        return DamageOutcome::Ignored;
    }
    mind.health -= amount;
    if mind.health > 0.0 {
        return DamageOutcome::Wounded;
    }
    mind.state = EnemyState::Dead;
    mind.remove_at = now + profile.death_duration_secs;
    DamageOutcome::Killed
}
