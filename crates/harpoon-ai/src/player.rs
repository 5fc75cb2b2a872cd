//! Player action state machine.
//!
//! `IDLE ↔ RUNNING` follows the movement intent; `RELOADING` loads one
//! harpoon per cycle. Firing, melee and dash are independent of that cycle
//! and gated on ammo or cooldown deadlines.

use glam::Vec2;

use harpoon_core::components::PlayerMind;
use harpoon_core::config::PlayerSettings;
use harpoon_core::enums::{AnimCue, AnimSlot, PlayerState};
use harpoon_core::types::Aabb;

use crate::fsm::DamageOutcome;
use crate::melee_hitbox;

/// Semantic input for one tick. Movement and facing persist between ticks;
/// the action flags are one-shot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub move_intent: Vec2,
    pub face: Option<Vec2>,
    pub fire: bool,
    pub melee: bool,
    pub reload: bool,
    pub dash: bool,
}

impl PlayerInput {
    pub fn clear_actions(&mut self) {
        self.fire = false;
        self.melee = false;
        self.reload = false;
        self.dash = false;
    }
}

pub struct PlayerContext<'a> {
    pub now: f64,
    pub position: Vec2,
    pub elevation: f32,
    pub facing: Vec2,
    pub input: &'a PlayerInput,
    pub settings: &'a PlayerSettings,
}

/// Which visual node an animation cue is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimTarget {
    Body,
    Weapon,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    Animate(AnimTarget, AnimSlot, AnimCue),
    /// Launch one harpoon per direction.
    FireVolley { origin: Vec2, directions: Vec<Vec2> },
    /// Strike every rigid entity intersecting `hitbox`.
    MeleeSwing { hitbox: Aabb, damage: f32 },
    AmmoChanged { loaded: u32, capacity: u32 },
}

#[derive(Debug, Clone)]
pub struct PlayerUpdate {
    pub facing: Vec2,
    pub accel_intent: Vec2,
    /// Multiplier on the body's base acceleration.
    pub acceleration_scale: f32,
    pub bypass_max_speed: bool,
    pub actions: Vec<PlayerAction>,
}

/// Evaluate the player FSM for one tick.
pub fn evaluate(mind: &mut PlayerMind, ctx: &PlayerContext) -> PlayerUpdate {
    let input = ctx.input;
    let settings = ctx.settings;
    let mut update = PlayerUpdate {
        facing: ctx.facing,
        accel_intent: Vec2::ZERO,
        acceleration_scale: 1.0,
        bypass_max_speed: false,
        actions: Vec::new(),
    };
    if mind.state == PlayerState::Dead {
        return update;
    }
    let entry_state = mind.state;

    if let Some(face) = input.face.and_then(Vec2::try_normalize) {
        update.facing = face;
    }
    let intent = input.move_intent.normalize_or_zero();
    update.accel_intent = intent;

    // Dash
    if input.dash && ctx.now >= mind.dash_ready_at {
        mind.dash_ready_at = ctx.now + settings.dash_cooldown_secs;
        mind.dash_ends_at = ctx.now + settings.dash_duration_secs;
    }
    if ctx.now < mind.dash_ends_at {
        update.acceleration_scale = settings.dash_boost;
        update.bypass_max_speed = true;
        if intent == Vec2::ZERO {
            update.accel_intent = update.facing;
        }
    }

    // Reload completion
    if mind.state == PlayerState::Reloading && ctx.now >= mind.reload_ends_at {
        mind.loaded_ammo = (mind.loaded_ammo + 1).min(mind.ammo_capacity);
        mind.state = movement_state(intent);
        update.actions.push(PlayerAction::AmmoChanged {
            loaded: mind.loaded_ammo,
            capacity: mind.ammo_capacity,
        });
    }

    // Fire
    if input.fire && mind.loaded_ammo > 0 {
        let directions = volley_directions(update.facing, mind.loaded_ammo, settings.volley_spread_per_round);
        update.actions.push(PlayerAction::FireVolley {
            origin: ctx.position + update.facing,
            directions,
        });
        mind.loaded_ammo = 0;
        if mind.state == PlayerState::Reloading {
            mind.state = movement_state(intent);
        }
        update.actions.extend([
            PlayerAction::Animate(AnimTarget::Body, AnimSlot::Shoot, AnimCue::PlayOnce),
            PlayerAction::Animate(AnimTarget::Weapon, AnimSlot::Shoot, AnimCue::PlayOnce),
            PlayerAction::AmmoChanged {
                loaded: 0,
                capacity: mind.ammo_capacity,
            },
        ]);
    }

    // Reload start
    if input.reload && mind.state != PlayerState::Reloading && mind.ammo_capacity > mind.loaded_ammo {
        mind.state = PlayerState::Reloading;
        mind.reload_ends_at = ctx.now + settings.reload_secs;
        update.actions.push(PlayerAction::Animate(
            AnimTarget::Weapon,
            AnimSlot::Reload,
            AnimCue::PlayOnce,
        ));
    }

    // Melee
    if input.melee && ctx.now >= mind.melee_ready_at {
        mind.melee_ready_at = ctx.now + settings.melee_cooldown_secs;
        update.actions.extend([
            PlayerAction::MeleeSwing {
                hitbox: melee_hitbox(
                    ctx.position,
                    ctx.elevation,
                    update.facing,
                    settings.melee_range,
                    settings.melee_reach,
                ),
                damage: settings.melee_damage,
            },
            PlayerAction::Animate(AnimTarget::Body, AnimSlot::Melee, AnimCue::PlayOnce),
            PlayerAction::Animate(AnimTarget::Weapon, AnimSlot::Melee, AnimCue::PlayOnce),
        ]);
    }

    // Idle / running
    if mind.state != PlayerState::Reloading {
        mind.state = movement_state(intent);
    }
    let running = mind.state == PlayerState::Running;
    if running != (entry_state == PlayerState::Running) {
        let cue = if running { AnimCue::Start } else { AnimCue::Stop };
        update
            .actions
            .push(PlayerAction::Animate(AnimTarget::Body, AnimSlot::Run, cue));
    }

    update
}

fn movement_state(intent: Vec2) -> PlayerState {
    if intent == Vec2::ZERO {
        PlayerState::Idle
    } else {
        PlayerState::Running
    }
}

/// `count` directions fanned evenly around `facing`, `spread` radians apart.
pub fn volley_directions(facing: Vec2, count: u32, spread: f32) -> Vec<Vec2> {
    let center = (count as f32 - 1.0) / 2.0;
    (0..count)
        .map(|i| Vec2::from_angle((i as f32 - center) * spread).rotate(facing))
        .collect()
}

/// Apply damage to the player. Returns `Killed` exactly once.
pub fn apply_damage(mind: &mut PlayerMind, amount: f32) -> DamageOutcome {
    if mind.state == PlayerState::Dead {
        return DamageOutcome::Ignored;
    }
    mind.health -= amount;
    if mind.health > 0.0 {
        return DamageOutcome::Wounded;
    }
    mind.state = PlayerState::Dead;
    DamageOutcome::Killed
}
