//! Per-archetype animation rigs.
//!
//! A rig holds at most one animator per [`AnimSlot`], resolved when the
//! entity is created. Slots an archetype does not have stay empty, so a cue
//! for them is simply ignored.

use serde::{Deserialize, Serialize};

use harpoon_core::enums::{AnimCue, AnimSlot, EntityType};
use harpoon_core::types::Pose;

use crate::animator::{Animator, Keyframe};

const ONE: [f32; 3] = [1.0, 1.0, 1.0];
const ZERO: [f32; 3] = [0.0, 0.0, 0.0];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationRig {
    slots: [Option<Animator>; AnimSlot::COUNT],
}

impl AnimationRig {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The rig for an entity type (empty for types that never animate).
    pub fn for_type(kind: EntityType) -> Self {
        let mut rig = Self::empty();
        match kind {
            EntityType::Player => {
                rig.insert(AnimSlot::Run, player_run());
                rig.insert(AnimSlot::Melee, player_melee());
                rig.insert(AnimSlot::Shoot, player_shoot());
            }
            EntityType::HarpoonWeapon => {
                rig.insert(AnimSlot::Reload, weapon_reload());
                rig.insert(AnimSlot::Shoot, weapon_shoot());
                rig.insert(AnimSlot::Melee, weapon_melee());
            }
            EntityType::EnemyStandard => {
                rig.insert(AnimSlot::Death, standard_death());
                rig.insert(AnimSlot::TakeDamage, standard_take_damage());
                rig.insert(AnimSlot::Run, standard_run());
                rig.insert(AnimSlot::Melee, standard_melee());
                rig.insert(AnimSlot::Ranged, standard_ranged());
                rig.insert(AnimSlot::Idle, standard_idle());
            }
            EntityType::EnemyFast => {
                rig.insert(AnimSlot::Death, fast_death());
                rig.insert(AnimSlot::Run, fast_run());
                rig.insert(AnimSlot::Melee, fast_melee());
            }
            EntityType::EnemyTank => {
                rig.insert(AnimSlot::Death, tank_death());
                rig.insert(AnimSlot::TakeDamage, tank_take_damage());
                rig.insert(AnimSlot::Run, tank_run());
                rig.insert(AnimSlot::Melee, tank_melee());
            }
            EntityType::BoltPickup => {
                rig.insert(AnimSlot::Float, bolt_float());
            }
            _ => {}
        }
        rig
    }

    pub fn insert(&mut self, slot: AnimSlot, animator: Animator) {
        self.slots[slot.index()] = Some(animator);
    }

    pub fn has(&self, slot: AnimSlot) -> bool {
        self.slots[slot.index()].is_some()
    }

    pub fn slot(&self, slot: AnimSlot) -> Option<&Animator> {
        self.slots[slot.index()].as_ref()
    }

    pub fn slot_mut(&mut self, slot: AnimSlot) -> Option<&mut Animator> {
        self.slots[slot.index()].as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Drive a slot. Returns false when this rig has no such slot.
    pub fn cue(&mut self, slot: AnimSlot, cue: AnimCue) -> bool {
        let Some(animator) = self.slot_mut(slot) else {
            log::trace!("no {slot:?} animation on this rig");
            return false;
        };
        match cue {
            AnimCue::Start => animator.start_animation(),
            AnimCue::Stop => animator.stop_animation(),
            AnimCue::PlayOnce => animator.run_animation_until_end(),
            AnimCue::PlayRepeated => animator.run_animation_until_end_repeated(),
        }
        true
    }

    /// Halt every slot, one-shots included (used on death before the death
    /// track plays).
    pub fn stop_all(&mut self) {
        for animator in self.slots.iter_mut().flatten() {
            animator.halt();
        }
    }

    pub fn progress(&mut self, dt: f64) {
        for animator in self.slots.iter_mut().flatten() {
            animator.progress(dt);
        }
    }

    /// All slot offsets stacked in slot order.
    pub fn pose(&self) -> Pose {
        self.slots
            .iter()
            .flatten()
            .fold(Pose::IDENTITY, |acc, animator| acc.compose(&animator.pose()))
    }
}

fn kf(translation: [f32; 3], scale: [f32; 3], rotation: [f32; 3], duration: f64) -> Keyframe {
    Keyframe::from_parts(translation, scale, rotation, duration)
}

/// Four-beat bob shared by the player, tank and fast runners.
fn bob(label: &str, lift: f32, sway: f32, tilt: f32, beat: f64) -> Animator {
    Animator::new(
        label,
        vec![
            kf([0.0, lift, sway], ONE, [tilt, 0.0, 0.0], beat),
            kf(ZERO, ONE, ZERO, beat),
            kf([0.0, lift, -sway], ONE, [-tilt, 0.0, 0.0], beat),
            kf(ZERO, ONE, ZERO, beat),
        ],
    )
}

fn one_shot(label: &str, keyframes: Vec<Keyframe>) -> Animator {
    Animator::new(label, keyframes).with_stop_once_finished(true)
}

// --- Player ---

fn player_run() -> Animator {
    bob("run_animation", 0.5, 0.2, 5.0, 0.3)
}

fn player_melee() -> Animator {
    one_shot(
        "melee_animation",
        vec![
            kf([0.5, 0.0, 0.5], ONE, [10.0, 30.0, 0.0], 0.08),
            kf(ZERO, ONE, ZERO, 0.4),
        ],
    )
}

fn player_shoot() -> Animator {
    one_shot(
        "shoot_animation",
        vec![
            kf([-0.2, 0.0, 0.0], ONE, [0.0, 0.0, 3.0], 0.05),
            kf(ZERO, ONE, ZERO, 0.2),
        ],
    )
}

// --- Harpoon gun ---

fn weapon_reload() -> Animator {
    one_shot(
        "reload_animation",
        vec![
            kf([0.0, -0.5, 0.0], ONE, [0.0, 0.0, 20.0], 0.3),
            kf(ZERO, ONE, ZERO, 0.3),
        ],
    )
}

fn weapon_shoot() -> Animator {
    one_shot(
        "shoot_animation",
        vec![
            kf([-1.0, 0.0, 0.0], ONE, ZERO, 0.05),
            kf(ZERO, ONE, ZERO, 0.2),
        ],
    )
}

fn weapon_melee() -> Animator {
    one_shot(
        "melee_animation",
        vec![
            kf([1.5, 0.0, -1.0], ONE, [0.0, 40.0, 0.0], 0.08),
            kf(ZERO, ONE, ZERO, 0.4),
        ],
    )
}

// --- Standard enemy ---

fn standard_death() -> Animator {
    Animator::new(
        "death_animation",
        vec![
            kf([0.0, -0.5, 0.0], ONE, [-90.0, 0.0, 0.0], 1.0),
            kf([0.0, -3.0, 0.0], ONE, [-90.0, 0.0, 0.0], 4.0),
        ],
    )
}

fn standard_take_damage() -> Animator {
    Animator::new(
        "take_damage_animation",
        vec![
            kf([0.0, 0.0, -0.4], ONE, [-10.0, 0.0, 0.0], 0.1),
            kf(ZERO, ONE, ZERO, 0.3),
        ],
    )
}

fn standard_run() -> Animator {
    Animator::new(
        "run_animation",
        vec![
            kf(ZERO, ONE, [0.0, 10.0, 0.0], 0.5),
            kf(ZERO, ONE, ZERO, 0.5),
            kf(ZERO, ONE, [0.0, -10.0, 0.0], 0.5),
            kf(ZERO, ONE, ZERO, 0.5),
        ],
    )
    .playing()
}

fn standard_melee() -> Animator {
    one_shot(
        "melee_animation",
        vec![
            kf([0.0, 0.0, 1.0], ONE, [30.0, 20.0, 0.0], 0.3),
            kf(ZERO, ONE, ZERO, 0.6),
        ],
    )
}

fn standard_ranged() -> Animator {
    one_shot(
        "ranged_animation",
        vec![
            kf([0.0, 0.5, 0.0], [2.0, 1.5, 1.0], ZERO, 1.0),
            kf(ZERO, ONE, ZERO, 0.1),
        ],
    )
}

fn standard_idle() -> Animator {
    Animator::new(
        "idle_animation",
        vec![
            kf(ZERO, [1.2, 1.2, 1.0], ZERO, 1.5),
            kf(ZERO, ONE, ZERO, 1.5),
        ],
    )
}

// --- Fast enemy ---

fn fast_death() -> Animator {
    Animator::new(
        "death_animation",
        vec![
            kf(ZERO, ONE, [-30.0, 360.0, 0.0], 0.3),
            kf([0.0, -6.0, 0.0], ONE, [-30.0, 2880.0, 0.0], 4.0),
        ],
    )
}

fn fast_run() -> Animator {
    bob("run_animation", 0.5, 0.2, 5.0, 0.1).playing()
}

fn fast_melee() -> Animator {
    Animator::new(
        "melee_animation",
        vec![
            kf([0.0, 0.0, 2.0], [1.2, 1.0, 1.0], [0.0, 360.0, 0.0], 0.3),
            kf(ZERO, ONE, ZERO, 0.5),
        ],
    )
}

// --- Tank enemy ---

fn tank_death() -> Animator {
    Animator::new(
        "death_animation",
        vec![kf([-50.0, 60.0, 0.0], ONE, [0.0, 0.0, 1440.0], 5.0)],
    )
}

fn tank_take_damage() -> Animator {
    Animator::new(
        "take_damage_animation",
        vec![
            kf([-0.5, 0.0, 0.0], ONE, [0.0, 0.0, 5.0], 0.1),
            kf(ZERO, ONE, ZERO, 0.3),
        ],
    )
}

fn tank_run() -> Animator {
    bob("run_animation", 0.5, 0.2, 5.0, 0.5).playing()
}

fn tank_melee() -> Animator {
    Animator::new(
        "melee_animation",
        vec![
            kf([0.0, 0.0, 2.0], [1.2, 1.0, 1.0], [0.0, 0.0, -20.0], 0.5),
            kf(ZERO, ONE, ZERO, 0.5),
        ],
    )
}

// --- Pickups ---

fn bolt_float() -> Animator {
    Animator::new(
        "floating_animation",
        vec![
            kf([0.0, 2.0, 0.0], ONE, [0.0, 180.0, 0.0], 5.0),
            kf(ZERO, ONE, [0.0, 360.0, 0.0], 5.0),
        ],
    )
    .playing()
}
