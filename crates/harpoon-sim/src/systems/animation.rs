//! Animation system: advances every rig and routes cues to entities.

use hecs::{Entity, World};

use harpoon_anim::AnimationRig;
use harpoon_core::enums::{AnimCue, AnimSlot};

pub fn run(world: &mut World, dt: f64) {
    for (_entity, rig) in world.query_mut::<&mut AnimationRig>() {
        rig.progress(dt);
    }
}

/// Drive one slot of an entity's rig. Entities without the slot ignore it.
pub fn cue(world: &mut World, entity: Entity, slot: AnimSlot, cue: AnimCue) {
    if let Ok(mut rig) = world.get::<&mut AnimationRig>(entity) {
        rig.cue(slot, cue);
    }
}
