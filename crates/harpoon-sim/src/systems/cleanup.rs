//! Cleanup system: despawns every entity scheduled for removal this tick.
//!
//! Removal is deferred so that contact resolution and AI never observe a
//! half-removed entity. Scheduling is idempotent: an entity marked twice is
//! despawned and reported once.

use std::collections::HashSet;

use hecs::{Entity, World};

use harpoon_core::components::{Body, EnemyMind};
use harpoon_core::events::SimEvent;

use super::wave_director::WaveDirector;
use crate::world_setup::entity_id;

/// Entities awaiting removal at the end of the tick, in scheduling order.
#[derive(Debug, Default)]
pub struct DespawnQueue {
    order: Vec<Entity>,
    marked: HashSet<Entity>,
}

impl DespawnQueue {
    /// Schedule `entity`. Returns false if it was already scheduled.
    pub fn mark(&mut self, entity: Entity) -> bool {
        if !self.marked.insert(entity) {
            return false;
        }
        self.order.push(entity);
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.marked.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Despawn collected entities and report each removal.
pub fn run(
    world: &mut World,
    despawn: &mut DespawnQueue,
    director: &mut WaveDirector,
    events: &mut Vec<SimEvent>,
) {
    for entity in despawn.order.drain(..) {
        let Ok(kind) = world.get::<&Body>(entity).map(|body| body.kind) else {
            continue;
        };
        // An enemy removed before dying (culled, or removed by the host)
        // still counts toward the wave so the wave can finish.
        let living_enemy = world
            .get::<&EnemyMind>(entity)
            .ok()
            .filter(|mind| !mind.is_dead())
            .map(|mind| mind.archetype);
        if let Some(archetype) = living_enemy {
            director.record_kill(entity_id(entity), archetype);
        }

        if world.despawn(entity).is_ok() {
            log::debug!("removed {kind:?} {}", entity_id(entity));
            events.push(SimEvent::EntityRemoved {
                id: entity_id(entity),
                kind,
            });
        }
    }
    despawn.marked.clear();
}
