//! Events produced by the simulation for the host and UI.
//!
//! Events accumulate during a tick and are drained by the host with
//! `SimulationEngine::drain_events`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Quota;
use crate::enums::EntityType;
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new entity exists; the host attaches its scene node.
    EntitySpawned { id: EntityId, kind: EntityType },
    /// An entity's slot was cleared; the host detaches its scene node.
    EntityRemoved { id: EntityId, kind: EntityType },
    /// An enemy entered its death state. Fired once per enemy.
    EnemyKilled { id: EntityId, kind: EntityType },
    CrateBroken { position: Vec2 },
    /// A bolt pickup raised the player's ammo capacity.
    BoltPickedUp { capacity: u32 },
    WaveStarted { wave: u32, quota: Quota },
    /// Kills over total quota, in `[0, 1]`.
    WaveProgress { wave: u32, fraction: f32 },
    WaveCleared { wave: u32 },
    /// Loaded ammo changed (UI iconography).
    AmmoChanged { loaded: u32, capacity: u32 },
    PlayerDamaged { health: f32 },
    /// Player health reached zero. Fired once.
    PlayerKilled,
}
