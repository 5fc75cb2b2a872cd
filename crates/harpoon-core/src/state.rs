//! Simulation snapshot: the visible state handed to the renderer and UI.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Quota;
use crate::enums::*;
use crate::types::{EntityId, Pose, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub wave: WaveView,
    pub player: Option<PlayerView>,
    /// Every live entity, ordered by id.
    pub entities: Vec<EntityView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave: u32,
    pub stage: WaveStage,
    pub quota: Quota,
    pub spawned: Quota,
    pub killed: Quota,
    /// Kills over total quota, in `[0, 1]`.
    pub progress: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: EntityId,
    pub state: PlayerState,
    pub health: f32,
    pub loaded_ammo: u32,
    pub ammo_capacity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityType,
    pub position: Vec2,
    pub elevation: f32,
    pub facing: Vec2,
    /// Composed animation offset (identity when nothing is playing).
    pub pose: Pose,
}
