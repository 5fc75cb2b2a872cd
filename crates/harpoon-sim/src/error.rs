//! Errors returned by the engine's public API.
//!
//! Gameplay anomalies inside a tick are never errors; they are handled in
//! place and logged.

use harpoon_core::enums::EntityType;
use harpoon_core::types::EntityId;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("negative time step: {0}s")]
    NegativeDelta(f64),
    #[error("simulation time went backwards: {now}s after {last}s")]
    NonMonotonicTime { now: f64, last: f64 },
    #[error("no definition for entity type {0:?}")]
    MissingDefinition(EntityType),
    #[error("no live entity {0}")]
    UnknownEntity(EntityId),
}
