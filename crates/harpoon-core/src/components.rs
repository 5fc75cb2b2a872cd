//! ECS components for hecs entities.
//!
//! Every simulated object carries one [`Body`]; the behaviour it runs is
//! decided by which of the other components it also carries (one per
//! archetype family). Game logic lives in systems and in the AI crate.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{world_matrix, Aabb, EntityId};

/// Participation flags for integration and collision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyFlags {
    /// Integrated every tick.
    pub is_dynamic: bool,
    /// Acts as an obstacle in the collision sweep.
    pub is_rigid: bool,
    /// Speed cap is not enforced (dash, projectiles).
    pub can_bypass_max_speed: bool,
    /// Contacts are reported but never pushed apart.
    pub avoid_displacement: bool,
}

/// Kinematic and spatial state shared by every entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub kind: EntityType,
    pub position: Vec2,
    pub elevation: f32,
    /// Vertical speed on the elevation axis (positive is up).
    pub vertical_speed: f32,
    /// Unit facing direction on the ground plane.
    pub facing: Vec2,
    pub velocity: Vec2,
    /// Desired acceleration direction (zero means coast).
    pub accel_intent: Vec2,
    /// Acceleration magnitude applied along the intent.
    pub acceleration: f32,
    pub max_speed: f32,
    /// Fraction of speed lost per second while coasting or over the cap.
    pub friction: f32,
    /// Downward acceleration on the elevation axis; zero keeps elevation fixed.
    pub gravity: f32,
    pub scale: Vec3,
    pub flags: BodyFlags,
    /// Local-space box; `None` means the entity never collides.
    pub bounding_box: Option<Aabb>,
}

impl Body {
    pub fn world_matrix(&self) -> Mat4 {
        world_matrix(self.position, self.elevation, self.facing, self.scale)
    }

    /// World-space bounding box, if the entity has one.
    pub fn world_box(&self) -> Option<Aabb> {
        self.bounding_box
            .map(|local| local.transformed(&self.world_matrix()))
    }
}

/// Combat brain of an enemy. All timers are absolute simulation-time deadlines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyMind {
    pub archetype: EnemyArchetype,
    pub state: EnemyState,
    pub health: f32,
    /// End of the current melee swing.
    pub melee_ends_at: f64,
    /// Instant of the single hit-scan inside the swing.
    pub melee_hit_at: f64,
    /// Hit-scan already performed for this swing.
    pub melee_resolved: bool,
    /// Hit-scan of this swing connected.
    pub melee_landed: bool,
    /// Earliest time a new swing may start.
    pub melee_ready_at: f64,
    /// Give-up deadline while positioning for a ranged shot.
    pub ranged_window_ends_at: f64,
    /// End of the ranged wind-up (projectile release).
    pub ranged_fire_at: f64,
    /// Removal deadline once dead.
    pub remove_at: f64,
}

impl EnemyMind {
    pub fn new(archetype: EnemyArchetype, health: f32) -> Self {
        Self {
            archetype,
            state: EnemyState::ChasePlayer,
            health,
            melee_ends_at: 0.0,
            melee_hit_at: 0.0,
            melee_resolved: false,
            melee_landed: false,
            melee_ready_at: 0.0,
            ranged_window_ends_at: 0.0,
            ranged_fire_at: 0.0,
            remove_at: 0.0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }
}

/// Player brain: action state, health, ammunition and cooldown deadlines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMind {
    pub state: PlayerState,
    pub health: f32,
    /// Harpoons currently chambered.
    pub loaded_ammo: u32,
    /// Maximum chambered harpoons (grows with bolt pickups).
    pub ammo_capacity: u32,
    pub reload_ends_at: f64,
    pub melee_ready_at: f64,
    pub dash_ready_at: f64,
    pub dash_ends_at: f64,
    /// Acceleration outside a dash.
    pub base_acceleration: f32,
    /// The weapon entity this player owns.
    pub weapon: Option<EntityId>,
}

impl PlayerMind {
    pub fn new(health: f32, ammo_capacity: u32) -> Self {
        Self {
            state: PlayerState::Idle,
            health,
            loaded_ammo: 0,
            ammo_capacity,
            reload_ends_at: 0.0,
            melee_ready_at: 0.0,
            dash_ready_at: 0.0,
            dash_ends_at: 0.0,
            base_acceleration: 0.0,
            weapon: None,
        }
    }
}

/// Flight state of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectilePhase {
    InFlight,
    /// Stuck in `host` at a fixed ground-plane offset; neither dynamic nor rigid.
    Embedded {
        host: EntityId,
        offset: Vec2,
        expires_at: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub damage: f32,
    pub phase: ProjectilePhase,
}

/// Something that can be broken (crates).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Destructible {
    pub health: f32,
}

/// A weapon carried by its owner; positioned on the owner every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponMount {
    pub owner: EntityId,
}

/// Marks a collectible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup;
