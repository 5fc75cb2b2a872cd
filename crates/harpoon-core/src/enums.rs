//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Entity type tag. Numbering matches the per-type definition table, which
/// is indexed by `tag - 1` (tag 0 is reserved for the world map).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum EntityType {
    WorldMap = 0,
    TreeFoliage = 1,
    TreeDead = 2,
    Rock = 3,
    Shop = 4,
    Grass = 5,
    Crate = 6,
    Player = 7,
    EnemyStandard = 8,
    EnemyFast = 9,
    EnemyTank = 10,
    HarpoonWeapon = 11,
    HarpoonLoaded = 12,
    HarpoonProjectile = 13,
    BubbleProjectile = 14,
    BoltPickup = 15,
}

impl EntityType {
    pub const ALL: [EntityType; 16] = [
        EntityType::WorldMap,
        EntityType::TreeFoliage,
        EntityType::TreeDead,
        EntityType::Rock,
        EntityType::Shop,
        EntityType::Grass,
        EntityType::Crate,
        EntityType::Player,
        EntityType::EnemyStandard,
        EntityType::EnemyFast,
        EntityType::EnemyTank,
        EntityType::HarpoonWeapon,
        EntityType::HarpoonLoaded,
        EntityType::HarpoonProjectile,
        EntityType::BubbleProjectile,
        EntityType::BoltPickup,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }

    pub fn is_enemy(self) -> bool {
        self.enemy_archetype().is_some()
    }

    pub fn enemy_archetype(self) -> Option<EnemyArchetype> {
        match self {
            EntityType::EnemyStandard => Some(EnemyArchetype::Standard),
            EntityType::EnemyFast => Some(EnemyArchetype::Fast),
            EntityType::EnemyTank => Some(EnemyArchetype::Tank),
            _ => None,
        }
    }

    pub fn is_projectile(self) -> bool {
        matches!(
            self,
            EntityType::HarpoonProjectile | EntityType::BubbleProjectile
        )
    }

    /// Static level geometry (trees, rocks, the shop).
    pub fn is_scenery(self) -> bool {
        matches!(
            self,
            EntityType::TreeFoliage
                | EntityType::TreeDead
                | EntityType::Rock
                | EntityType::Shop
                | EntityType::Grass
        )
    }
}

impl TryFrom<u8> for EntityType {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        EntityType::from_tag(tag).ok_or_else(|| format!("unknown entity type tag {tag}"))
    }
}

impl From<EntityType> for u8 {
    fn from(kind: EntityType) -> u8 {
        kind.tag()
    }
}

/// Enemy archetype. Index order is the order of the wave quota tuples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    Standard,
    Fast,
    Tank,
}

impl EnemyArchetype {
    pub const ALL: [EnemyArchetype; 3] = [
        EnemyArchetype::Standard,
        EnemyArchetype::Fast,
        EnemyArchetype::Tank,
    ];

    /// Position in `[standard, fast, tank]` tuples.
    pub fn index(self) -> usize {
        match self {
            EnemyArchetype::Standard => 0,
            EnemyArchetype::Fast => 1,
            EnemyArchetype::Tank => 2,
        }
    }

    pub fn entity_type(self) -> EntityType {
        match self {
            EnemyArchetype::Standard => EntityType::EnemyStandard,
            EnemyArchetype::Fast => EntityType::EnemyFast,
            EnemyArchetype::Tank => EntityType::EnemyTank,
        }
    }
}

/// Enemy combat state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    ChasePlayer,
    MeleeAttack,
    /// Backing off into ranged band (standard archetype only).
    PositionForRanged,
    /// Winding up a bubble shot (standard archetype only).
    RangedAttack,
    Dead,
}

/// Player action state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    Running,
    Reloading,
    Dead,
}

/// Wave director stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveStage {
    #[default]
    Reset,
    /// Waiting for the crate to be broken.
    Idle,
    Beginning,
    InProgress,
    End,
}

/// Named animation slot. Each archetype's rig resolves the slots it has
/// once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimSlot {
    Run,
    Idle,
    Melee,
    Ranged,
    TakeDamage,
    Death,
    Reload,
    Shoot,
    Float,
}

impl AnimSlot {
    pub const COUNT: usize = 9;

    pub const ALL: [AnimSlot; AnimSlot::COUNT] = [
        AnimSlot::Run,
        AnimSlot::Idle,
        AnimSlot::Melee,
        AnimSlot::Ranged,
        AnimSlot::TakeDamage,
        AnimSlot::Death,
        AnimSlot::Reload,
        AnimSlot::Shoot,
        AnimSlot::Float,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// How an animation slot should be driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimCue {
    /// Resume looping playback.
    Start,
    Stop,
    /// Play to the end once, then stop.
    PlayOnce,
    /// One-shot trigger that keeps looping.
    PlayRepeated,
}
