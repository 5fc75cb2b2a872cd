//! Per-type static definition table.
//!
//! The host supplies one entry per entity type tag, in tag order starting at
//! tag 1 (tag 0 is the world map and never has an entry). Lookups index the
//! array by `tag - 1`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::components::BodyFlags;
use crate::enums::EntityType;
use crate::types::Aabb;

#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("definition table is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("tag 0 is reserved and cannot have a definition")]
    ReservedTag,
    #[error("entry {index} has tag {found}, expected {expected}")]
    TagMismatch { index: usize, expected: u8, found: u8 },
    #[error("tag {0} does not name an entity type")]
    UnknownTag(u8),
}

/// Default physics properties for one entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyProperties {
    pub velocity: Vec2,
    pub acceleration: f32,
    pub max_speed: f32,
    pub friction: f32,
    pub gravity: f32,
    pub scale: Vec3,
    pub flags: BodyFlags,
    pub bounding_box: Option<Aabb>,
    /// Contact damage (projectiles).
    pub damage: f32,
}

impl Default for BodyProperties {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration: 0.0,
            max_speed: 0.0,
            friction: 0.0,
            gravity: 0.0,
            scale: Vec3::ONE,
            flags: BodyFlags::default(),
            bounding_box: None,
            damage: 0.0,
        }
    }
}

impl BodyProperties {
    /// Copy of these defaults with every set override applied on top.
    pub fn with_overrides(&self, overrides: &PropertyOverrides) -> BodyProperties {
        let mut props = self.clone();
        if let Some(velocity) = overrides.velocity {
            props.velocity = velocity;
        }
        if let Some(acceleration) = overrides.acceleration {
            props.acceleration = acceleration;
        }
        if let Some(friction) = overrides.friction {
            props.friction = friction;
        }
        if let Some(max_speed) = overrides.max_speed {
            props.max_speed = max_speed;
        }
        if let Some(bounding_box) = overrides.bounding_box {
            props.bounding_box = Some(bounding_box);
        }
        if let Some(damage) = overrides.damage {
            props.damage = damage;
        }
        props
    }
}

/// Spawn-time overrides of a type's default properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyOverrides {
    pub velocity: Option<Vec2>,
    pub acceleration: Option<f32>,
    pub friction: Option<f32>,
    pub max_speed: Option<f32>,
    pub bounding_box: Option<Aabb>,
    pub damage: Option<f32>,
}

/// Asset references, opaque to the simulation and passed through for the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRefs {
    pub mesh: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub tag: u8,
    #[serde(default)]
    pub properties: BodyProperties,
    #[serde(default)]
    pub assets: AssetRefs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionTable {
    entries: Vec<TypeDefinition>,
}

impl DefinitionTable {
    /// Validate entries: entry `i` must carry tag `i + 1`.
    pub fn from_entries(entries: Vec<TypeDefinition>) -> Result<Self, DefinitionError> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.tag == 0 {
                return Err(DefinitionError::ReservedTag);
            }
            if EntityType::from_tag(entry.tag).is_none() {
                return Err(DefinitionError::UnknownTag(entry.tag));
            }
            let expected = (index + 1) as u8;
            if entry.tag != expected {
                return Err(DefinitionError::TagMismatch {
                    index,
                    expected,
                    found: entry.tag,
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let entries: Vec<TypeDefinition> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn to_json(&self) -> Result<String, DefinitionError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn get(&self, kind: EntityType) -> Option<&TypeDefinition> {
        let index = (kind.tag() as usize).checked_sub(1)?;
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The game's default table, covering every tag from 1 upward.
    pub fn builtin() -> Self {
        let entries = EntityType::ALL
            .iter()
            .filter(|kind| **kind != EntityType::WorldMap)
            .map(|kind| TypeDefinition {
                tag: kind.tag(),
                properties: builtin_properties(*kind),
                assets: builtin_assets(*kind),
            })
            .collect();
        Self { entries }
    }
}

/// Box standing on the ground, centred on the local origin.
fn ground_box(half_width: f32, height: f32) -> Option<Aabb> {
    Some(Aabb::new(
        Vec3::new(-half_width, 0.0, -half_width),
        Vec3::new(half_width, height, half_width),
    ))
}

fn obstacle() -> BodyFlags {
    BodyFlags {
        is_rigid: true,
        ..Default::default()
    }
}

fn builtin_properties(kind: EntityType) -> BodyProperties {
    let base = BodyProperties::default();
    match kind {
        EntityType::WorldMap | EntityType::Grass => base,
        EntityType::TreeFoliage | EntityType::TreeDead => BodyProperties {
            flags: obstacle(),
            bounding_box: ground_box(1.0, 6.0),
            ..base
        },
        EntityType::Rock => BodyProperties {
            flags: obstacle(),
            bounding_box: ground_box(1.5, 2.0),
            ..base
        },
        EntityType::Shop => BodyProperties {
            flags: obstacle(),
            bounding_box: ground_box(4.0, 5.0),
            ..base
        },
        EntityType::Crate => BodyProperties {
            flags: BodyFlags {
                is_dynamic: true,
                is_rigid: true,
                ..Default::default()
            },
            friction: 0.9,
            gravity: crate::constants::CRATE_GRAVITY,
            bounding_box: ground_box(1.0, 2.0),
            ..base
        },
        EntityType::Player => BodyProperties {
            acceleration: 50.0,
            max_speed: 10.0,
            friction: 0.99,
            flags: BodyFlags {
                is_dynamic: true,
                is_rigid: true,
                ..Default::default()
            },
            bounding_box: ground_box(0.5, 2.0),
            ..base
        },
        EntityType::EnemyStandard => enemy(30.0, 6.0, 0.95, 0.75, 2.0),
        EntityType::EnemyFast => enemy(60.0, 12.0, 0.95, 0.5, 1.5),
        EntityType::EnemyTank => enemy(15.0, 4.0, 0.97, 1.5, 3.0),
        // Carried items: positioned by their owner, never collide.
        EntityType::HarpoonWeapon | EntityType::HarpoonLoaded => base,
        EntityType::HarpoonProjectile => BodyProperties {
            flags: BodyFlags {
                is_dynamic: true,
                is_rigid: true,
                can_bypass_max_speed: true,
                avoid_displacement: true,
            },
            max_speed: crate::constants::HARPOON_SPEED,
            bounding_box: ground_box(0.3, 0.4),
            damage: 5.0,
            ..base
        },
        EntityType::BubbleProjectile => BodyProperties {
            acceleration: 6.0,
            max_speed: crate::constants::BUBBLE_SPEED,
            friction: 0.5,
            flags: BodyFlags {
                is_dynamic: true,
                is_rigid: true,
                avoid_displacement: true,
                ..Default::default()
            },
            bounding_box: ground_box(0.4, 0.8),
            damage: 1.0,
            ..base
        },
        EntityType::BoltPickup => BodyProperties {
            flags: BodyFlags {
                is_rigid: true,
                avoid_displacement: true,
                ..Default::default()
            },
            bounding_box: ground_box(0.5, 1.0),
            ..base
        },
    }
}

fn enemy(acceleration: f32, max_speed: f32, friction: f32, half_width: f32, height: f32) -> BodyProperties {
    BodyProperties {
        acceleration,
        max_speed,
        friction,
        flags: BodyFlags {
            is_dynamic: true,
            is_rigid: true,
            ..Default::default()
        },
        bounding_box: ground_box(half_width, height),
        ..BodyProperties::default()
    }
}

fn builtin_assets(kind: EntityType) -> AssetRefs {
    let name = match kind {
        EntityType::WorldMap => "world_map",
        EntityType::TreeFoliage => "tree_foliage",
        EntityType::TreeDead => "tree_dead",
        EntityType::Rock => "rock",
        EntityType::Shop => "shop",
        EntityType::Grass => "grass",
        EntityType::Crate => "crate",
        EntityType::Player => "player",
        EntityType::EnemyStandard => "enemy_standard",
        EntityType::EnemyFast => "enemy_fast",
        EntityType::EnemyTank => "enemy_tank",
        EntityType::HarpoonWeapon => "harpoon_weapon",
        EntityType::HarpoonLoaded => "harpoon_loaded",
        EntityType::HarpoonProjectile => "harpoon_projectile",
        EntityType::BubbleProjectile => "bubble",
        EntityType::BoltPickup => "bolt",
    };
    AssetRefs {
        mesh: Some(format!("models/{name}.gltf")),
        image: None,
    }
}
