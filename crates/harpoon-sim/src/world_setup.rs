//! Entity spawn factories for setting up the simulation world.
//!
//! Every entity gets a `Body` built from its type definition (with any
//! per-instance overrides applied), an animation rig, and whichever mind or
//! marker component its archetype family runs on.

use glam::Vec2;
use hecs::{Entity, EntityBuilder, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use harpoon_anim::AnimationRig;
use harpoon_core::components::*;
use harpoon_core::config::TuningConfig;
use harpoon_core::definitions::{DefinitionTable, PropertyOverrides};
use harpoon_core::enums::EntityType;
use harpoon_core::events::SimEvent;
use harpoon_core::types::EntityId;

use crate::error::SimError;

/// Scenery scattered around the arena: (type, count, min radius, max radius).
const ARENA_SCENERY: [(EntityType, u32, f32, f32); 4] = [
    (EntityType::TreeFoliage, 14, 20.0, 70.0),
    (EntityType::TreeDead, 6, 20.0, 70.0),
    (EntityType::Rock, 10, 12.0, 60.0),
    (EntityType::Grass, 20, 5.0, 60.0),
];

/// Where the shop stands relative to the player start.
const SHOP_POSITION: Vec2 = Vec2::new(12.0, 12.0);

pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

pub fn entity_of(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

/// A request to create one entity.
#[derive(Debug, Clone)]
pub struct Spawn {
    pub kind: EntityType,
    pub position: Vec2,
    pub elevation: f32,
    pub facing: Vec2,
    pub overrides: Option<PropertyOverrides>,
}

impl Spawn {
    pub fn new(kind: EntityType, position: Vec2) -> Self {
        Self {
            kind,
            position,
            elevation: 0.0,
            facing: Vec2::X,
            overrides: None,
        }
    }

    pub fn at_elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn facing(mut self, facing: Vec2) -> Self {
        self.facing = facing.try_normalize().unwrap_or(Vec2::X);
        self
    }

    pub fn with_overrides(mut self, overrides: PropertyOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }
}

/// Create an entity from its type definition.
///
/// A player also gets its weapon, spawned as a second entity mounted on it.
/// Emits one `EntitySpawned` per created entity.
pub fn spawn(
    world: &mut World,
    definitions: &DefinitionTable,
    tuning: &TuningConfig,
    request: Spawn,
    events: &mut Vec<SimEvent>,
) -> Result<Entity, SimError> {
    let definition = definitions
        .get(request.kind)
        .ok_or(SimError::MissingDefinition(request.kind))?;
    let properties = match &request.overrides {
        Some(overrides) => definition.properties.with_overrides(overrides),
        None => definition.properties.clone(),
    };

    let body = Body {
        kind: request.kind,
        position: request.position,
        elevation: request.elevation,
        vertical_speed: 0.0,
        facing: request.facing,
        velocity: properties.velocity,
        accel_intent: Vec2::ZERO,
        acceleration: properties.acceleration,
        max_speed: properties.max_speed,
        friction: properties.friction,
        gravity: properties.gravity,
        scale: properties.scale,
        flags: properties.flags,
        bounding_box: properties.bounding_box,
    };

    let mut builder = EntityBuilder::new();
    builder.add(body).add(AnimationRig::for_type(request.kind));

    let mut player_mind = None;
    match request.kind {
        EntityType::Player => {
            let settings = &tuning.player;
            let mut mind = PlayerMind::new(settings.health, settings.start_ammo_capacity);
            mind.base_acceleration = properties.acceleration;
            player_mind = Some(mind);
        }
        kind if kind.is_enemy() => {
            if let Some(archetype) = kind.enemy_archetype() {
                let profile = tuning.enemies.profile(archetype);
                builder.add(EnemyMind::new(archetype, profile.health));
            }
        }
        EntityType::HarpoonProjectile | EntityType::BubbleProjectile => {
            builder.add(Projectile {
                damage: properties.damage,
                phase: ProjectilePhase::InFlight,
            });
        }
        EntityType::Crate => {
            builder.add(Destructible {
                health: tuning.world.crate_health,
            });
        }
        EntityType::BoltPickup => {
            builder.add(Pickup);
        }
        _ => {}
    }

    let entity = world.spawn(builder.build());
    events.push(SimEvent::EntitySpawned {
        id: entity_id(entity),
        kind: request.kind,
    });
    log::debug!("spawned {:?} {} at {}", request.kind, entity_id(entity), request.position);

    if let Some(mut mind) = player_mind {
        let weapon = spawn(
            world,
            definitions,
            tuning,
            Spawn::new(EntityType::HarpoonWeapon, request.position)
                .at_elevation(request.elevation)
                .facing(request.facing),
            events,
        )?;
        world
            .insert_one(
                weapon,
                WeaponMount {
                    owner: entity_id(entity),
                },
            )
            .map_err(|_| SimError::UnknownEntity(entity_id(weapon)))?;
        mind.weapon = Some(entity_id(weapon));
        world
            .insert_one(entity, mind)
            .map_err(|_| SimError::UnknownEntity(entity_id(entity)))?;
    }

    Ok(entity)
}

/// Set up a fresh arena: the player at the origin, the shop, and scattered
/// scenery. Returns the player entity.
pub fn setup_arena(
    world: &mut World,
    definitions: &DefinitionTable,
    tuning: &TuningConfig,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) -> Result<Entity, SimError> {
    let player = spawn(
        world,
        definitions,
        tuning,
        Spawn::new(EntityType::Player, Vec2::ZERO),
        events,
    )?;
    spawn(
        world,
        definitions,
        tuning,
        Spawn::new(EntityType::Shop, SHOP_POSITION),
        events,
    )?;

    for (kind, count, min_radius, max_radius) in ARENA_SCENERY {
        for _ in 0..count {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let radius = rng.gen_range(min_radius..max_radius);
            let facing = Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU));
            spawn(
                world,
                definitions,
                tuning,
                Spawn::new(kind, Vec2::from_angle(angle) * radius).facing(facing),
                events,
            )?;
        }
    }
    Ok(player)
}
