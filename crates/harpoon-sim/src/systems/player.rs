//! Player system: runs the player FSM and carries out its actions.

use hecs::{Entity, World};

use harpoon_ai::player::{self, AnimTarget, PlayerAction, PlayerContext, PlayerInput};
use harpoon_ai::STRIKE_HEIGHT;
use harpoon_core::components::{Body, PlayerMind};
use harpoon_core::definitions::PropertyOverrides;
use harpoon_core::enums::EntityType;
use harpoon_core::events::SimEvent;

use super::{animation, combat, TickContext};
use crate::world_setup::{self, entity_of, Spawn};

pub fn run(world: &mut World, input: &PlayerInput, ctx: &mut TickContext) {
    let Some(entity) = world
        .query::<&PlayerMind>()
        .iter()
        .map(|(entity, _)| entity)
        .find(|entity| !ctx.despawn.contains(*entity))
    else {
        return;
    };

    let (update, weapon) = {
        let Ok((body, mind)) = world.query_one_mut::<(&mut Body, &mut PlayerMind)>(entity) else {
            return;
        };
        let player_ctx = PlayerContext {
            now: ctx.now,
            position: body.position,
            elevation: body.elevation,
            facing: body.facing,
            input,
            settings: &ctx.tuning.player,
        };
        let update = player::evaluate(mind, &player_ctx);
        body.facing = update.facing;
        body.accel_intent = update.accel_intent;
        body.acceleration = mind.base_acceleration * update.acceleration_scale;
        body.flags.can_bypass_max_speed = update.bypass_max_speed;
        (update, mind.weapon.and_then(entity_of))
    };

    for action in update.actions {
        match action {
            PlayerAction::Animate(AnimTarget::Body, slot, cue) => animation::cue(world, entity, slot, cue),
            PlayerAction::Animate(AnimTarget::Weapon, slot, cue) => {
                if let Some(weapon) = weapon {
                    animation::cue(world, weapon, slot, cue);
                }
            }
            PlayerAction::FireVolley { origin, directions } => {
                fire_volley(world, origin, &directions, ctx);
            }
            PlayerAction::MeleeSwing { hitbox, damage } => {
                let targets: Vec<Entity> = world
                    .query::<&Body>()
                    .iter()
                    .filter(|(target, body)| {
                        *target != entity
                            && body.flags.is_rigid
                            && !ctx.despawn.contains(*target)
                            && body.world_box().is_some_and(|bounds| bounds.intersects(&hitbox))
                    })
                    .map(|(target, _)| target)
                    .collect();
                for target in targets {
                    combat::strike(world, target, damage, ctx);
                }
            }
            PlayerAction::AmmoChanged { loaded, capacity } => {
                ctx.events.push(SimEvent::AmmoChanged { loaded, capacity });
            }
        }
    }
}

fn fire_volley(world: &mut World, origin: glam::Vec2, directions: &[glam::Vec2], ctx: &mut TickContext) {
    let speed = ctx.tuning.player.harpoon_speed;
    for &direction in directions {
        let request = Spawn::new(EntityType::HarpoonProjectile, origin)
            .at_elevation(STRIKE_HEIGHT)
            .facing(direction)
            .with_overrides(PropertyOverrides {
                velocity: Some(direction * speed),
                ..PropertyOverrides::default()
            });
        if let Err(err) = world_setup::spawn(world, ctx.definitions, ctx.tuning, request, ctx.events) {
            log::error!("could not launch harpoon: {err}");
            return;
        }
    }
}
