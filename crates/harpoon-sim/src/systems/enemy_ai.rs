//! Enemy AI system: runs every enemy's FSM against the current player and
//! carries out the resulting actions once the sweep is done.

use hecs::{Entity, World};

use harpoon_ai::fsm::{self, EnemyAction, EnemyContext, TargetView};
use harpoon_ai::STRIKE_HEIGHT;
use harpoon_core::components::{Body, EnemyMind, PlayerMind};
use harpoon_core::constants::BUBBLE_SPEED;
use harpoon_core::definitions::PropertyOverrides;
use harpoon_core::enums::{EnemyArchetype, EntityType, PlayerState};

use super::{animation, combat, TickContext};
use crate::world_setup::{self, Spawn};

/// The living player as enemies see it.
fn target(world: &World, ctx: &TickContext) -> Option<(Entity, TargetView)> {
    world
        .query::<(&Body, &PlayerMind)>()
        .iter()
        .filter(|(entity, (_, mind))| mind.state != PlayerState::Dead && !ctx.despawn.contains(*entity))
        .find_map(|(entity, (body, _))| {
            let bounds = body.world_box()?;
            Some((
                entity,
                TargetView {
                    position: body.position,
                    bounds,
                },
            ))
        })
}

pub fn run(world: &mut World, ctx: &mut TickContext) {
    let player = target(world, ctx);
    let mut pending: Vec<(Entity, EnemyArchetype, EnemyAction)> = Vec::new();

    for (entity, (body, mind)) in world.query_mut::<(&mut Body, &mut EnemyMind)>() {
        if ctx.despawn.contains(entity) {
            continue;
        }
        let enemy_ctx = EnemyContext {
            now: ctx.now,
            dt: ctx.dt,
            position: body.position,
            elevation: body.elevation,
            facing: body.facing,
            player: player.map(|(_, view)| view),
            profile: ctx.tuning.enemies.profile(mind.archetype),
        };
        let update = fsm::evaluate(mind, &enemy_ctx);
        body.facing = update.facing;
        body.accel_intent = update.accel_intent;
        body.flags.avoid_displacement = update.avoid_displacement;
        let archetype = mind.archetype;
        pending.extend(update.actions.into_iter().map(|action| (entity, archetype, action)));
    }

    for (entity, archetype, action) in pending {
        match action {
            EnemyAction::Animate(slot, cue) => animation::cue(world, entity, slot, cue),
            EnemyAction::DamagePlayer(amount) => {
                if let Some((player, _)) = player {
                    combat::damage_player(world, player, amount, ctx);
                }
            }
            EnemyAction::FireBubble { origin, direction } => {
                let speed = ctx
                    .tuning
                    .enemies
                    .profile(archetype)
                    .ranged
                    .as_ref()
                    .map_or(BUBBLE_SPEED, |ranged| ranged.projectile_speed);
                let request = Spawn::new(EntityType::BubbleProjectile, origin)
                    .at_elevation(STRIKE_HEIGHT)
                    .facing(direction)
                    .with_overrides(PropertyOverrides {
                        velocity: Some(direction * speed),
                        ..PropertyOverrides::default()
                    });
                if let Err(err) = world_setup::spawn(world, ctx.definitions, ctx.tuning, request, ctx.events) {
                    log::error!("could not release bubble: {err}");
                }
            }
            EnemyAction::Remove => {
                ctx.despawn.mark(entity);
            }
        }
    }
}
