//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, applies queued player
//! commands, runs all systems once per host tick, and produces
//! `SimSnapshot`s. It has no clock of its own: the host supplies the
//! simulation time and step of every tick, and the same seed plus the same
//! sequence of calls always yields the same snapshots.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use harpoon_ai::player::PlayerInput;
use harpoon_core::commands::PlayerCommand;
use harpoon_core::components::Body;
use harpoon_core::config::TuningConfig;
use harpoon_core::definitions::{DefinitionTable, PropertyOverrides};
use harpoon_core::enums::EntityType;
use harpoon_core::events::SimEvent;
use harpoon_core::state::SimSnapshot;
use harpoon_core::types::{EntityId, SimTime};

use crate::error::SimError;
use crate::systems;
use crate::systems::cleanup::DespawnQueue;
use crate::systems::wave_director::WaveDirector;
use crate::systems::TickContext;
use crate::world_setup::{self, entity_id, entity_of, Spawn};

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    tuning: TuningConfig,
    definitions: DefinitionTable,
    command_queue: VecDeque<PlayerCommand>,
    input: PlayerInput,
    despawn: DespawnQueue,
    events: Vec<SimEvent>,
    director: WaveDirector,
}

impl SimulationEngine {
    /// Create an engine with an empty world.
    pub fn new(config: SimConfig, tuning: TuningConfig, definitions: DefinitionTable) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tuning,
            definitions,
            command_queue: VecDeque::new(),
            input: PlayerInput::default(),
            despawn: DespawnQueue::default(),
            events: Vec::new(),
            director: WaveDirector::default(),
        }
    }

    /// Engine with default tuning and the built-in definition table.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SimConfig { seed }, TuningConfig::default(), DefinitionTable::builtin())
    }

    /// Populate the arena (player, shop, scenery). Returns the player id.
    pub fn setup_arena(&mut self) -> Result<EntityId, SimError> {
        let player = world_setup::setup_arena(
            &mut self.world,
            &self.definitions,
            &self.tuning,
            &mut self.rng,
            &mut self.events,
        )?;
        Ok(entity_id(player))
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation to `sim_time`, `dt` seconds after the previous
    /// tick. A rejected call leaves the simulation untouched.
    pub fn update(&mut self, sim_time: f64, dt: f64) -> Result<(), SimError> {
        if dt.is_nan() || dt < 0.0 {
            return Err(SimError::NegativeDelta(dt));
        }
        if sim_time.is_nan() || sim_time < self.time.elapsed_secs {
            return Err(SimError::NonMonotonicTime {
                now: sim_time,
                last: self.time.elapsed_secs,
            });
        }

        self.process_commands();
        self.run_systems(sim_time, dt);
        self.time.advance(sim_time);
        Ok(())
    }

    /// Create an entity of `kind` at a ground position, elevation and
    /// heading (radians counter-clockwise from +x), optionally overriding
    /// type-default physics properties.
    pub fn create_entity(
        &mut self,
        kind: EntityType,
        position: Vec2,
        elevation: f32,
        rotation: f32,
        overrides: Option<PropertyOverrides>,
    ) -> Result<EntityId, SimError> {
        let mut request = Spawn::new(kind, position)
            .at_elevation(elevation)
            .facing(Vec2::from_angle(rotation));
        request.overrides = overrides;
        let entity = world_setup::spawn(
            &mut self.world,
            &self.definitions,
            &self.tuning,
            request,
            &mut self.events,
        )?;
        Ok(entity_id(entity))
    }

    /// Remove an entity right away. Returns false if it was already gone;
    /// removing twice is harmless.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(entity) = entity_of(id).filter(|entity| self.world.contains(*entity)) else {
            return false;
        };
        if !self.despawn.mark(entity) {
            return false;
        }
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn,
            &mut self.director,
            &mut self.events,
        );
        true
    }

    /// Copy of an entity's body.
    pub fn body(&self, id: EntityId) -> Result<Body, SimError> {
        entity_of(id)
            .and_then(|entity| self.world.get::<&Body>(entity).ok().map(|body| (*body).clone()))
            .ok_or(SimError::UnknownEntity(id))
    }

    /// Take every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Visible state for the renderer and UI.
    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.director)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &TuningConfig {
        &self.tuning
    }

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn director_mut(&mut self) -> &mut WaveDirector {
        &mut self.director
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Move { intent } => {
                if intent.is_finite() {
                    self.input.move_intent = intent;
                } else {
                    log::warn!("ignoring non-finite move intent {intent}");
                }
            }
            PlayerCommand::Face { direction } => {
                if direction.is_finite() {
                    self.input.face = Some(direction);
                } else {
                    log::warn!("ignoring non-finite facing {direction}");
                }
            }
            PlayerCommand::Fire => self.input.fire = true,
            PlayerCommand::Melee => self.input.melee = true,
            PlayerCommand::Reload => self.input.reload = true,
            PlayerCommand::Dash => self.input.dash = true,
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, now: f64, dt: f64) {
        let mut ctx = TickContext {
            now,
            dt,
            tuning: &self.tuning,
            definitions: &self.definitions,
            rng: &mut self.rng,
            events: &mut self.events,
            director: &mut self.director,
            despawn: &mut self.despawn,
        };
        // 1. Wave director (crate drop, wave start, enemy spawning)
        systems::wave_director::run(&mut self.world, &mut ctx);
        // 2. Player FSM and actions
        systems::player::run(&mut self.world, &self.input, &mut ctx);
        // 3. Enemy AI
        systems::enemy_ai::run(&mut self.world, &mut ctx);
        // 4. Projectile steering, embedded projectiles
        systems::projectile::run(&mut self.world, &mut ctx);
        // 5. Movement integration
        systems::movement::run(&mut self.world, &mut ctx);
        // 6. Collision sweep and contact effects
        systems::collision::run(&mut self.world, &mut ctx);
        // 7. Weapons follow their owners
        systems::weapon::run(&mut self.world, &mut ctx);
        // 8. Animation
        systems::animation::run(&mut self.world, dt);
        // 9. Cleanup (removed, culled, broken, expired)
        systems::cleanup::run(&mut self.world, ctx.despawn, ctx.director, ctx.events);

        self.input.clear_actions();
    }
}
