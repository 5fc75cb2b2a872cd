//! Wave director: paces enemy spawning and wave progression.
//!
//! `Reset → Idle → Beginning → InProgress → End → Reset`. A crate drops at
//! reset; breaking it starts the next wave. Spawns are due at one enemy per
//! spawn delay of wave time, so the spawn count over an interval does not
//! depend on the tick rate.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use harpoon_core::config::{Quota, WaveSettings};
use harpoon_core::enums::{EnemyArchetype, EntityType, WaveStage};
use harpoon_core::events::SimEvent;
use harpoon_core::state::WaveView;
use harpoon_core::types::EntityId;

use super::{living_player, TickContext};
use crate::world_setup::{self, entity_id, Spawn};

/// Absorbs float drift in the accumulated wave time.
const SPAWN_EPSILON: f64 = 1e-9;

/// Wave state. Kill and pickup notifications are pushed in by the combat and
/// cleanup systems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveDirector {
    pub stage: WaveStage,
    /// Current wave number (0 before the first wave).
    pub wave: u32,
    pub quota: Quota,
    pub spawned: Quota,
    pub killed: Quota,
    /// Wave time fed to the spawn pacing, and the spawns it has paid out.
    spawn_elapsed: f64,
    spawns_due: u32,
    crate_broken: bool,
    reported_kills: u32,
    /// Spawn angle of every living tank, in spawn order.
    tank_angles: Vec<(EntityId, f32)>,
}

impl WaveDirector {
    /// Jump straight into `wave` with an explicit quota.
    pub fn begin_wave(&mut self, wave: u32, quota: Quota) {
        self.stage = WaveStage::InProgress;
        self.wave = wave;
        self.quota = quota;
        self.spawned = Quota::default();
        self.killed = Quota::default();
        self.spawn_elapsed = 0.0;
        self.spawns_due = 0;
        self.reported_kills = 0;
        self.tank_angles.clear();
    }

    pub fn record_kill(&mut self, id: EntityId, archetype: EnemyArchetype) {
        *self.killed.get_mut(archetype) += 1;
        if archetype == EnemyArchetype::Tank {
            self.forget_tank(id);
        }
    }

    pub fn notify_crate_broken(&mut self) {
        self.crate_broken = true;
    }

    pub fn forget_tank(&mut self, id: EntityId) {
        self.tank_angles.retain(|(tank, _)| *tank != id);
    }

    pub fn tank_angle(&self, id: EntityId) -> Option<f32> {
        self.tank_angles
            .iter()
            .find(|(tank, _)| *tank == id)
            .map(|(_, angle)| *angle)
    }

    /// Kills over total quota, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let total = self.quota.total();
        if total == 0 {
            return 1.0;
        }
        (self.killed.total() as f32 / total as f32).min(1.0)
    }

    pub fn remaining(&self, archetype: EnemyArchetype) -> u32 {
        self.quota
            .get(archetype)
            .saturating_sub(self.spawned.get(archetype))
    }

    fn remaining_total(&self) -> u32 {
        EnemyArchetype::ALL
            .iter()
            .map(|archetype| self.remaining(*archetype))
            .sum()
    }

    /// Advance the spawn clock by `dt` and take the spawns that fell due,
    /// capped by what is left of the quota. The count comes from the total
    /// elapsed time, not from per-tick fractions.
    pub fn take_spawn_budget(&mut self, dt: f64, spawn_delay_secs: f64) -> u32 {
        let remaining = self.remaining_total();
        if spawn_delay_secs <= 0.0 {
            return remaining;
        }
        self.spawn_elapsed += dt;
        let due = (self.spawn_elapsed / spawn_delay_secs + SPAWN_EPSILON).floor() as u32;
        let fresh = due.saturating_sub(self.spawns_due);
        self.spawns_due = due;
        fresh.min(remaining)
    }

    /// Tanks first; otherwise the less satisfied of standard and fast, with
    /// ties broken at random.
    pub fn choose_archetype(&self, rng: &mut ChaCha8Rng) -> Option<EnemyArchetype> {
        if self.remaining(EnemyArchetype::Tank) > 0 {
            return Some(EnemyArchetype::Tank);
        }
        let standard = self.remaining(EnemyArchetype::Standard) > 0;
        let fast = self.remaining(EnemyArchetype::Fast) > 0;
        match (standard, fast) {
            (false, false) => None,
            (true, false) => Some(EnemyArchetype::Standard),
            (false, true) => Some(EnemyArchetype::Fast),
            (true, true) => {
                let standard_done = self.satisfaction(EnemyArchetype::Standard);
                let fast_done = self.satisfaction(EnemyArchetype::Fast);
                if standard_done < fast_done {
                    Some(EnemyArchetype::Standard)
                } else if fast_done < standard_done {
                    Some(EnemyArchetype::Fast)
                } else if rng.gen_bool(0.5) {
                    Some(EnemyArchetype::Standard)
                } else {
                    Some(EnemyArchetype::Fast)
                }
            }
        }
    }

    fn satisfaction(&self, archetype: EnemyArchetype) -> f64 {
        match self.quota.get(archetype) {
            0 => 1.0,
            quota => self.spawned.get(archetype) as f64 / quota as f64,
        }
    }

    /// Spawn bearing around the player: usually near a living tank when
    /// there is one, otherwise uniform.
    fn spawn_angle(&self, rng: &mut ChaCha8Rng, settings: &WaveSettings) -> f32 {
        if !self.tank_angles.is_empty() && rng.gen_bool(settings.spawn_near_tank_chance.clamp(0.0, 1.0)) {
            let (_, base) = self.tank_angles[rng.gen_range(0..self.tank_angles.len())];
            return base + jitter(rng, settings.tank_angle_jitter);
        }
        rng.gen_range(0.0..std::f32::consts::TAU)
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            wave: self.wave,
            stage: self.stage,
            quota: self.quota,
            spawned: self.spawned,
            killed: self.killed,
            progress: self.progress(),
        }
    }

    fn clear_wave(&mut self) {
        self.quota = Quota::default();
        self.spawned = Quota::default();
        self.killed = Quota::default();
        self.spawn_elapsed = 0.0;
        self.spawns_due = 0;
        self.reported_kills = 0;
        self.tank_angles.clear();
    }
}

fn jitter(rng: &mut ChaCha8Rng, amount: f32) -> f32 {
    if amount > 0.0 {
        rng.gen_range(-amount..amount)
    } else {
        0.0
    }
}

/// Advance the director by one tick.
pub fn run(world: &mut World, ctx: &mut TickContext) {
    match ctx.director.stage {
        WaveStage::Reset => drop_crate(world, ctx),
        WaveStage::Idle => {
            if std::mem::take(&mut ctx.director.crate_broken) {
                ctx.director.stage = WaveStage::Beginning;
            }
        }
        WaveStage::Beginning => {
            let wave = ctx.director.wave + 1;
            let quota = ctx.tuning.wave.quota_for(wave);
            ctx.director.begin_wave(wave, quota);
            log::info!("wave {wave} started, quota {:?}", quota.0);
            ctx.events.push(SimEvent::WaveStarted { wave, quota });
        }
        WaveStage::InProgress => {
            spawn_enemies(world, ctx);
            report_progress(ctx);
        }
        WaveStage::End => {
            ctx.director.clear_wave();
            ctx.director.stage = WaveStage::Reset;
        }
    }
}

/// Drop the crate that starts the next wave, plus a bolt on bonus waves.
fn drop_crate(world: &mut World, ctx: &mut TickContext) {
    ctx.director.crate_broken = false;
    let tuning = ctx.tuning;
    let settings = &tuning.wave;
    let center = living_player(world, ctx.despawn).map_or(Vec2::ZERO, |(_, position)| position);
    let bearing = Vec2::from_angle(ctx.rng.gen_range(0.0..std::f32::consts::TAU));
    let position = center + bearing * settings.crate_spawn_distance;

    let dropped = world_setup::spawn(
        world,
        ctx.definitions,
        tuning,
        Spawn::new(EntityType::Crate, position).at_elevation(settings.crate_drop_height),
        ctx.events,
    );
    if let Err(err) = dropped {
        log::error!("could not drop the wave crate: {err}; starting the wave directly");
        ctx.director.stage = WaveStage::Beginning;
        return;
    }

    let upcoming = ctx.director.wave + 1;
    if settings.is_bolt_wave(upcoming) {
        let bolt = Spawn::new(EntityType::BoltPickup, position + Vec2::new(settings.bolt_offset, 0.0));
        if let Err(err) = world_setup::spawn(world, ctx.definitions, tuning, bolt, ctx.events) {
            log::error!("could not place the bolt pickup: {err}");
        }
    }
    log::info!("crate dropped for wave {upcoming}");
    ctx.director.stage = WaveStage::Idle;
}

fn spawn_enemies(world: &mut World, ctx: &mut TickContext) {
    let tuning = ctx.tuning;
    let settings = &tuning.wave;
    let budget = ctx
        .director
        .take_spawn_budget(ctx.dt, settings.spawn_delay_secs);
    if budget == 0 {
        return;
    }
    let center = living_player(world, ctx.despawn).map_or(Vec2::ZERO, |(_, position)| position);

    for _ in 0..budget {
        let Some(archetype) = ctx.director.choose_archetype(ctx.rng) else {
            break;
        };
        let angle = ctx.director.spawn_angle(ctx.rng, settings);
        let distance = settings.spawn_distance(archetype) + jitter(ctx.rng, settings.spawn_distance_jitter);
        let position = center + Vec2::from_angle(angle) * distance;
        let request = Spawn::new(archetype.entity_type(), position).facing(center - position);

        *ctx.director.spawned.get_mut(archetype) += 1;
        match world_setup::spawn(world, ctx.definitions, tuning, request, ctx.events) {
            Ok(entity) => {
                if archetype == EnemyArchetype::Tank {
                    ctx.director.tank_angles.push((entity_id(entity), angle));
                }
            }
            Err(err) => {
                // Count it as killed so the wave can still finish.
                log::error!("could not spawn {archetype:?}: {err}");
                *ctx.director.killed.get_mut(archetype) += 1;
            }
        }
    }
}

fn report_progress(ctx: &mut TickContext) {
    let director = &mut *ctx.director;
    let kills = director.killed.total();
    if kills != director.reported_kills {
        director.reported_kills = kills;
        ctx.events.push(SimEvent::WaveProgress {
            wave: director.wave,
            fraction: director.progress(),
        });
    }
    if kills >= director.quota.total() {
        director.stage = WaveStage::End;
        log::info!("wave {} cleared", director.wave);
        ctx.events.push(SimEvent::WaveCleared {
            wave: director.wave,
        });
    }
}
