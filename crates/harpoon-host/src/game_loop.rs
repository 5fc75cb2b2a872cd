//! Game loop thread: runs the simulation engine at a fixed rate.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive on an `mpsc` channel and from the input script; produced
//! events are logged and the latest snapshot is stored for polling.

use std::sync::{mpsc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use harpoon_core::config::TuningConfig;
use harpoon_core::definitions::DefinitionTable;
use harpoon_core::events::SimEvent;
use harpoon_core::state::SimSnapshot;
use harpoon_sim::{SimConfig, SimulationEngine};

use crate::script::Script;
use crate::state::{LoopCommand, SharedSnapshot};

pub const TICK_RATE: u32 = 60;

/// Duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Everything the loop thread needs to build and drive its engine.
pub struct LoopConfig {
    pub sim: SimConfig,
    pub tuning: TuningConfig,
    pub definitions: DefinitionTable,
    pub script: Script,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks to hold the tick rate. Off runs as fast as possible.
    pub realtime: bool,
}

/// What happened during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub kills: u32,
    pub waves_cleared: u32,
    pub crates_broken: u32,
    pub player_killed: bool,
}

impl LoopSummary {
    fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::EnemyKilled { .. } => self.kills += 1,
            SimEvent::WaveCleared { .. } => self.waves_cleared += 1,
            SimEvent::CrateBroken { .. } => self.crates_broken += 1,
            SimEvent::PlayerKilled => self.player_killed = true,
            _ => {}
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle that yields the run summary.
pub fn spawn_game_loop(
    config: LoopConfig,
    latest_snapshot: SharedSnapshot,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<LoopSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("harpoon-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, the tick limit or
/// an engine error.
pub fn run_game_loop(
    config: LoopConfig,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) -> LoopSummary {
    let LoopConfig {
        sim,
        tuning,
        definitions,
        mut script,
        max_ticks,
        realtime,
    } = config;
    let mut summary = LoopSummary::default();
    let mut engine = SimulationEngine::new(sim, tuning, definitions);
    if let Err(err) = engine.setup_arena() {
        log::error!("arena setup failed: {err}");
        return summary;
    }
    log_events(&mut engine, &mut summary);

    let dt = TICK_DURATION.as_secs_f64();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Player(command)) => engine.queue_command(command),
                Ok(LoopCommand::Shutdown) => return summary,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return summary,
            }
        }

        // 2. Scripted input due at this tick
        let now = (summary.ticks + 1) as f64 * dt;
        engine.queue_commands(script.due(now));

        // 3. Advance one tick
        if let Err(err) = engine.update(now, dt) {
            log::error!("tick {} rejected: {err}", summary.ticks + 1);
            return summary;
        }
        summary.ticks += 1;

        // 4. Report what happened and publish the snapshot
        log_events(&mut engine, &mut summary);
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(engine.snapshot());
        }

        if max_ticks.is_some_and(|max| summary.ticks >= max) {
            return summary;
        }
        if !realtime {
            continue;
        }

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset instead of catching up
            next_tick_time = now;
        }
    }
}

fn log_events(engine: &mut SimulationEngine, summary: &mut LoopSummary) {
    for event in engine.drain_events() {
        summary.record(&event);
        match &event {
            SimEvent::EntitySpawned { .. } | SimEvent::EntityRemoved { .. } => {
                log::trace!("{event:?}");
            }
            SimEvent::WaveStarted { .. }
            | SimEvent::WaveCleared { .. }
            | SimEvent::CrateBroken { .. }
            | SimEvent::BoltPickedUp { .. }
            | SimEvent::PlayerKilled => log::info!("{event:?}"),
            _ => log::debug!("{event:?}"),
        }
    }
}
