use harpoon_host::game_loop::{self, TICK_RATE};
use harpoon_host::options::{HostError, Options};
use harpoon_host::state::{self, LoopCommand};

fn main() -> Result<(), HostError> {
    env_logger::init();

    let options = Options::from_args(std::env::args().skip(1))?;
    let config = options.load()?;
    log::info!(
        "running seed {} for {} s at {TICK_RATE} Hz{}",
        config.sim.seed,
        options.seconds,
        if config.realtime { "" } else { " (fast)" }
    );

    let snapshot = state::shared_snapshot();
    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, snapshot.clone())?;
    let summary = handle.join().map_err(|_| HostError::LoopPanicked)?;
    // Already stopped on its own; the send only fails if nobody listens.
    let _ = cmd_tx.send(LoopCommand::Shutdown);

    log::info!(
        "{} ticks, {} kills, {} waves cleared, {} crates broken{}",
        summary.ticks,
        summary.kills,
        summary.waves_cleared,
        summary.crates_broken,
        if summary.player_killed { ", player killed" } else { "" }
    );
    if let Ok(lock) = snapshot.lock() {
        if let Some(last) = lock.as_ref() {
            log::info!("final wave {} ({:?})", last.wave.wave, last.wave.stage);
        }
    }
    Ok(())
}
