//! Game loop thread: drives the simulation engine from wall time and
//! publishes snapshots.
//!
//! The engine is built and validated on the caller's thread, then moved into
//! the loop thread. Commands arrive via `mpsc` channel and are drained between frames, so an
//! authoritative snapshot is never applied mid-tick. The latest snapshot is
//! stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use gyrostar_core::state::RenderSnapshot;
use gyrostar_sim::engine::{SimConfig, SimulationEngine};
use gyrostar_sim::scheduler::FixedStepScheduler;

use crate::error::HostError;
use crate::state::GameLoopCommand;

/// How long the loop sleeps between frame callbacks.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(8);

/// Spawns the game loop in a new thread.
///
/// The config is validated before the thread starts. Returns the command
/// sender for the IPC layer to use.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<RenderSnapshot>>>,
) -> Result<mpsc::Sender<GameLoopCommand>, HostError> {
    let engine = SimulationEngine::try_new(config)?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("gyrostar-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// Drain every pending command into the engine and scheduler.
///
/// Returns `false` when the loop should exit.
pub fn drain_commands(
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    engine: &mut SimulationEngine,
    scheduler: &mut FixedStepScheduler,
    now: f64,
) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::Player(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Snapshot(snapshot)) => {
                // Rejections are logged by the engine; the previous snapshot stays.
                let _ = engine.receive_snapshot(*snapshot);
            }
            Ok(GameLoopCommand::Start) => {
                if !scheduler.is_running() {
                    scheduler.start(now);
                    log::info!("scheduler started");
                }
            }
            Ok(GameLoopCommand::Stop) => {
                scheduler.stop();
                log::info!("scheduler stopped");
            }
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<RenderSnapshot>>,
) {
    let mut scheduler = FixedStepScheduler::from_constants(engine.constants());
    let epoch = Instant::now();
    scheduler.start(0.0);
    log::info!("game loop running at {} Hz", engine.constants().tick_rate);

    loop {
        let now = epoch.elapsed().as_secs_f64();

        // 1. Drain all pending commands
        if !drain_commands(&cmd_rx, &mut engine, &mut scheduler, now) {
            log::info!("game loop shutting down at tick {}", engine.time().tick);
            return;
        }

        // 2. Run however many fixed ticks this frame owes
        let ran = scheduler.frame(now, || engine.step());

        // 3. Store latest snapshot for synchronous polling
        if ran > 0 {
            let snapshot = engine.snapshot();
            if let Ok(mut lock) = latest_snapshot.lock() {
                *lock = Some(snapshot);
            }
        }

        std::thread::sleep(FRAME_INTERVAL);
    }
}
