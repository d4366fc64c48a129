use std::process::ExitCode;
use std::time::Duration;

use gyrostar_core::commands::{InputIntent, PlayerCommand};
use gyrostar_core::config::SimConstants;
use gyrostar_host::error::HostError;
use gyrostar_host::ipc;
use gyrostar_host::state::HostState;
use gyrostar_sim::engine::SimConfig;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let constants = match std::env::args().nth(1) {
        Some(path) => match SimConstants::load(&path) {
            Ok(constants) => {
                log::info!("loaded constants from {path}");
                constants
            }
            Err(e) => {
                log::error!("failed to load constants from {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SimConstants::default(),
    };

    match run_demo(constants) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("host failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Fly a short scripted sortie and report what the simulation published.
fn run_demo(constants: SimConstants) -> Result<(), HostError> {
    let state = HostState::new();
    ipc::start_simulation(&state, SimConfig { seed: 42, constants })?;

    let script = [
        (
            InputIntent {
                forward: true,
                fire_pressed: true,
                ..Default::default()
            },
            1500,
        ),
        (
            InputIntent {
                left: true,
                aim_angle: -0.8,
                fire_pressed: true,
                ..Default::default()
            },
            1000,
        ),
        (
            InputIntent {
                backward: true,
                right: true,
                aim_angle: 2.0,
                ..Default::default()
            },
            1000,
        ),
    ];

    for (intent, millis) in script {
        ipc::send_command(&state, PlayerCommand::SetInput { intent })?;
        std::thread::sleep(Duration::from_millis(millis));
        report(&state)?;
    }

    ipc::send_command(&state, PlayerCommand::Restart)?;
    std::thread::sleep(Duration::from_millis(250));
    report(&state)?;

    ipc::stop_simulation(&state)
}

fn report(state: &HostState) -> Result<(), HostError> {
    if let Some(snapshot) = ipc::get_snapshot(state)? {
        log::info!(
            "tick {} wave {} score {} lives {} projectiles {} asteroids {} ({:?})",
            snapshot.time.tick,
            snapshot.wave,
            snapshot.score,
            snapshot.ship.lives,
            snapshot.projectiles.len(),
            snapshot.asteroids.len(),
            snapshot.phase,
        );
    }
    Ok(())
}
