//! Command and snapshot surface of the host.
//!
//! These functions bridge callers (a frontend, a network transport, a test
//! harness) to the game loop thread via channels. Inbound JSON messages are
//! decoded here so transports only move strings.

use serde::{Deserialize, Serialize};

use gyrostar_core::commands::PlayerCommand;
use gyrostar_core::state::{AuthoritativeSnapshot, RenderSnapshot};
use gyrostar_sim::engine::SimConfig;

use crate::error::HostError;
use crate::game_loop;
use crate::state::{GameLoopCommand, HostState};

/// Inbound message accepted by [`dispatch_message`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    Command { command: PlayerCommand },
    Snapshot { snapshot: AuthoritativeSnapshot },
    Start,
    Stop,
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &HostState, config: SimConfig) -> Result<(), HostError> {
    let mut running = state.running.lock()?;

    if *running {
        return Err(HostError::AlreadyRunning);
    }

    let cmd_tx = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;

    let mut tx_lock = state.command_tx.lock()?;
    *tx_lock = Some(cmd_tx);
    *running = true;

    Ok(())
}

/// Shut the game loop down. The last published snapshot stays readable.
pub fn stop_simulation(state: &HostState) -> Result<(), HostError> {
    let mut running = state.running.lock()?;
    let mut tx_lock = state.command_tx.lock()?;

    match tx_lock.take() {
        Some(tx) => {
            // A loop that already exited has nothing left to shut down.
            let _ = tx.send(GameLoopCommand::Shutdown);
            *running = false;
            Ok(())
        }
        None => Err(HostError::NotStarted),
    }
}

fn send(state: &HostState, command: GameLoopCommand) -> Result<(), HostError> {
    let tx_lock = state.command_tx.lock()?;

    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| HostError::Disconnected),
        None => Err(HostError::NotStarted),
    }
}

/// Send a player command to the simulation.
pub fn send_command(state: &HostState, command: PlayerCommand) -> Result<(), HostError> {
    send(state, GameLoopCommand::Player(command))
}

/// Forward an authoritative snapshot; it is applied at the next tick boundary.
pub fn send_snapshot(state: &HostState, snapshot: AuthoritativeSnapshot) -> Result<(), HostError> {
    send(state, GameLoopCommand::Snapshot(Box::new(snapshot)))
}

/// Resume or pause the scheduler without tearing down the loop.
pub fn set_running(state: &HostState, running: bool) -> Result<(), HostError> {
    send(
        state,
        if running {
            GameLoopCommand::Start
        } else {
            GameLoopCommand::Stop
        },
    )
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &HostState) -> Result<Option<RenderSnapshot>, HostError> {
    let lock = state.latest_snapshot.lock()?;
    Ok(lock.clone())
}

/// Decode a JSON message without touching any state.
pub fn decode_message(json: &str) -> Result<HostMessage, HostError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a JSON message and route it to the game loop.
pub fn dispatch_message(state: &HostState, json: &str) -> Result<(), HostError> {
    match decode_message(json) {
        Ok(HostMessage::Command { command }) => send_command(state, command),
        Ok(HostMessage::Snapshot { snapshot }) => send_snapshot(state, snapshot),
        Ok(HostMessage::Start) => set_running(state, true),
        Ok(HostMessage::Stop) => set_running(state, false),
        Err(e) => {
            log::warn!("dropping inbound message: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_decode_command_message() {
        let json = r#"{"type":"Command","command":{"type":"SetInput","intent":{"forward":true,"backward":false,"left":false,"right":false,"aim_angle":0.5,"fire_pressed":true}}}"#;
        match decode_message(json).unwrap() {
            HostMessage::Command {
                command: PlayerCommand::SetInput { intent },
            } => {
                assert!(intent.forward);
                assert!(intent.fire_pressed);
                assert_eq!(intent.aim_angle, 0.5);
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_decode_snapshot_message_with_defaults() {
        let json = r#"{"type":"Snapshot","snapshot":{"ship":{"position":[0.0,0.0,1.0],"orientation":[0.0,0.0,0.0,1.0],"aim_angle":0.0,"lives":2,"invincible":false}}}"#;
        match decode_message(json).unwrap() {
            HostMessage::Snapshot { snapshot } => {
                assert_eq!(snapshot.ship.lives, 2);
                assert!(snapshot.asteroids.is_empty());
                assert!(snapshot.ship.heading.is_none());
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_message("{not json"), Err(HostError::Decode(_))));
        assert!(matches!(
            decode_message(r#"{"type":"Launch"}"#),
            Err(HostError::Decode(_))
        ));
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = HostState::new();
        assert!(matches!(
            send_command(&state, PlayerCommand::Restart),
            Err(HostError::NotStarted)
        ));
        assert!(matches!(stop_simulation(&state), Err(HostError::NotStarted)));
        assert!(get_snapshot(&state).unwrap().is_none());
    }

    #[test]
    fn test_invalid_config_does_not_start() {
        let state = HostState::new();
        let config: SimConfig =
            serde_json::from_str(r#"{"constants": {"tick_rate": 0}}"#).unwrap();
        assert!(matches!(
            start_simulation(&state, config),
            Err(HostError::Config(_))
        ));
        assert!(!*state.running.lock().unwrap());
        assert!(matches!(
            send_command(&state, PlayerCommand::Restart),
            Err(HostError::NotStarted)
        ));
    }

    #[test]
    fn test_start_twice_fails_and_stop_releases() {
        let state = HostState::new();
        start_simulation(&state, SimConfig::default()).unwrap();
        assert!(matches!(
            start_simulation(&state, SimConfig::default()),
            Err(HostError::AlreadyRunning)
        ));

        dispatch_message(&state, r#"{"type":"Command","command":{"type":"Restart"}}"#).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while get_snapshot(&state).unwrap().is_none() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(get_snapshot(&state).unwrap().is_some());

        stop_simulation(&state).unwrap();
        assert!(!*state.running.lock().unwrap());
        assert!(matches!(
            send_command(&state, PlayerCommand::Restart),
            Err(HostError::NotStarted)
        ));
    }
}
