//! Host state shared between the IPC surface and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use gyrostar_core::commands::PlayerCommand;
use gyrostar_core::state::{AuthoritativeSnapshot, RenderSnapshot};

/// Commands sent from the IPC layer to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// An authoritative snapshot from the remote simulation.
    Snapshot(Box<AuthoritativeSnapshot>),
    /// Resume stepping from the current time.
    Start,
    /// Pause stepping. Partial frame time is dropped.
    Stop,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared host state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` holds state that does not exist before `start_simulation`
/// - `Arc<Mutex<...>>` shares the latest snapshot with the game loop thread
pub struct HostState {
    /// Channel sender to the game loop thread.
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous `get_snapshot` queries.
    /// Updated by the game loop thread after each frame that ran a tick.
    pub latest_snapshot: Arc<Mutex<Option<RenderSnapshot>>>,
    /// Whether the game loop is currently running.
    pub running: Mutex<bool>,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }
}
