//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

/// Identifier assigned to a projectile or asteroid at spawn.
///
/// Ids increase monotonically within a round and are never reused until a
/// full reset. Authoritative snapshots carry the server's ids verbatim.
pub type EntityId = u32;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Highest id value. Authoritative snapshots may not use it.
pub const RESERVED_ID: EntityId = EntityId::MAX;

/// Monotonic id allocator shared by the entity systems.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: EntityId,
}

impl IdAllocator {
    /// Hand out the next id.
    pub fn allocate(&mut self) -> EntityId {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Make sure future ids are strictly greater than `id`.
    ///
    /// Never wraps: observing [`RESERVED_ID`] pins the counter at the top.
    pub fn observe(&mut self, id: EntityId) {
        if id >= self.next {
            self.next = id.saturating_add(1);
        }
    }

    /// The id the next call to `allocate` will return.
    pub fn peek(&self) -> EntityId {
        self.next
    }
}
