use serde::{Deserialize, Serialize};

/// Identifies one reel within a session. Reels are numbered left to right,
/// matching their index in the strip table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReelId(pub u32);

/// Identifies a symbol on a strip. The host maps these to visuals; the core
/// never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

/// Emitted once per completed spin, after the bounce settles.
/// `symbols` is a snapshot of the visible window at rest, index 0 = topmost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelStopped {
    pub reel: ReelId,
    pub symbols: Vec<SymbolId>,
}

/// Session-level events, drained by the host after each tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// One reel came to rest.
    ReelStopped(ReelStopped),
    /// Every reel of the current spin cycle has come to rest.
    /// Emitted exactly once per cycle.
    AllStopped,
}

/// Structural errors. These are fatal at construction time; a session is
/// never built over bad strip data or a bad configuration. Timing misuse
/// (double spin, double start) is a logged no-op, not an error.
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("reel {0}: strip is empty")]
    EmptyStrip(u32),

    #[error("reel {reel}: strip length {len} is shorter than the visible window {window}")]
    StripTooShort { reel: u32, len: usize, window: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
