//! The four-state attach lifecycle shared by objects and listeners.
//!
//! ```text
//! Detached -> WaitForAttach -> Attached -> WaitForDetach -> Detached
//! ```
//!
//! The two `WaitFor*` states are pending: the board records the request
//! immediately but only commits it at the next frame start.

use serde::{Deserialize, Serialize};

/// Attach state of an object or listener.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachState {
    /// Not known to any board.
    #[default]
    Detached,
    /// Attach requested, committed at the next frame start.
    WaitForAttach,
    /// Fully attached.
    Attached,
    /// Detach requested, committed at the next frame start.
    WaitForDetach,
}

impl AttachState {
    /// The only state reachable from this one.
    #[must_use]
    pub const fn successor(self) -> Self {
        match self {
            Self::Detached => Self::WaitForAttach,
            Self::WaitForAttach => Self::Attached,
            Self::Attached => Self::WaitForDetach,
            Self::WaitForDetach => Self::Detached,
        }
    }

    /// Move to the successor state.
    pub fn advance(&mut self) {
        *self = self.successor();
    }

    /// Advance until `target` is reached, never skipping a state.
    pub fn advance_to(&mut self, target: Self) {
        while *self != target {
            self.advance();
        }
    }

    /// True for the two pending states.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::WaitForAttach | Self::WaitForDetach)
    }

    /// Stable byte encoding used by snapshots.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Detached => 0,
            Self::WaitForAttach => 1,
            Self::Attached => 2,
            Self::WaitForDetach => 3,
        }
    }

    /// Inverse of [`AttachState::to_byte`].
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Detached),
            1 => Some(Self::WaitForAttach),
            2 => Some(Self::Attached),
            3 => Some(Self::WaitForDetach),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttachState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Detached => "detached",
            Self::WaitForAttach => "wait-for-attach",
            Self::Attached => "attached",
            Self::WaitForDetach => "wait-for-detach",
        };
        f.write_str(name)
    }
}
