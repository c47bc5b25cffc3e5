//! Board configuration.
//!
//! Hosts describe a board with a `BoardConfig` and hand it to
//! `GameBoard::with_config`. The grid size can't change afterwards.

use serde::{Deserialize, Serialize};

use super::coord::GridSize;

/// Configuration for a single board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Human-readable name, used in log records.
    pub name: String,

    /// Width of the grid in cells.
    pub width: u16,

    /// Height of the grid in cells.
    pub height: u16,

    /// Emit an `info` record for every move of an attached object.
    /// Attach and detach are always logged.
    #[serde(default = "default_log_moves")]
    pub log_moves: bool,
}

fn default_log_moves() -> bool {
    true
}

impl BoardConfig {
    /// Create a configuration for a `width x height` board.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            name: String::from("board"),
            width,
            height,
            log_moves: default_log_moves(),
        }
    }

    /// Set the board name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Turn per-move logging off.
    #[must_use]
    pub fn quiet_moves(mut self) -> Self {
        self.log_moves = false;
        self
    }

    /// Grid dimensions.
    #[must_use]
    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(8, 8)
    }
}
