//! The board and its listener registry.
//!
//! ## Key Types
//!
//! - `GameBoard`: owns the grid and the children, mediates attach/detach/move
//! - `ListenerSet`: listener slots with pending/commit state
//! - `ListenerKey`: identifies a listener slot

pub mod game_board;
pub mod listeners;

pub use game_board::GameBoard;
pub use listeners::{ListenerCommit, ListenerKey, ListenerSet};
