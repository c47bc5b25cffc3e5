//! Cell-indexed spatial model.
//!
//! ## Key Types
//!
//! - `Cell`: occupancy record for one coordinate (non-owning object ids)
//! - `CellGrid`: row-major cell storage with a trash cell for everything
//!   out of bounds

pub mod cell;
pub mod cells;

pub use cell::Cell;
pub use cells::{CellGrid, TRASH_COORD};
