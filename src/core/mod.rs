//! Core engine types: ids, coordinates, attach states, configuration, input.
//!
//! Everything here is plain data with no knowledge of boards or objects.

pub mod entity;
pub mod coord;
pub mod attach;
pub mod config;
pub mod input;

pub use entity::{BoardId, ObjectId};
pub use coord::{CellCoord, GridSize};
pub use attach::AttachState;
pub use config::BoardConfig;
pub use input::{Canvas, KeyEvent};
