//! # game-board
//!
//! A single-threaded 2D grid game board for turn- or frame-based games.
//!
//! ## Design Principles
//!
//! 1. **Two-Phase Lifecycle**: attach and detach only mark objects and
//!    listeners pending. The board commits all pending changes at the next
//!    `on_frame_start`, so hooks never see the child list change mid-loop.
//!
//! 2. **Board-Owned State**: the attach state of every object and listener
//!    is changed by the board only, always one step forward along
//!    `Detached -> WaitForAttach -> Attached -> WaitForDetach -> Detached`.
//!
//! 3. **Capabilities, Not Hierarchies**: entities implement the traits they
//!    need (`Tangible`, `FrameHooks`, `BoardListener`, ...) and take the
//!    defaults for the rest.
//!
//! ## Architecture
//!
//! - **Non-Owning Cells**: cells hold object ids; the board holds the
//!   `Rc<RefCell<GameObject>>` handles.
//!
//! - **Trash Cell**: every out-of-bounds position resolves to one catch-all
//!   cell, so lookups never fail.
//!
//! - **Command Buffer**: hooks request attach/detach/move through their
//!   `ObjectContext`; the board applies the requests after the hook loop.
//!
//! ## Modules
//!
//! - `core`: ids, coordinates, attach states, configuration, input types
//! - `grid`: cells and the row-major cell grid
//! - `objects`: `GameObject`, capability traits, hook commands
//! - `board`: `GameBoard` and its listener registry
//! - `persist`: binary snapshots with section control points
//! - `games`: demonstration entities
//! - `logging`: optional stderr logger driven by `GAME_BOARD_LOG`

pub mod core;
pub mod grid;
pub mod objects;
pub mod board;
pub mod persist;
pub mod games;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{
    AttachState, BoardConfig, BoardId, Canvas, CellCoord, GridSize, KeyEvent, ObjectId,
};

pub use crate::grid::{Cell, CellGrid, TRASH_COORD};

pub use crate::objects::{
    BoardListener, Command, Commands, Drawable, Entity, Focusable, FrameHooks, GameObject,
    Loggable, ObjectContext, ObjectSummary, Persistent, SharedObject, Tangible,
};

pub use crate::board::{GameBoard, ListenerKey, ListenerSet};

pub use crate::persist::{EntityRegistry, PersistError, PersistResult};

pub use crate::logging::init_logging;
