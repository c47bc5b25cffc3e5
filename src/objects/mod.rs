//! Game objects and the capability traits their entities implement.
//!
//! ## Key Types
//!
//! - `GameObject`: bookkeeping wrapper (id, attach state, cell, board link)
//! - `SharedObject`: `Rc<RefCell<GameObject>>`, shared by board and callers
//! - `Entity`: aggregate of the capability traits below
//! - `Commands` / `ObjectContext`: how hooks request structural changes

pub mod capability;
pub mod commands;
pub mod object;

pub use capability::{
    AsAny, BoardListener, CloneEntity, Drawable, Entity, Focusable, FrameHooks, Loggable,
    Persistent, Tangible,
};
pub use commands::{Command, Commands, ObjectContext};
pub use object::{GameObject, ObjectSummary, SharedObject};
