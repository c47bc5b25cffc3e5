//! Capability traits for entities living on a board.
//!
//! A concrete entity type implements the capabilities it cares about and
//! takes the defaults for the rest. `Entity` aggregates them so the board
//! can hold any entity as `Box<dyn Entity>`.
//!
//! ```
//! use game_board::objects::{
//!     BoardListener, Drawable, Entity, Focusable, FrameHooks, Loggable, Persistent, Tangible,
//! };
//!
//! #[derive(Clone)]
//! struct Rock;
//!
//! impl BoardListener for Rock {}
//! impl Focusable for Rock {}
//! impl Tangible for Rock {}
//! impl FrameHooks for Rock {}
//! impl Drawable for Rock {}
//! impl Loggable for Rock {}
//! impl Persistent for Rock {}
//! impl Entity for Rock {}
//!
//! let rock: Box<dyn Entity> = Box::new(Rock);
//! assert_eq!(rock.kind(), 0);
//! ```

use std::any::Any;

use crate::core::{Canvas, CellCoord, KeyEvent};
use crate::persist::PersistError;

use super::commands::ObjectContext;
use super::object::ObjectSummary;

/// Observer of board-level object events.
///
/// The board keeps the listener's attach state itself; a listener only
/// receives events while that state is `Attached`.
pub trait BoardListener {
    /// An object was attached (it is still pending until the next frame).
    fn on_object_attached(&mut self, _object: &ObjectSummary) {}

    /// An attached object moved between cells.
    fn on_object_moved(&mut self, _object: &ObjectSummary, _from: CellCoord, _to: CellCoord) {}

    /// An object was detached (removed at the next frame).
    fn on_object_detached(&mut self, _object: &ObjectSummary) {}
}

/// Input focus. Focused objects see clicks before everyone else.
pub trait Focusable {
    fn is_focused(&self) -> bool {
        false
    }
}

/// Reaction to host input. Return `true` when the input was consumed.
pub trait Tangible {
    fn on_click(&mut self, _cell: CellCoord, _ctx: &mut ObjectContext<'_>) -> bool {
        false
    }

    fn on_key(&mut self, _key: KeyEvent, _ctx: &mut ObjectContext<'_>) -> bool {
        false
    }
}

/// Per-tick hooks, called by the board on attached objects only.
pub trait FrameHooks {
    /// Linked to a board.
    fn on_attach(&mut self) {}

    /// Unlinked from its board at a frame-start commit.
    fn on_detach(&mut self) {}

    /// Cell occupancy changed somewhere on the board.
    fn on_map_changed(&mut self, _ctx: &mut ObjectContext<'_>) {}

    fn on_frame_start(&mut self, _ctx: &mut ObjectContext<'_>) {}

    fn on_frame(&mut self, _elapsed_ms: u64, _ctx: &mut ObjectContext<'_>) {}

    /// Prepare whatever `on_draw` needs; called right after `on_frame`.
    fn on_pre_draw(&mut self) {}

    fn on_frame_end(&mut self, _ctx: &mut ObjectContext<'_>) {}
}

/// Rendering into the host's opaque canvas.
pub trait Drawable {
    fn on_draw(&self, _canvas: &mut dyn Canvas) {}
}

/// Short description used in log records.
pub trait Loggable {
    fn label(&self) -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }
}

/// Snapshot support.
///
/// `type_tag` must match the tag the entity was registered under in the
/// `EntityRegistry` used to read snapshots back.
pub trait Persistent {
    fn type_tag(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn encode(&self) -> Result<Vec<u8>, PersistError> {
        Err(PersistError::NotPersistent(self.type_tag().to_string()))
    }
}

/// Downcasting support, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Deep copy into a fresh box, implemented for every `Clone` entity.
pub trait CloneEntity {
    fn clone_entity(&self) -> Box<dyn Entity>;
}

impl<T: Entity + Clone> CloneEntity for T {
    fn clone_entity(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }
}

/// Everything a board needs from an entity.
pub trait Entity:
    BoardListener + Focusable + Tangible + FrameHooks + Drawable + Loggable + Persistent + CloneEntity + AsAny
{
    /// Game-defined kind discriminator. The engine never interprets it.
    fn kind(&self) -> u32 {
        0
    }
}
