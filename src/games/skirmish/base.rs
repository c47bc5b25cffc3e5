use serde::{Deserialize, Serialize};

use crate::core::{CellCoord, KeyEvent};
use crate::objects::{
    BoardListener, Drawable, Entity, Focusable, FrameHooks, GameObject, Loggable, ObjectContext,
    ObjectSummary, Persistent, Tangible,
};
use crate::persist::{encode_bincode, PersistError};

use super::unit::Unit;
use super::{BASE_KIND, BASE_TAG};

/// Key code that makes a base spawn a unit (space).
pub const SPAWN_KEY: u32 = 0x20;

/// A spawner that also watches the board.
///
/// On `SPAWN_KEY` it queues a new `Unit` on its own cell. As a board
/// listener it counts what it hears about other objects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    unit_step: (i32, i32),
    spawned: u32,
    seen_attached: u32,
    seen_moved: u32,
    seen_detached: u32,
}

impl Base {
    /// A base whose units walk by `unit_step`.
    #[must_use]
    pub fn new(unit_step: (i32, i32)) -> Self {
        Self {
            unit_step,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    #[must_use]
    pub fn seen_attached(&self) -> u32 {
        self.seen_attached
    }

    #[must_use]
    pub fn seen_moved(&self) -> u32 {
        self.seen_moved
    }

    #[must_use]
    pub fn seen_detached(&self) -> u32 {
        self.seen_detached
    }
}

impl BoardListener for Base {
    fn on_object_attached(&mut self, _object: &ObjectSummary) {
        self.seen_attached += 1;
    }

    fn on_object_moved(&mut self, _object: &ObjectSummary, _from: CellCoord, _to: CellCoord) {
        self.seen_moved += 1;
    }

    fn on_object_detached(&mut self, _object: &ObjectSummary) {
        self.seen_detached += 1;
    }
}

impl Focusable for Base {}

impl Tangible for Base {
    fn on_key(&mut self, key: KeyEvent, ctx: &mut ObjectContext<'_>) -> bool {
        if key.code != SPAWN_KEY || key.ctrl || key.alt {
            return false;
        }
        self.spawned += 1;
        let name = format!("unit-{}", self.spawned);
        ctx.spawn(GameObject::at(ctx.cell(), Unit::new(name, self.unit_step)).shared());
        true
    }
}

impl FrameHooks for Base {}
impl Drawable for Base {}

impl Loggable for Base {}

impl Persistent for Base {
    fn type_tag(&self) -> &'static str {
        BASE_TAG
    }

    fn encode(&self) -> Result<Vec<u8>, PersistError> {
        encode_bincode(self)
    }
}

impl Entity for Base {
    fn kind(&self) -> u32 {
        BASE_KIND
    }
}
