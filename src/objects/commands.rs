//! Structural requests raised from inside object hooks.
//!
//! Hooks can't reach the board directly (it is busy iterating its
//! children). Instead they push commands onto the `Commands` buffer in
//! their `ObjectContext`; the board applies them through its normal
//! `attach`/`detach`/`move_object` paths as soon as the hook loop returns.

use std::collections::VecDeque;

use crate::core::{CellCoord, ObjectId};

use super::object::SharedObject;

/// A structural change requested by an object.
#[derive(Debug)]
pub enum Command {
    /// Attach a new object.
    Attach(SharedObject),
    /// Detach an object by id.
    Detach(ObjectId),
    /// Move an object from its current cell to `to`.
    Move { id: ObjectId, to: CellCoord },
}

/// FIFO buffer of pending commands.
#[derive(Debug, Default)]
pub struct Commands {
    queue: VecDeque<Command>,
}

impl Commands {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command.
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Take the oldest queued command.
    pub fn pop(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }

    /// Number of queued commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// What a hook knows about the object it runs on, plus the command buffer.
#[derive(Debug)]
pub struct ObjectContext<'a> {
    id: ObjectId,
    cell: CellCoord,
    commands: &'a mut Commands,
}

impl<'a> ObjectContext<'a> {
    pub(crate) fn new(id: ObjectId, cell: CellCoord, commands: &'a mut Commands) -> Self {
        Self { id, cell, commands }
    }

    /// Id of the object running the hook.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Cell the object occupies right now.
    #[must_use]
    pub fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Ask the board to attach `object`.
    pub fn spawn(&mut self, object: SharedObject) {
        self.commands.push(Command::Attach(object));
    }

    /// Ask the board to detach the object running the hook.
    pub fn detach_self(&mut self) {
        self.commands.push(Command::Detach(self.id));
    }

    /// Ask the board to detach another object.
    pub fn detach(&mut self, id: ObjectId) {
        self.commands.push(Command::Detach(id));
    }

    /// Ask the board to move the object running the hook.
    pub fn move_to(&mut self, to: CellCoord) {
        self.commands.push(Command::Move { id: self.id, to });
    }

    /// Ask the board to move another object.
    pub fn move_object(&mut self, id: ObjectId, to: CellCoord) {
        self.commands.push(Command::Move { id, to });
    }
}
