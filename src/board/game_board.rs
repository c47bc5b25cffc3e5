//! The board: grid owner, child registry and lifecycle mediator.
//!
//! Attach and detach take effect in two phases. The call itself updates
//! cell occupancy, listener slots and the object's state to a pending
//! value; `on_frame_start` commits everything at once so no hook ever sees
//! the child list or listener set change under it.
//!
//! ## Frame order
//!
//! A host calls, once per tick:
//!
//! 1. `on_frame_start()`: commit pending attach/detach, then hooks
//! 2. `on_frame(elapsed_ms)`: per-frame logic, then draw preparation
//! 3. `draw(canvas)`
//! 4. `on_frame_end()`
//!
//! Input (`on_click`, `on_key`) may arrive anywhere between ticks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use crate::core::{AttachState, BoardConfig, BoardId, Canvas, CellCoord, GridSize, KeyEvent, ObjectId};
use crate::grid::{Cell, CellGrid};
use crate::objects::{BoardListener, Command, Commands, ObjectSummary, SharedObject};

use super::listeners::{ListenerKey, ListenerSet, ListenerTarget};

const LOG_TARGET: &str = "game_board";

/// A listener event waiting to be delivered.
enum Notice<'a> {
    Attached(&'a ObjectSummary),
    Moved(&'a ObjectSummary, CellCoord, CellCoord),
    Detached(&'a ObjectSummary),
}

impl Notice<'_> {
    fn send<L: BoardListener + ?Sized>(&self, listener: &mut L) {
        match *self {
            Notice::Attached(object) => listener.on_object_attached(object),
            Notice::Moved(object, from, to) => listener.on_object_moved(object, from, to),
            Notice::Detached(object) => listener.on_object_detached(object),
        }
    }
}

/// Spatial object registry with deferred attach/detach.
///
/// ```
/// use game_board::board::GameBoard;
/// use game_board::core::{AttachState, CellCoord};
/// use game_board::games::skirmish::Obstacle;
/// use game_board::objects::GameObject;
///
/// let mut board = GameBoard::new(3, 3);
/// let rock = GameObject::at(CellCoord::new(1, 1), Obstacle::new(2)).shared();
///
/// assert!(board.attach(rock.clone()));
/// assert_eq!(rock.borrow().state(), AttachState::WaitForAttach);
///
/// board.on_frame_start();
/// assert_eq!(rock.borrow().state(), AttachState::Attached);
/// assert!(board.get_cell(CellCoord::new(1, 1)).contains(rock.borrow().id()));
/// ```
#[derive(Debug)]
pub struct GameBoard {
    id: BoardId,
    config: BoardConfig,
    grid: CellGrid,

    /// Managed objects in attach order, pending ones included.
    children: Vec<SharedObject>,

    /// Same objects keyed by id.
    lookup: FxHashMap<ObjectId, SharedObject>,

    listeners: ListenerSet,

    /// Commands raised by hooks, applied when the hook loop returns.
    commands: Commands,
}

impl GameBoard {
    /// Create a `width x height` board with default configuration.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_config(BoardConfig::new(width, height))
    }

    /// Create a board from a configuration.
    #[must_use]
    pub fn with_config(config: BoardConfig) -> Self {
        let grid = CellGrid::new(config.size());
        Self::from_parts(config, grid, Vec::new(), ListenerSet::new())
    }

    /// Assemble a board from restored parts. Children that aren't
    /// `Detached` are linked to the new board id without running their
    /// `on_attach` hook.
    pub(crate) fn from_parts(
        config: BoardConfig,
        grid: CellGrid,
        children: Vec<SharedObject>,
        listeners: ListenerSet,
    ) -> Self {
        let id = BoardId::next();
        let lookup = children
            .iter()
            .map(|child| {
                let mut obj = child.borrow_mut();
                if obj.is_attached() {
                    obj.relink(id);
                }
                (obj.id(), Rc::clone(child))
            })
            .collect();

        Self {
            id,
            config,
            grid,
            children,
            lookup,
            listeners,
            commands: Commands::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> BoardId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // === Attach / detach ===

    /// Attach `object` to this board.
    ///
    /// Returns `false`, changing nothing, when the object already belongs
    /// to a board. Otherwise the object becomes `WaitForAttach`, occupies
    /// its cell, and is promoted to `Attached` at the next frame start.
    pub fn attach(&mut self, object: SharedObject) -> bool {
        let (id, cell, summary) = {
            let mut obj = object.borrow_mut();
            if obj.is_attached() {
                warn!(target: LOG_TARGET, "[{}] attach refused: {} is already attached", self.config.name, obj.label());
                return false;
            }
            obj.link(self.id);
            obj.advance_to(AttachState::WaitForAttach);
            (obj.id(), obj.occupied_cell(), obj.summary())
        };

        self.children.push(Rc::clone(&object));
        self.lookup.insert(id, object);
        self.listeners.add(ListenerKey::Object(id), ListenerTarget::Object);
        self.grid.cell_mut(cell).add(id);
        self.notify_object_attached(&summary);

        info!(target: LOG_TARGET, "[{}] attach object={}", self.config.name, summary.label);
        true
    }

    /// Detach `object` from this board.
    ///
    /// A no-op (returning `false`) unless the object belongs to this board
    /// and isn't already pending detach. The object leaves its cell right
    /// away and is dropped from the children at the next frame start.
    pub fn detach(&mut self, object: &SharedObject) -> bool {
        let (id, cell, summary) = {
            let mut obj = object.borrow_mut();
            let live = matches!(obj.state(), AttachState::WaitForAttach | AttachState::Attached);
            if obj.board() != Some(self.id) || !live {
                return false;
            }
            obj.advance_to(AttachState::WaitForDetach);
            (obj.id(), obj.occupied_cell(), obj.summary())
        };

        self.grid.cell_mut(cell).remove(id);
        self.listeners.remove(ListenerKey::Object(id));
        self.notify_object_detached(&summary);

        info!(target: LOG_TARGET, "[{}] detach object={}", self.config.name, summary.label);
        true
    }

    /// Detach the child with `id`. Returns `false` if no child matches.
    pub fn detach_by_id(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.lookup.get(&id).cloned() else {
            return false;
        };
        self.detach(&object);
        true
    }

    // === Movement ===

    /// Move `object` from the cell at `from` to the cell at `to`.
    ///
    /// Only objects live on this board (`WaitForAttach` or `Attached`) can
    /// move; anything else is left untouched. Out-of-bounds coordinates
    /// resolve to the trash cell. Every child gets one `on_map_changed` and
    /// listeners hear about the move.
    pub fn move_object(&mut self, object: &SharedObject, from: CellCoord, to: CellCoord) {
        self.relocate(object, from, to);
        self.flush_commands();
    }

    /// Move the child with `id`. Returns `false` if no child matches.
    pub fn move_object_by_id(&mut self, id: ObjectId, from: CellCoord, to: CellCoord) -> bool {
        let Some(object) = self.lookup.get(&id).cloned() else {
            return false;
        };
        self.move_object(&object, from, to);
        true
    }

    fn relocate(&mut self, object: &SharedObject, from: CellCoord, to: CellCoord) {
        let (id, summary) = {
            let mut obj = object.borrow_mut();
            let live = obj.board() == Some(self.id)
                && matches!(obj.state(), AttachState::WaitForAttach | AttachState::Attached);
            if !live {
                warn!(target: LOG_TARGET, "[{}] move refused: {} is not live on this board ({})", self.config.name, obj.label(), obj.state());
                return;
            }
            obj.set_occupied_cell(to);
            (obj.id(), obj.summary())
        };

        self.grid.relocate(id, from, to);
        self.notify_map_changed();
        self.notify_object_moved(&summary, from, to);
        if self.config.log_moves {
            info!(target: LOG_TARGET, "[{}] move object={} from={} to={}", self.config.name, summary.label, from, to);
        }
    }

    // === Listeners ===

    /// Register an external listener. It starts receiving events after the
    /// next frame start.
    pub fn add_listener<L: BoardListener + 'static>(&mut self, listener: &Rc<RefCell<L>>) -> ListenerKey {
        let key = self.listeners.next_external_key();
        let weak = Rc::downgrade(listener);
        let weak: Weak<RefCell<dyn BoardListener>> = weak;
        self.listeners.add(key, ListenerTarget::External(weak));
        key
    }

    /// Unregister a listener at the next frame start.
    ///
    /// Panics if `key` was never registered.
    pub fn remove_listener(&mut self, key: ListenerKey) {
        self.listeners.remove(key);
    }

    /// Attach state of a listener slot.
    #[must_use]
    pub fn listener_state(&self, key: ListenerKey) -> Option<AttachState> {
        self.listeners.state(key)
    }

    #[must_use]
    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    // === Frame pump ===

    /// Commit pending changes, then run `on_frame_start` on attached children.
    pub fn on_frame_start(&mut self) {
        let listener_commit = self.listeners.commit();

        let mut removed = 0usize;
        let lookup = &mut self.lookup;
        self.children.retain(|child| {
            let mut obj = child.borrow_mut();
            if obj.state() != AttachState::WaitForDetach {
                return true;
            }
            obj.unlink();
            obj.advance_to(AttachState::Detached);
            lookup.remove(&obj.id());
            removed += 1;
            false
        });

        let mut promoted = 0usize;
        for child in &self.children {
            let mut obj = child.borrow_mut();
            if obj.state() == AttachState::WaitForAttach {
                obj.advance_to(AttachState::Attached);
                promoted += 1;
            }
        }

        if removed > 0 || promoted > 0 {
            debug!(
                target: LOG_TARGET,
                "[{}] frame commit: {} attached, {} detached, listeners +{} -{}",
                self.config.name, promoted, removed, listener_commit.promoted, listener_commit.removed
            );
            self.notify_map_changed();
        }

        for child in &self.children {
            let mut obj = child.borrow_mut();
            if obj.state() == AttachState::Attached {
                obj.frame_start(&mut self.commands);
            }
        }

        self.flush_commands();
    }

    /// Run `on_frame` then `on_pre_draw` on attached children.
    pub fn on_frame(&mut self, elapsed_ms: u64) {
        for child in &self.children {
            let mut obj = child.borrow_mut();
            if obj.state() == AttachState::Attached {
                obj.frame(elapsed_ms, &mut self.commands);
            }
        }

        for child in &self.children {
            let mut obj = child.borrow_mut();
            if obj.state() == AttachState::Attached {
                obj.pre_draw();
            }
        }

        self.flush_commands();
    }

    /// Draw attached children in attach order.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for child in &self.children {
            let obj = child.borrow();
            if obj.state() == AttachState::Attached {
                obj.draw(canvas);
            }
        }
    }

    /// Run `on_frame_end` on attached children.
    pub fn on_frame_end(&mut self) {
        for child in &self.children {
            let mut obj = child.borrow_mut();
            if obj.state() == AttachState::Attached {
                obj.frame_end(&mut self.commands);
            }
        }

        self.flush_commands();
    }

    /// Forward a click on `cell`.
    ///
    /// Every focused child sees the click; if none of them consumed it,
    /// unfocused children get it in attach order until one does. Clicks
    /// outside the grid are ignored.
    pub fn on_click(&mut self, cell: CellCoord) -> bool {
        if !self.has_cell(cell) {
            return false;
        }

        let mut processed = false;
        for child in &self.children {
            let mut obj = child.borrow_mut();
            if obj.state() == AttachState::Attached && obj.is_focused() {
                processed |= obj.click(cell, &mut self.commands);
            }
        }

        if !processed {
            for child in &self.children {
                let mut obj = child.borrow_mut();
                if obj.state() == AttachState::Attached
                    && !obj.is_focused()
                    && obj.click(cell, &mut self.commands)
                {
                    processed = true;
                    break;
                }
            }
        }

        self.flush_commands();
        processed
    }

    /// Forward a key event to attached children until one consumes it.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        let mut processed = false;
        for child in &self.children {
            let mut obj = child.borrow_mut();
            if obj.state() == AttachState::Attached && obj.key(key, &mut self.commands) {
                processed = true;
                break;
            }
        }

        self.flush_commands();
        processed
    }

    fn flush_commands(&mut self) {
        while let Some(command) = self.commands.pop() {
            match command {
                Command::Attach(object) => {
                    self.attach(object);
                }
                Command::Detach(id) => {
                    if !self.detach_by_id(id) {
                        warn!(target: LOG_TARGET, "[{}] detach command for unknown {}", self.config.name, id);
                    }
                }
                Command::Move { id, to } => {
                    let Some(object) = self.lookup.get(&id).cloned() else {
                        warn!(target: LOG_TARGET, "[{}] move command for unknown {}", self.config.name, id);
                        continue;
                    };
                    let from = object.borrow().occupied_cell();
                    self.relocate(&object, from, to);
                }
            }
        }
    }

    // === Notifications ===

    fn notify_object_attached(&self, object: &ObjectSummary) {
        self.deliver(&Notice::Attached(object));
    }

    fn notify_object_moved(&self, object: &ObjectSummary, from: CellCoord, to: CellCoord) {
        self.deliver(&Notice::Moved(object, from, to));
    }

    fn notify_object_detached(&self, object: &ObjectSummary) {
        self.deliver(&Notice::Detached(object));
    }

    /// Hand `notice` to every listener slot in the `Attached` state.
    fn deliver(&self, notice: &Notice<'_>) {
        for slot in self.listeners.slots() {
            if slot.state != AttachState::Attached {
                continue;
            }
            match (&slot.target, slot.key) {
                (ListenerTarget::Object, ListenerKey::Object(id)) => {
                    if let Some(child) = self.lookup.get(&id) {
                        notice.send(child.borrow_mut().entity_mut());
                    }
                }
                (ListenerTarget::External(weak), _) => {
                    if let Some(listener) = weak.upgrade() {
                        notice.send(&mut *listener.borrow_mut());
                    }
                }
                (ListenerTarget::Object, ListenerKey::External(_)) => {}
            }
        }
    }

    /// Broadcast `on_map_changed` to every child, pending ones included.
    fn notify_map_changed(&mut self) {
        for child in &self.children {
            child.borrow_mut().map_changed(&mut self.commands);
        }
    }

    // === Queries ===

    /// The cell at `coord`, or the trash cell when out of bounds.
    #[must_use]
    pub fn get_cell(&self, coord: CellCoord) -> &Cell {
        self.grid.cell(coord)
    }

    /// Check whether `coord` lies inside the grid.
    #[must_use]
    pub fn has_cell(&self, coord: CellCoord) -> bool {
        self.grid.has_cell(coord)
    }

    /// Grid dimensions.
    #[must_use]
    pub fn cells_count(&self) -> GridSize {
        self.grid.size()
    }

    /// Catch-all cell for out-of-bounds positions.
    #[must_use]
    pub fn trash_cell(&self) -> &Cell {
        self.grid.trash()
    }

    #[must_use]
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Managed children in attach order, pending ones included.
    #[must_use]
    pub fn children(&self) -> &[SharedObject] {
        &self.children
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Find a managed child by id.
    #[must_use]
    pub fn find_child(&self, id: ObjectId) -> Option<&SharedObject> {
        self.lookup.get(&id)
    }

    /// Deep copy: same configuration, children cloned into fresh objects
    /// that are pending attach on the new board. External listeners and
    /// children already pending detach are not carried over.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let mut copy = Self::with_config(self.config.clone());
        for child in &self.children {
            let clone = {
                let obj = child.borrow();
                if obj.state() == AttachState::WaitForDetach {
                    continue;
                }
                obj.duplicate()
            };
            copy.attach(clone.shared());
        }
        copy
    }
}
