//! Framework-managed wrapper around a user entity.
//!
//! `GameObject` carries the bookkeeping the board relies on (identity,
//! attach state, occupied cell, owning board) while the entity supplies
//! behavior. Only the board changes the attach state or the board link.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{AttachState, BoardId, Canvas, CellCoord, KeyEvent, ObjectId};

use super::capability::Entity;
use super::commands::{Commands, ObjectContext};

/// Shared handle to a game object.
///
/// The board keeps one clone per child; external code may keep others.
pub type SharedObject = Rc<RefCell<GameObject>>;

/// Snapshot of an object handed to listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectSummary {
    pub id: ObjectId,
    pub kind: u32,
    pub label: String,
    pub cell: CellCoord,
}

/// A board object: bookkeeping plus a boxed entity.
///
/// ```
/// use game_board::core::{AttachState, CellCoord};
/// use game_board::games::skirmish::Obstacle;
/// use game_board::objects::GameObject;
///
/// let object = GameObject::at(CellCoord::new(2, 1), Obstacle::new(3));
/// assert_eq!(object.state(), AttachState::Detached);
/// assert!(!object.is_attached());
/// assert_eq!(object.occupied_cell(), CellCoord::new(2, 1));
/// assert!(object.downcast_ref::<Obstacle>().is_some());
/// ```
pub struct GameObject {
    id: ObjectId,
    state: AttachState,
    occupied_cell: CellCoord,
    board: Option<BoardId>,
    entity: Box<dyn Entity>,
}

impl GameObject {
    /// Wrap `entity` in a new detached object at cell `(0, 0)`.
    pub fn new(entity: impl Entity) -> Self {
        Self::at(CellCoord::default(), entity)
    }

    /// Wrap `entity` in a new detached object at `cell`.
    pub fn at(cell: CellCoord, entity: impl Entity) -> Self {
        Self::from_boxed(cell, Box::new(entity))
    }

    /// Wrap an already boxed entity.
    #[must_use]
    pub fn from_boxed(cell: CellCoord, entity: Box<dyn Entity>) -> Self {
        Self {
            id: ObjectId::next(),
            state: AttachState::Detached,
            occupied_cell: cell,
            board: None,
            entity,
        }
    }

    /// Rebuild an object read from a snapshot, keeping its stored id.
    pub(crate) fn restore(
        id: ObjectId,
        state: AttachState,
        cell: CellCoord,
        entity: Box<dyn Entity>,
    ) -> Self {
        ObjectId::reserve(id);
        Self {
            id,
            state,
            occupied_cell: cell,
            board: None,
            entity,
        }
    }

    /// Move this object into a shared handle.
    #[must_use]
    pub fn shared(self) -> SharedObject {
        Rc::new(RefCell::new(self))
    }

    /// Detached deep copy with a fresh id at the same cell.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self::from_boxed(self.occupied_cell, self.entity.clone_entity())
    }

    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> AttachState {
        self.state
    }

    /// True while the object belongs to a board, pending states included.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state != AttachState::Detached
    }

    /// The owning board, if any.
    #[must_use]
    pub fn board(&self) -> Option<BoardId> {
        self.board
    }

    #[must_use]
    pub fn occupied_cell(&self) -> CellCoord {
        self.occupied_cell
    }

    /// Change the recorded cell without touching any board.
    ///
    /// Use `GameBoard::move_object` for attached objects so cell occupancy
    /// stays in sync.
    pub fn set_occupied_cell(&mut self, cell: CellCoord) {
        self.occupied_cell = cell;
    }

    #[must_use]
    pub fn entity(&self) -> &dyn Entity {
        self.entity.as_ref()
    }

    pub fn entity_mut(&mut self) -> &mut dyn Entity {
        self.entity.as_mut()
    }

    /// Borrow the entity as its concrete type.
    #[must_use]
    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.entity().as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the entity as its concrete type.
    pub fn downcast_mut<T: Entity>(&mut self) -> Option<&mut T> {
        self.entity_mut().as_any_mut().downcast_mut::<T>()
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("{}#{}", self.entity.label(), self.id.raw())
    }

    #[must_use]
    pub fn summary(&self) -> ObjectSummary {
        ObjectSummary {
            id: self.id,
            kind: self.entity.kind(),
            label: self.label(),
            cell: self.occupied_cell,
        }
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.entity.is_focused()
    }

    // --- board-only transitions ---

    pub(crate) fn link(&mut self, board: BoardId) {
        self.board = Some(board);
        self.entity.on_attach();
    }

    /// Point at `board` without running `on_attach`. Used for objects
    /// restored from a snapshot, which were attached when saved.
    pub(crate) fn relink(&mut self, board: BoardId) {
        self.board = Some(board);
    }

    pub(crate) fn unlink(&mut self) {
        self.entity.on_detach();
        self.board = None;
    }

    pub(crate) fn advance_to(&mut self, state: AttachState) {
        self.state.advance_to(state);
    }

    // --- hook dispatch ---

    pub(crate) fn map_changed(&mut self, commands: &mut Commands) {
        let mut ctx = ObjectContext::new(self.id, self.occupied_cell, commands);
        self.entity.on_map_changed(&mut ctx);
    }

    pub(crate) fn frame_start(&mut self, commands: &mut Commands) {
        let mut ctx = ObjectContext::new(self.id, self.occupied_cell, commands);
        self.entity.on_frame_start(&mut ctx);
    }

    pub(crate) fn frame(&mut self, elapsed_ms: u64, commands: &mut Commands) {
        let mut ctx = ObjectContext::new(self.id, self.occupied_cell, commands);
        self.entity.on_frame(elapsed_ms, &mut ctx);
    }

    pub(crate) fn pre_draw(&mut self) {
        self.entity.on_pre_draw();
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        self.entity.on_draw(canvas);
    }

    pub(crate) fn frame_end(&mut self, commands: &mut Commands) {
        let mut ctx = ObjectContext::new(self.id, self.occupied_cell, commands);
        self.entity.on_frame_end(&mut ctx);
    }

    pub(crate) fn click(&mut self, cell: CellCoord, commands: &mut Commands) -> bool {
        let mut ctx = ObjectContext::new(self.id, self.occupied_cell, commands);
        self.entity.on_click(cell, &mut ctx)
    }

    pub(crate) fn key(&mut self, key: KeyEvent, commands: &mut Commands) -> bool {
        let mut ctx = ObjectContext::new(self.id, self.occupied_cell, commands);
        self.entity.on_key(key, &mut ctx)
    }
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("label", &self.entity.label())
            .field("state", &self.state)
            .field("occupied_cell", &self.occupied_cell)
            .field("board", &self.board)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::skirmish::{Obstacle, Unit};

    #[test]
    fn test_new_object_is_detached() {
        let object = GameObject::new(Obstacle::new(1));

        assert_eq!(object.state(), AttachState::Detached);
        assert_eq!(object.board(), None);
        assert_eq!(object.occupied_cell(), CellCoord::new(0, 0));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = GameObject::new(Obstacle::new(1));
        let b = GameObject::new(Obstacle::new(1));
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_link_unlink() {
        let mut object = GameObject::new(Obstacle::new(1));
        let board = BoardId::next();

        object.link(board);
        assert_eq!(object.board(), Some(board));

        object.unlink();
        assert_eq!(object.board(), None);
    }

    #[test]
    fn test_duplicate_gets_fresh_id() {
        let mut original = GameObject::at(CellCoord::new(2, 2), Unit::new("scout", (1, 0)));
        original.advance_to(AttachState::Attached);

        let copy = original.duplicate();

        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.state(), AttachState::Detached);
        assert_eq!(copy.occupied_cell(), CellCoord::new(2, 2));
        assert_eq!(copy.downcast_ref::<Unit>().map(Unit::name), Some("scout"));
    }

    #[test]
    fn test_summary() {
        let object = GameObject::at(CellCoord::new(1, 0), Obstacle::new(2));
        let summary = object.summary();

        assert_eq!(summary.id, object.id());
        assert_eq!(summary.cell, CellCoord::new(1, 0));
        assert_eq!(summary.label, format!("Obstacle#{}", object.id().raw()));
    }

    #[test]
    fn test_downcast_mismatch() {
        let object = GameObject::new(Obstacle::new(1));
        assert!(object.downcast_ref::<Unit>().is_none());
    }
}
