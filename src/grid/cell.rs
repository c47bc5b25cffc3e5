//! A single grid location and its occupants.

use smallvec::SmallVec;

use crate::core::{CellCoord, ObjectId};

/// Occupancy record for one cell.
///
/// Holds object ids only; the board and external holders own the objects.
/// `add` and `remove` are idempotent: adding an id twice or removing an
/// absent id leaves the cell unchanged and returns `false`.
///
/// ```
/// use game_board::core::{CellCoord, ObjectId};
/// use game_board::grid::Cell;
///
/// let mut cell = Cell::new(CellCoord::new(1, 1));
/// assert!(cell.add(ObjectId(5)));
/// assert!(!cell.add(ObjectId(5)));
/// assert_eq!(cell.len(), 1);
/// assert!(cell.remove(ObjectId(5)));
/// assert!(!cell.remove(ObjectId(5)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: CellCoord,
    occupants: SmallVec<[ObjectId; 4]>,
}

impl Cell {
    /// Create an empty cell at `coord`.
    #[must_use]
    pub fn new(coord: CellCoord) -> Self {
        Self {
            coord,
            occupants: SmallVec::new(),
        }
    }

    /// Coordinate of this cell. The trash cell reports `(-1, -1)`.
    #[must_use]
    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Add an occupant. Returns `false` if it was already present.
    pub fn add(&mut self, id: ObjectId) -> bool {
        if self.occupants.contains(&id) {
            return false;
        }
        self.occupants.push(id);
        true
    }

    /// Remove an occupant. Returns `false` if it wasn't present.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        match self.occupants.iter().position(|&o| o == id) {
            Some(pos) => {
                self.occupants.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Check whether `id` occupies this cell.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.occupants.contains(&id)
    }

    /// Current occupants, in no particular order.
    #[must_use]
    pub fn occupants(&self) -> &[ObjectId] {
        &self.occupants
    }

    /// Number of occupants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    /// Check if the cell has no occupants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}
