//! The board's cell storage: a flat row-major grid plus a trash cell.
//!
//! Any coordinate outside the grid resolves to the trash cell, so lookups
//! never fail.

use crate::core::{CellCoord, GridSize, ObjectId};

use super::cell::Cell;

/// Coordinate reported by the trash cell.
pub const TRASH_COORD: CellCoord = CellCoord::new(-1, -1);

/// Fixed-size grid of cells owned by a board.
///
/// ```
/// use game_board::core::{CellCoord, GridSize, ObjectId};
/// use game_board::grid::CellGrid;
///
/// let mut grid = CellGrid::new(GridSize::new(3, 3));
/// grid.cell_mut(CellCoord::new(5, 5)).add(ObjectId(1));
/// assert!(grid.trash().contains(ObjectId(1)));
/// ```
#[derive(Clone, Debug)]
pub struct CellGrid {
    size: GridSize,
    cells: Vec<Cell>,
    trash: Cell,
}

impl CellGrid {
    /// Create an empty grid with one cell per coordinate.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        let cells = (0..size.cell_count())
            .map(|i| Cell::new(size.coord_of(i)))
            .collect();

        Self {
            size,
            cells,
            trash: Cell::new(TRASH_COORD),
        }
    }

    /// Assemble a grid from cells already laid out in row-major order.
    pub(crate) fn from_cells(size: GridSize, cells: Vec<Cell>, trash: Cell) -> Self {
        debug_assert_eq!(cells.len(), size.cell_count());
        Self { size, cells, trash }
    }

    /// Grid dimensions.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Pure bounds predicate.
    #[must_use]
    pub fn has_cell(&self, coord: CellCoord) -> bool {
        self.size.contains(coord)
    }

    /// The cell at `coord`, or the trash cell when out of bounds.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> &Cell {
        match self.size.index_of(coord) {
            Some(i) => &self.cells[i],
            None => &self.trash,
        }
    }

    /// Mutable variant of [`CellGrid::cell`].
    pub fn cell_mut(&mut self, coord: CellCoord) -> &mut Cell {
        match self.size.index_of(coord) {
            Some(i) => &mut self.cells[i],
            None => &mut self.trash,
        }
    }

    /// The trash cell.
    #[must_use]
    pub fn trash(&self) -> &Cell {
        &self.trash
    }

    /// In-bounds cells in row-major order (trash excluded).
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Move `id` from the cell at `from` to the cell at `to`.
    pub fn relocate(&mut self, id: ObjectId, from: CellCoord, to: CellCoord) {
        self.cell_mut(from).remove(id);
        self.cell_mut(to).add(id);
    }

    /// Find every cell (trash included) that references `id`.
    pub fn cells_containing(&self, id: ObjectId) -> impl Iterator<Item = &Cell> {
        self.cells
            .iter()
            .chain(std::iter::once(&self.trash))
            .filter(move |c| c.contains(id))
    }

    /// Total number of occupant references across all cells and trash.
    #[must_use]
    pub fn total_occupants(&self) -> usize {
        self.cells.iter().map(Cell::len).sum::<usize>() + self.trash.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_coord_has_cell() {
        let grid = CellGrid::new(GridSize::new(4, 3));

        assert_eq!(grid.iter().count(), 12);
        for y in 0..3 {
            for x in 0..4 {
                let coord = CellCoord::new(x, y);
                assert!(grid.has_cell(coord));
                assert_eq!(grid.cell(coord).coord(), coord);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_is_trash() {
        let mut grid = CellGrid::new(GridSize::new(2, 2));

        for coord in [
            CellCoord::new(-1, 0),
            CellCoord::new(0, -1),
            CellCoord::new(2, 0),
            CellCoord::new(0, 2),
            CellCoord::new(100, 100),
        ] {
            assert!(!grid.has_cell(coord));
            assert_eq!(grid.cell(coord).coord(), TRASH_COORD);
        }

        grid.cell_mut(CellCoord::new(7, 7)).add(ObjectId(3));
        assert!(grid.trash().contains(ObjectId(3)));
        assert!(grid.cell(CellCoord::new(-5, 2)).contains(ObjectId(3)));
    }

    #[test]
    fn test_relocate() {
        let mut grid = CellGrid::new(GridSize::new(3, 3));
        let a = CellCoord::new(1, 1);
        let b = CellCoord::new(2, 0);

        grid.cell_mut(a).add(ObjectId(1));
        grid.relocate(ObjectId(1), a, b);

        assert!(grid.cell(a).is_empty());
        assert!(grid.cell(b).contains(ObjectId(1)));
        assert_eq!(grid.total_occupants(), 1);
    }

    #[test]
    fn test_relocate_into_trash_and_back() {
        let mut grid = CellGrid::new(GridSize::new(3, 3));
        let inside = CellCoord::new(0, 0);
        let outside = CellCoord::new(5, 5);

        grid.cell_mut(inside).add(ObjectId(1));
        grid.relocate(ObjectId(1), inside, outside);
        assert_eq!(grid.cells_containing(ObjectId(1)).count(), 1);
        assert!(grid.trash().contains(ObjectId(1)));

        grid.relocate(ObjectId(1), outside, inside);
        assert!(grid.trash().is_empty());
        assert!(grid.cell(inside).contains(ObjectId(1)));
    }
}
