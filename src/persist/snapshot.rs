//! Board snapshots.
//!
//! ## Layout
//!
//! ```text
//! header     magic "GBRD", u16 version, name, u8 log_moves
//! ---- control point
//! children   i32 count, object reference records
//! ---- control point
//! grid       i32 width, i32 height, cell records (row-major), trash cell
//! ---- control point
//! listeners  i32 count, (u32 object id, u8 state) per object listener
//! ---- control point
//! ```
//!
//! An object reference record is a `u32` id plus a flag byte; the object
//! payload follows only the first time an id appears. Cells and listener
//! slots refer to objects by id, so a restored board shares one handle per
//! object across children, cells and listeners. External listeners are not
//! saved.

use std::io::{Read, Write};

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::{GameBoard, ListenerKey, ListenerSet};
use crate::core::{AttachState, BoardConfig, CellCoord, GridSize, ObjectId};
use crate::grid::{Cell, CellGrid, TRASH_COORD};
use crate::objects::{GameObject, SharedObject};

use super::error::{PersistError, PersistResult};
use super::registry::EntityRegistry;
use super::wire::{WireReader, WireWriter};

/// Leading bytes of every snapshot.
pub const MAGIC: [u8; 4] = *b"GBRD";

/// Current format version.
pub const VERSION: u16 = 1;

/// Write `board` to `out`.
pub fn write_board<W: Write>(board: &GameBoard, out: W) -> PersistResult<()> {
    let mut w = WireWriter::new(out);
    let mut written: FxHashSet<ObjectId> = FxHashSet::default();

    w.write_raw(&MAGIC)?;
    w.write_u16(VERSION)?;
    w.write_str(&board.config().name)?;
    w.write_u8(u8::from(board.config().log_moves))?;
    w.write_control_point()?;

    w.write_count(board.child_count())?;
    for child in board.children() {
        write_object_ref(&mut w, &mut written, &child.borrow())?;
    }
    w.write_control_point()?;

    let size = board.cells_count();
    w.write_i32(i32::from(size.width))?;
    w.write_i32(i32::from(size.height))?;
    for cell in board.grid().iter() {
        write_cell(&mut w, &written, cell)?;
    }
    write_cell(&mut w, &written, board.trash_cell())?;
    w.write_control_point()?;

    let object_slots: Vec<(ObjectId, AttachState)> = board
        .listeners()
        .slots()
        .iter()
        .filter_map(|slot| match slot.key {
            ListenerKey::Object(id) if written.contains(&id) => Some((id, slot.state)),
            _ => None,
        })
        .collect();
    w.write_count(object_slots.len())?;
    for (id, state) in object_slots {
        w.write_u32(id.raw())?;
        w.write_u8(state.to_byte())?;
    }
    w.write_control_point()?;

    w.flush()
}

/// Write `board` into a fresh byte vector.
pub fn to_bytes(board: &GameBoard) -> PersistResult<Vec<u8>> {
    let mut bytes = Vec::new();
    write_board(board, &mut bytes)?;
    Ok(bytes)
}

/// Read a board from `input`, decoding entities through `registry`.
///
/// The restored board gets a new `BoardId`; objects keep their stored ids.
/// Restored objects are linked to the board without running their
/// `on_attach` hook.
pub fn read_board<R: Read>(input: R, registry: &EntityRegistry) -> PersistResult<GameBoard> {
    let mut r = WireReader::new(input);
    let mut table: FxHashMap<ObjectId, SharedObject> = FxHashMap::default();

    let magic = r.read_magic()?;
    if magic != MAGIC {
        return Err(PersistError::BadMagic(magic));
    }
    let version = r.read_u16()?;
    if version != VERSION {
        return Err(PersistError::UnsupportedVersion(version));
    }
    let name = r.read_string()?;
    let log_moves = r.read_u8()? != 0;
    r.expect_control_point("header")?;

    let child_count = r.read_count()?;
    let mut children = Vec::with_capacity(child_count.min(1024));
    for _ in 0..child_count {
        children.push(read_object_ref(&mut r, &mut table, registry)?);
    }
    r.expect_control_point("children")?;

    let width = read_dimension(&mut r)?;
    let height = read_dimension(&mut r)?;
    let size = GridSize::new(width, height);
    // Cells grow with the records actually read, not the declared size.
    let mut cells = Vec::new();
    for index in 0..size.cell_count() {
        cells.push(read_cell(&mut r, &table, size.coord_of(index))?);
    }
    let trash = read_cell(&mut r, &table, TRASH_COORD)?;
    let grid = CellGrid::from_cells(size, cells, trash);
    r.expect_control_point("grid")?;

    let listener_count = r.read_count()?;
    let mut listeners = ListenerSet::new();
    for _ in 0..listener_count {
        let id = ObjectId(r.read_u32()?);
        let byte = r.read_u8()?;
        let state = AttachState::from_byte(byte).ok_or(PersistError::InvalidState(byte))?;
        // Only children enter the identity table.
        if !table.contains_key(&id) {
            return Err(PersistError::UnknownObject(id));
        }
        let key = ListenerKey::Object(id);
        if listeners.contains(key) {
            return Err(PersistError::DuplicateListener(id));
        }
        listeners.restore(key, state);
    }
    r.expect_control_point("listeners")?;

    let config = BoardConfig {
        name,
        width,
        height,
        log_moves,
    };
    debug!(target: "game_board", "[{}] restored {} objects on a {} grid", config.name, table.len(), size);
    Ok(GameBoard::from_parts(config, grid, children, listeners))
}

/// Read a board from a byte slice.
pub fn from_bytes(bytes: &[u8], registry: &EntityRegistry) -> PersistResult<GameBoard> {
    read_board(bytes, registry)
}

fn write_object_ref<W: Write>(
    w: &mut WireWriter<W>,
    written: &mut FxHashSet<ObjectId>,
    object: &GameObject,
) -> PersistResult<()> {
    w.write_u32(object.id().raw())?;
    if !written.insert(object.id()) {
        return w.write_u8(0);
    }

    w.write_u8(1)?;
    w.write_u8(object.state().to_byte())?;
    let cell = object.occupied_cell();
    w.write_i32(cell.x)?;
    w.write_i32(cell.y)?;
    let entity = object.entity();
    w.write_str(entity.type_tag())?;
    w.write_blob(&entity.encode()?)
}

fn read_object_ref<R: Read>(
    r: &mut WireReader<R>,
    table: &mut FxHashMap<ObjectId, SharedObject>,
    registry: &EntityRegistry,
) -> PersistResult<SharedObject> {
    let id = ObjectId(r.read_u32()?);
    let has_payload = r.read_u8()? != 0;

    if !has_payload {
        return table.get(&id).cloned().ok_or(PersistError::UnknownObject(id));
    }
    if table.contains_key(&id) {
        return Err(PersistError::DuplicateObject(id));
    }

    let byte = r.read_u8()?;
    let state = AttachState::from_byte(byte).ok_or(PersistError::InvalidState(byte))?;
    let cell = CellCoord::new(r.read_i32()?, r.read_i32()?);
    let tag = r.read_string()?;
    let body = r.read_blob()?;
    let entity = registry.decode(&tag, &body)?;

    let object = GameObject::restore(id, state, cell, entity).shared();
    table.insert(id, object.clone());
    Ok(object)
}

fn write_cell<W: Write>(
    w: &mut WireWriter<W>,
    written: &FxHashSet<ObjectId>,
    cell: &Cell,
) -> PersistResult<()> {
    let coord = cell.coord();
    w.write_i32(coord.x)?;
    w.write_i32(coord.y)?;

    let known: Vec<ObjectId> = cell
        .occupants()
        .iter()
        .copied()
        .filter(|id| written.contains(id))
        .collect();
    if known.len() != cell.len() {
        debug!(target: "game_board", "cell {} holds {} unmanaged objects, not saved", coord, cell.len() - known.len());
    }

    w.write_count(known.len())?;
    for id in known {
        w.write_u32(id.raw())?;
    }
    Ok(())
}

fn read_cell<R: Read>(
    r: &mut WireReader<R>,
    table: &FxHashMap<ObjectId, SharedObject>,
    expected: CellCoord,
) -> PersistResult<Cell> {
    let found = CellCoord::new(r.read_i32()?, r.read_i32()?);
    if found != expected {
        return Err(PersistError::CellMismatch { expected, found });
    }

    let count = r.read_count()?;
    let mut cell = Cell::new(expected);
    for _ in 0..count {
        let id = ObjectId(r.read_u32()?);
        if !table.contains_key(&id) {
            return Err(PersistError::UnknownObject(id));
        }
        cell.add(id);
    }
    Ok(cell)
}

fn read_dimension<R: Read>(r: &mut WireReader<R>) -> PersistResult<u16> {
    let value = r.read_i32()?;
    u16::try_from(value).map_err(|_| PersistError::InvalidLength(i64::from(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::skirmish::{self, Obstacle};

    #[test]
    fn test_empty_board_roundtrip() {
        let board = GameBoard::with_config(BoardConfig::new(2, 3).with_name("empty").quiet_moves());
        let bytes = to_bytes(&board).unwrap();
        let restored = from_bytes(&bytes, &skirmish::registry()).unwrap();

        assert_eq!(restored.cells_count(), GridSize::new(2, 3));
        assert_eq!(restored.config().name, "empty");
        assert!(!restored.config().log_moves);
        assert_eq!(restored.child_count(), 0);
        assert_eq!(restored.trash_cell().coord(), TRASH_COORD);
    }

    #[test]
    fn test_bad_magic() {
        let err = from_bytes(b"NOPE\x01\x00", &skirmish::registry()).unwrap_err();
        assert!(matches!(err, PersistError::BadMagic(m) if &m == b"NOPE"));
    }

    #[test]
    fn test_wrong_version() {
        let board = GameBoard::new(1, 1);
        let mut bytes = to_bytes(&board).unwrap();
        bytes[4] = 9;

        let err = from_bytes(&bytes, &skirmish::registry()).unwrap_err();
        assert!(matches!(err, PersistError::UnsupportedVersion(9)));
    }

    #[test]
    fn test_unmanaged_occupant_is_dropped() {
        let config = BoardConfig::new(2, 2);
        let mut grid = CellGrid::new(config.size());
        grid.cell_mut(CellCoord::new(1, 1)).add(ObjectId(u32::MAX));
        let board = GameBoard::from_parts(config, grid, Vec::new(), ListenerSet::new());

        let restored = from_bytes(&to_bytes(&board).unwrap(), &skirmish::registry()).unwrap();
        assert!(restored.get_cell(CellCoord::new(1, 1)).is_empty());
    }

    #[test]
    fn test_oversized_grid_header_is_rejected() {
        let board = GameBoard::new(2, 2);
        let mut bytes = to_bytes(&board).unwrap();
        // header (16) + control point, child count, control point
        let width_at = 16 + 4 + 4 + 4;
        bytes[width_at..width_at + 4].copy_from_slice(&65535i32.to_le_bytes());
        bytes[width_at + 4..width_at + 8].copy_from_slice(&65535i32.to_le_bytes());

        let err = from_bytes(&bytes, &skirmish::registry()).unwrap_err();
        assert!(matches!(
            err,
            PersistError::CellMismatch { expected, found }
                if expected == CellCoord::new(2, 0) && found == CellCoord::new(0, 1)
        ));
    }

    #[test]
    fn test_duplicate_listener_record_is_rejected() {
        let mut board = GameBoard::new(2, 2);
        board.attach(GameObject::new(Obstacle::new(1)).shared());
        board.on_frame_start();
        let bytes = to_bytes(&board).unwrap();

        // Tail: i32 count, one (u32 id, u8 state) record, control point.
        let record_at = bytes.len() - 4 - 5;
        let record = bytes[record_at..record_at + 5].to_vec();
        let mut doubled = bytes[..record_at - 4].to_vec();
        doubled.extend_from_slice(&2i32.to_le_bytes());
        doubled.extend_from_slice(&record);
        doubled.extend_from_slice(&record);
        doubled.extend_from_slice(&bytes[bytes.len() - 4..]);

        let err = from_bytes(&doubled, &skirmish::registry()).unwrap_err();
        assert!(matches!(err, PersistError::DuplicateListener(_)));
    }

    #[test]
    fn test_trash_coord_constant() {
        assert_eq!(TRASH_COORD, CellCoord::new(-1, -1));
    }
}
