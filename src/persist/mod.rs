//! Binary board snapshots.
//!
//! ## Example
//!
//! ```
//! use game_board::board::GameBoard;
//! use game_board::core::CellCoord;
//! use game_board::games::skirmish::{self, Obstacle};
//! use game_board::objects::GameObject;
//! use game_board::persist;
//!
//! let mut board = GameBoard::new(3, 3);
//! board.attach(GameObject::at(CellCoord::new(2, 0), Obstacle::new(5)).shared());
//! board.on_frame_start();
//!
//! let bytes = persist::to_bytes(&board).unwrap();
//! let restored = persist::from_bytes(&bytes, &skirmish::registry()).unwrap();
//! assert_eq!(restored.child_count(), 1);
//! assert_eq!(restored.get_cell(CellCoord::new(2, 0)).len(), 1);
//! ```

pub mod error;
pub mod registry;
pub mod snapshot;
pub mod wire;

pub use error::{PersistError, PersistResult};
pub use registry::{encode_bincode, DecodeFn, EntityRegistry};
pub use snapshot::{from_bytes, read_board, to_bytes, write_board, MAGIC, VERSION};
pub use wire::CONTROL_POINT;
