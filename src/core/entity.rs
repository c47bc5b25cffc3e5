//! Object and board identification.
//!
//! Every game object gets a unique `ObjectId` when it is constructed, and
//! every board gets a unique `BoardId`. Both come from process-wide
//! counters, so ids never repeat within one run even across boards.
//!
//! ## Usage
//!
//! ```
//! use game_board::core::ObjectId;
//!
//! let a = ObjectId::next();
//! let b = ObjectId::next();
//! assert!(b > a);
//! ```

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_OBJECT_ID: AtomicU32 = AtomicU32::new(1);
static NEXT_BOARD_ID: AtomicU32 = AtomicU32::new(1);

/// Unique identifier for a game object.
///
/// Ids are handed out in increasing order. `ObjectId(0)` is never
/// allocated and can be used as a sentinel by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Allocate the next object id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Make sure later allocations never hand out `id` again.
    ///
    /// Used when objects are restored from a snapshot with their stored ids.
    pub fn reserve(id: ObjectId) {
        NEXT_OBJECT_ID.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ObjectId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object({})", self.0)
    }
}

/// Unique identifier for a board instance.
///
/// Objects keep a `BoardId` as their back-reference to the owning board
/// instead of a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(pub u32);

impl BoardId {
    /// Allocate the next board id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BoardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({})", self.0)
    }
}
