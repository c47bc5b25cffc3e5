//! Error types for snapshot reading and writing.

use std::fmt;

use crate::core::{CellCoord, ObjectId};

/// Everything that can go wrong while writing or reading a board snapshot.
#[derive(Debug)]
pub enum PersistError {
    /// Underlying reader or writer failed (including truncated input).
    Io(std::io::Error),
    /// An entity body failed to encode or decode.
    Codec(bincode::Error),
    /// The stream doesn't start with the snapshot magic.
    BadMagic([u8; 4]),
    /// The stream was written by an unknown format version.
    UnsupportedVersion(u16),
    /// A section marker was missing, so the stream is out of alignment.
    ControlPointMismatch {
        /// Section that should have ended here.
        section: &'static str,
        /// Value found instead of the marker.
        found: u32,
    },
    /// No decoder is registered for this entity type tag.
    UnknownTag(String),
    /// The entity type doesn't support snapshots.
    NotPersistent(String),
    /// A record referenced an object that was never written.
    UnknownObject(ObjectId),
    /// An object payload appeared twice.
    DuplicateObject(ObjectId),
    /// An object was registered as a listener twice.
    DuplicateListener(ObjectId),
    /// An attach state byte was out of range.
    InvalidState(u8),
    /// A count or length prefix was negative or implausibly large.
    InvalidLength(i64),
    /// A cell record didn't match the expected grid position.
    CellMismatch {
        expected: CellCoord,
        found: CellCoord,
    },
    /// A string field wasn't valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "I/O error: {e}"),
            PersistError::Codec(e) => write!(f, "entity codec error: {e}"),
            PersistError::BadMagic(magic) => write!(f, "not a board snapshot (magic {magic:?})"),
            PersistError::UnsupportedVersion(v) => write!(f, "unsupported snapshot version {v}"),
            PersistError::ControlPointMismatch { section, found } => {
                write!(f, "control point missing after {section} section (found {found:#010x})")
            }
            PersistError::UnknownTag(tag) => write!(f, "no decoder registered for entity type {tag:?}"),
            PersistError::NotPersistent(tag) => write!(f, "entity type {tag:?} can't be saved"),
            PersistError::UnknownObject(id) => write!(f, "reference to unknown {id}"),
            PersistError::DuplicateObject(id) => write!(f, "{id} written twice"),
            PersistError::DuplicateListener(id) => write!(f, "{id} registered as a listener twice"),
            PersistError::InvalidState(b) => write!(f, "invalid attach state byte {b}"),
            PersistError::InvalidLength(n) => write!(f, "invalid count or length {n}"),
            PersistError::CellMismatch { expected, found } => {
                write!(f, "expected cell {expected}, found {found}")
            }
            PersistError::InvalidUtf8 => write!(f, "string field is not valid UTF-8"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Codec(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::Io(err)
    }
}

impl From<bincode::Error> for PersistError {
    fn from(err: bincode::Error) -> Self {
        PersistError::Codec(err)
    }
}

/// Result type for snapshot operations.
pub type PersistResult<T> = Result<T, PersistError>;
