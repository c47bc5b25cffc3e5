//! Entity decoder registry.
//!
//! Snapshots store each entity as a type tag plus an opaque body. Reading a
//! snapshot back needs to know how to turn a body into a boxed entity for
//! every tag, which is what `EntityRegistry` records.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::objects::Entity;

use super::error::{PersistError, PersistResult};

/// Decoder from an entity body to a boxed entity.
pub type DecodeFn = fn(&[u8]) -> PersistResult<Box<dyn Entity>>;

/// Registry of entity decoders keyed by type tag.
///
/// ## Example
///
/// ```
/// use game_board::games::skirmish::{Obstacle, OBSTACLE_TAG};
/// use game_board::objects::Persistent;
/// use game_board::persist::EntityRegistry;
///
/// let mut registry = EntityRegistry::new();
/// registry.register::<Obstacle>(OBSTACLE_TAG);
///
/// let body = Obstacle::new(4).encode().unwrap();
/// let entity = registry.decode(OBSTACLE_TAG, &body).unwrap();
/// assert_eq!(entity.as_ref().as_any().downcast_ref::<Obstacle>(), Some(&Obstacle::new(4)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    decoders: FxHashMap<String, DecodeFn>,
}

impl EntityRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a serde entity whose body is bincode.
    ///
    /// Panics if `tag` is already registered.
    pub fn register<T: Entity + DeserializeOwned>(&mut self, tag: &str) {
        self.register_with(tag, decode_bincode::<T>);
    }

    /// Register a custom decoder.
    ///
    /// Panics if `tag` is already registered.
    pub fn register_with(&mut self, tag: &str, decode: DecodeFn) {
        if self.decoders.contains_key(tag) {
            panic!("Entity tag {tag:?} already registered");
        }
        self.decoders.insert(tag.to_string(), decode);
    }

    /// Check if a decoder exists for `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.decoders.contains_key(tag)
    }

    /// Decode a body written under `tag`.
    pub fn decode(&self, tag: &str, body: &[u8]) -> PersistResult<Box<dyn Entity>> {
        let decode = self
            .decoders
            .get(tag)
            .ok_or_else(|| PersistError::UnknownTag(tag.to_string()))?;
        decode(body)
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

fn decode_bincode<T: Entity + DeserializeOwned>(body: &[u8]) -> PersistResult<Box<dyn Entity>> {
    let entity: T = bincode::deserialize(body)?;
    Ok(Box::new(entity))
}

/// Encode an entity body with bincode, for use in `Persistent::encode`.
pub fn encode_bincode<T: Serialize>(value: &T) -> PersistResult<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}
