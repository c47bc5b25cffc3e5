//! Skirmish: a tiny set of board entities for exercising the engine.
//!
//! - `Unit`: walks a fixed step every frame, optionally expires after a
//!   number of frames, takes clicks on its own cell
//! - `Base`: spawns a `Unit` on its cell when the spawn key is pressed and
//!   counts the board events it hears as a listener
//! - `Obstacle`: static scenery
//!
//! All three are serde types saved with bincode; `registry()` returns an
//! `EntityRegistry` that can read every one of them back.

mod base;
mod obstacle;
mod unit;

pub use base::{Base, SPAWN_KEY};
pub use obstacle::Obstacle;
pub use unit::Unit;

use crate::persist::EntityRegistry;

/// Snapshot tag for `Unit`.
pub const UNIT_TAG: &str = "skirmish.unit";
/// Snapshot tag for `Base`.
pub const BASE_TAG: &str = "skirmish.base";
/// Snapshot tag for `Obstacle`.
pub const OBSTACLE_TAG: &str = "skirmish.obstacle";

/// Entity kind discriminators.
pub const UNIT_KIND: u32 = 1;
pub const BASE_KIND: u32 = 2;
pub const OBSTACLE_KIND: u32 = 3;

/// Registry covering every skirmish entity.
#[must_use]
pub fn registry() -> EntityRegistry {
    let mut registry = EntityRegistry::new();
    registry.register::<Unit>(UNIT_TAG);
    registry.register::<Base>(BASE_TAG);
    registry.register::<Obstacle>(OBSTACLE_TAG);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_tags() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        for tag in [UNIT_TAG, BASE_TAG, OBSTACLE_TAG] {
            assert!(registry.contains(tag), "missing {tag}");
        }
    }
}
