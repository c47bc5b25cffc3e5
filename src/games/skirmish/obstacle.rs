use serde::{Deserialize, Serialize};

use crate::objects::{
    BoardListener, Drawable, Entity, Focusable, FrameHooks, Loggable, Persistent, Tangible,
};
use crate::persist::{encode_bincode, PersistError};

use super::{OBSTACLE_KIND, OBSTACLE_TAG};

/// Static scenery. Takes no input and runs no hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    height: u32,
}

impl Obstacle {
    #[must_use]
    pub fn new(height: u32) -> Self {
        Self { height }
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl BoardListener for Obstacle {}
impl Focusable for Obstacle {}
impl Tangible for Obstacle {}
impl FrameHooks for Obstacle {}
impl Drawable for Obstacle {}
impl Loggable for Obstacle {}

impl Persistent for Obstacle {
    fn type_tag(&self) -> &'static str {
        OBSTACLE_TAG
    }

    fn encode(&self) -> Result<Vec<u8>, PersistError> {
        encode_bincode(self)
    }
}

impl Entity for Obstacle {
    fn kind(&self) -> u32 {
        OBSTACLE_KIND
    }
}
