use serde::{Deserialize, Serialize};

use crate::core::{Canvas, CellCoord};
use crate::objects::{
    BoardListener, Drawable, Entity, Focusable, FrameHooks, Loggable, ObjectContext, Persistent,
    Tangible,
};
use crate::persist::{encode_bincode, PersistError};

use super::{UNIT_KIND, UNIT_TAG};

/// A walker.
///
/// Every frame start the unit asks the board to move it by `step`. With a
/// lifetime set, it asks to be detached once it has seen that many frame
/// starts instead of moving again.
///
/// ```
/// use game_board::board::GameBoard;
/// use game_board::core::CellCoord;
/// use game_board::games::skirmish::Unit;
/// use game_board::objects::GameObject;
///
/// let mut board = GameBoard::new(4, 1);
/// let unit = GameObject::at(CellCoord::new(0, 0), Unit::new("scout", (1, 0))).shared();
/// board.attach(unit.clone());
///
/// board.on_frame_start();
/// board.on_frame_start();
/// assert_eq!(unit.borrow().occupied_cell(), CellCoord::new(2, 0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    name: String,
    step: (i32, i32),
    focused: bool,
    lifetime: Option<u32>,
    age: u32,
    clicks: u32,
    elapsed_ms: u64,
}

impl Unit {
    pub fn new(name: impl Into<String>, step: (i32, i32)) -> Self {
        Self {
            name: name.into(),
            step,
            focused: false,
            lifetime: None,
            age: 0,
            clicks: 0,
            elapsed_ms: 0,
        }
    }

    /// Give the unit input focus (builder pattern).
    #[must_use]
    pub fn with_focus(mut self) -> Self {
        self.focused = true;
        self
    }

    /// Detach after `frames` frame starts (builder pattern).
    #[must_use]
    pub fn with_lifetime(mut self, frames: u32) -> Self {
        self.lifetime = Some(frames);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn step(&self) -> (i32, i32) {
        self.step
    }

    /// Frame starts seen while attached.
    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Clicks consumed.
    #[must_use]
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Total time reported through `on_frame`.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl BoardListener for Unit {}

impl Focusable for Unit {
    fn is_focused(&self) -> bool {
        self.focused
    }
}

impl Tangible for Unit {
    fn on_click(&mut self, cell: CellCoord, ctx: &mut ObjectContext<'_>) -> bool {
        if cell != ctx.cell() {
            return false;
        }
        self.clicks += 1;
        true
    }
}

impl FrameHooks for Unit {
    fn on_frame_start(&mut self, ctx: &mut ObjectContext<'_>) {
        self.age += 1;
        if self.lifetime.is_some_and(|frames| self.age >= frames) {
            ctx.detach_self();
            return;
        }
        if self.step != (0, 0) {
            let (dx, dy) = self.step;
            ctx.move_to(ctx.cell().offset(dx, dy));
        }
    }

    fn on_frame(&mut self, elapsed_ms: u64, _ctx: &mut ObjectContext<'_>) {
        self.elapsed_ms += elapsed_ms;
    }
}

impl Drawable for Unit {
    fn on_draw(&self, canvas: &mut dyn Canvas) {
        if let Some(lines) = canvas.as_any_mut().downcast_mut::<Vec<String>>() {
            lines.push(self.label());
        }
    }
}

impl Loggable for Unit {
    fn label(&self) -> String {
        format!("Unit[{}]", self.name)
    }
}

impl Persistent for Unit {
    fn type_tag(&self) -> &'static str {
        UNIT_TAG
    }

    fn encode(&self) -> Result<Vec<u8>, PersistError> {
        encode_bincode(self)
    }
}

impl Entity for Unit {
    fn kind(&self) -> u32 {
        UNIT_KIND
    }
}
