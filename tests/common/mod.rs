//! Shared test entity that records every callback it receives.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use game_board::core::{Canvas, CellCoord, KeyEvent};
use game_board::objects::{
    BoardListener, Drawable, Entity, Focusable, FrameHooks, GameObject, Loggable, ObjectContext,
    ObjectSummary, Persistent, SharedObject, Tangible,
};

/// Event journal shared by every recorder in a test.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Number of journal entries equal to `entry`.
pub fn count(journal: &Journal, entry: &str) -> usize {
    journal.borrow().iter().filter(|e| e.as_str() == entry).count()
}

/// Journal entries starting with `prefix`, in order.
pub fn entries(journal: &Journal, prefix: &str) -> Vec<String> {
    journal
        .borrow()
        .iter()
        .filter(|e| e.starts_with(prefix))
        .cloned()
        .collect()
}

#[derive(Clone)]
pub struct Recorder {
    pub name: String,
    pub journal: Journal,
    pub focused: bool,
    pub consume_clicks: bool,
    pub consume_keys: bool,
}

impl Recorder {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            journal: Rc::clone(journal),
            focused: false,
            consume_clicks: false,
            consume_keys: false,
        }
    }

    pub fn focused(mut self) -> Self {
        self.focused = true;
        self
    }

    pub fn consuming(mut self) -> Self {
        self.consume_clicks = true;
        self.consume_keys = true;
        self
    }

    pub fn at(self, x: i32, y: i32) -> SharedObject {
        GameObject::at(CellCoord::new(x, y), self).shared()
    }

    fn record(&self, event: impl AsRef<str>) {
        self.journal
            .borrow_mut()
            .push(format!("{}:{}", self.name, event.as_ref()));
    }
}

impl BoardListener for Recorder {
    fn on_object_attached(&mut self, object: &ObjectSummary) {
        self.record(format!("heard_attach {}", object.id.raw()));
    }

    fn on_object_moved(&mut self, object: &ObjectSummary, from: CellCoord, to: CellCoord) {
        self.record(format!("heard_move {} {from}->{to}", object.id.raw()));
    }

    fn on_object_detached(&mut self, object: &ObjectSummary) {
        self.record(format!("heard_detach {}", object.id.raw()));
    }
}

impl Focusable for Recorder {
    fn is_focused(&self) -> bool {
        self.focused
    }
}

impl Tangible for Recorder {
    fn on_click(&mut self, _cell: CellCoord, _ctx: &mut ObjectContext<'_>) -> bool {
        self.record("click");
        self.consume_clicks
    }

    fn on_key(&mut self, _key: KeyEvent, _ctx: &mut ObjectContext<'_>) -> bool {
        self.record("key");
        self.consume_keys
    }
}

impl FrameHooks for Recorder {
    fn on_attach(&mut self) {
        self.record("on_attach");
    }

    fn on_detach(&mut self) {
        self.record("on_detach");
    }

    fn on_map_changed(&mut self, _ctx: &mut ObjectContext<'_>) {
        self.record("map_changed");
    }

    fn on_frame_start(&mut self, _ctx: &mut ObjectContext<'_>) {
        self.record("frame_start");
    }

    fn on_frame(&mut self, elapsed_ms: u64, _ctx: &mut ObjectContext<'_>) {
        self.record(format!("frame {elapsed_ms}"));
    }

    fn on_pre_draw(&mut self) {
        self.record("pre_draw");
    }

    fn on_frame_end(&mut self, _ctx: &mut ObjectContext<'_>) {
        self.record("frame_end");
    }
}

impl Drawable for Recorder {
    fn on_draw(&self, canvas: &mut dyn Canvas) {
        if let Some(lines) = canvas.as_any_mut().downcast_mut::<Vec<String>>() {
            lines.push(self.name.clone());
        }
    }
}

impl Loggable for Recorder {
    fn label(&self) -> String {
        format!("Recorder[{}]", self.name)
    }
}

impl Persistent for Recorder {}
impl Entity for Recorder {}

/// External observer that is not a board object.
#[derive(Default)]
pub struct Watcher {
    pub attached: Vec<u32>,
    pub moved: Vec<(u32, CellCoord, CellCoord)>,
    pub detached: Vec<u32>,
}

impl BoardListener for Watcher {
    fn on_object_attached(&mut self, object: &ObjectSummary) {
        self.attached.push(object.id.raw());
    }

    fn on_object_moved(&mut self, object: &ObjectSummary, from: CellCoord, to: CellCoord) {
        self.moved.push((object.id.raw(), from, to));
    }

    fn on_object_detached(&mut self, object: &ObjectSummary) {
        self.detached.push(object.id.raw());
    }
}
