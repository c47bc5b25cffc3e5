//! Frame pump and input routing integration tests.

mod common;

use std::rc::Rc;

use common::{count, journal, Recorder};
use game_board::board::GameBoard;
use game_board::core::{AttachState, CellCoord, KeyEvent};
use game_board::games::skirmish::{Base, Obstacle, Unit, SPAWN_KEY};
use game_board::objects::GameObject;

#[test]
fn test_hook_order_within_a_tick() {
    let log = journal();
    let mut board = GameBoard::new(2, 2);
    board.attach(Recorder::new("p", &log).at(0, 0));
    board.on_frame_start();
    log.borrow_mut().clear();

    board.on_frame_start();
    board.on_frame(33);
    let mut lines: Vec<String> = Vec::new();
    board.draw(&mut lines);
    board.on_frame_end();

    assert_eq!(
        *log.borrow(),
        vec!["p:frame_start", "p:frame 33", "p:pre_draw", "p:frame_end"]
    );
    assert_eq!(lines, vec!["p".to_string()]);
}

#[test]
fn test_draw_skips_pending_children() {
    let log = journal();
    let mut board = GameBoard::new(2, 2);
    board.attach(Recorder::new("a", &log).at(0, 0));
    board.on_frame_start();
    board.attach(Recorder::new("b", &log).at(1, 0));
    board.attach(Recorder::new("c", &log).at(1, 1));
    board.on_frame_start();
    let d = Recorder::new("d", &log).at(0, 1);
    board.attach(Rc::clone(&d));

    let mut lines: Vec<String> = Vec::new();
    board.draw(&mut lines);
    assert_eq!(lines, vec!["a", "b", "c"]);
}

#[test]
fn test_map_changed_once_per_child_per_move() {
    let log = journal();
    let mut board = GameBoard::new(3, 3);
    let names = ["a", "b", "c"];
    for (i, name) in names.iter().enumerate() {
        board.attach(Recorder::new(name, &log).at(i as i32, 0));
    }
    let mover = GameObject::at(CellCoord::new(0, 2), Obstacle::new(1)).shared();
    board.attach(Rc::clone(&mover));
    board.on_frame_start();
    log.borrow_mut().clear();

    board.move_object(&mover, CellCoord::new(0, 2), CellCoord::new(7, 7));

    for name in names {
        assert_eq!(count(&log, &format!("{name}:map_changed")), 1);
    }
    assert!(board.trash_cell().contains(mover.borrow().id()));
}

#[test]
fn test_frame_start_commit_broadcasts_map_changed() {
    let log = journal();
    let mut board = GameBoard::new(3, 3);
    board.attach(Recorder::new("a", &log).at(0, 0));

    board.on_frame_start();
    assert_eq!(count(&log, "a:map_changed"), 1);

    // Nothing pending: no broadcast.
    board.on_frame_start();
    assert_eq!(count(&log, "a:map_changed"), 1);
}

#[test]
fn test_focused_children_see_click_first() {
    let log = journal();
    let mut board = GameBoard::new(3, 3);
    board.attach(Recorder::new("plain", &log).consuming().at(0, 0));
    board.attach(Recorder::new("focus_a", &log).focused().at(0, 0));
    board.attach(Recorder::new("focus_b", &log).focused().consuming().at(0, 0));
    board.on_frame_start();
    log.borrow_mut().clear();

    assert!(board.on_click(CellCoord::new(1, 1)));
    assert_eq!(*log.borrow(), vec!["focus_a:click", "focus_b:click"]);
}

#[test]
fn test_unfocused_children_until_consumed() {
    let log = journal();
    let mut board = GameBoard::new(3, 3);
    board.attach(Recorder::new("focus", &log).focused().at(0, 0));
    board.attach(Recorder::new("first", &log).at(0, 0));
    board.attach(Recorder::new("second", &log).consuming().at(0, 0));
    board.attach(Recorder::new("third", &log).consuming().at(0, 0));
    board.on_frame_start();
    log.borrow_mut().clear();

    assert!(board.on_click(CellCoord::new(2, 2)));
    assert_eq!(
        *log.borrow(),
        vec!["focus:click", "first:click", "second:click"]
    );
}

#[test]
fn test_unconsumed_click_returns_false() {
    let log = journal();
    let mut board = GameBoard::new(3, 3);
    board.attach(Recorder::new("a", &log).at(0, 0));
    board.on_frame_start();

    assert!(!board.on_click(CellCoord::new(0, 0)));
    assert_eq!(count(&log, "a:click"), 1);
}

#[test]
fn test_key_stops_at_first_consumer() {
    let log = journal();
    let mut board = GameBoard::new(3, 3);
    board.attach(Recorder::new("a", &log).at(0, 0));
    board.attach(Recorder::new("b", &log).consuming().at(0, 0));
    board.attach(Recorder::new("c", &log).consuming().at(0, 0));
    board.on_frame_start();

    assert!(board.on_key(KeyEvent::new(13)));
    assert_eq!(count(&log, "a:key"), 1);
    assert_eq!(count(&log, "b:key"), 1);
    assert_eq!(count(&log, "c:key"), 0);
}

#[test]
fn test_spawn_from_key_is_committed_next_frame() {
    let mut board = GameBoard::new(4, 4);
    let base = GameObject::at(CellCoord::new(1, 1), Base::new((1, 0))).shared();
    board.attach(Rc::clone(&base));
    board.on_frame_start();

    assert!(board.on_key(KeyEvent::new(SPAWN_KEY)));
    assert_eq!(board.child_count(), 2);

    let unit = Rc::clone(&board.children()[1]);
    assert_eq!(unit.borrow().state(), AttachState::WaitForAttach);
    assert!(board.get_cell(CellCoord::new(1, 1)).contains(unit.borrow().id()));

    board.on_frame_start();
    assert_eq!(unit.borrow().state(), AttachState::Attached);
    // Promoted, then walked during the same frame start.
    assert_eq!(unit.borrow().occupied_cell(), CellCoord::new(2, 1));

    let base = base.borrow();
    let base = base.downcast_ref::<Base>().unwrap();
    assert_eq!(base.spawned(), 1);
    assert_eq!(base.seen_attached(), 1);
    assert_eq!(base.seen_moved(), 1);
}

#[test]
fn test_unit_walks_into_trash_and_expires() {
    let mut board = GameBoard::new(2, 1);
    let unit = GameObject::at(CellCoord::new(0, 0), Unit::new("runner", (1, 0)).with_lifetime(4)).shared();
    let id = unit.borrow().id();
    board.attach(Rc::clone(&unit));

    board.on_frame_start();
    assert_eq!(unit.borrow().occupied_cell(), CellCoord::new(1, 0));
    board.on_frame_start();
    assert_eq!(unit.borrow().occupied_cell(), CellCoord::new(2, 0));
    assert!(board.trash_cell().contains(id));
    board.on_frame_start();
    assert_eq!(unit.borrow().occupied_cell(), CellCoord::new(3, 0));
    assert_eq!(board.grid().cells_containing(id).count(), 1);

    // Fourth frame start: the unit asks to leave instead of moving.
    board.on_frame_start();
    assert_eq!(unit.borrow().state(), AttachState::WaitForDetach);
    assert!(!board.trash_cell().contains(id));

    board.on_frame_start();
    assert_eq!(unit.borrow().state(), AttachState::Detached);
    assert_eq!(board.child_count(), 0);
}

#[test]
fn test_focused_unit_takes_clicks_on_its_cell() {
    let mut board = GameBoard::new(3, 3);
    let unit = GameObject::at(CellCoord::new(2, 2), Unit::new("hero", (0, 0)).with_focus()).shared();
    board.attach(Rc::clone(&unit));
    board.on_frame_start();

    assert!(!board.on_click(CellCoord::new(0, 0)));
    assert!(board.on_click(CellCoord::new(2, 2)));
    assert_eq!(unit.borrow().downcast_ref::<Unit>().map(Unit::clicks), Some(1));
}

#[test]
fn test_frame_time_reaches_units() {
    let mut board = GameBoard::new(1, 1);
    let unit = GameObject::new(Unit::new("clock", (0, 0))).shared();
    board.attach(Rc::clone(&unit));
    board.on_frame_start();

    board.on_frame(10);
    board.on_frame(15);
    assert_eq!(unit.borrow().downcast_ref::<Unit>().map(Unit::elapsed_ms), Some(25));
}
