use tilecraft_common::{BlockId, CellCoord, WorldConfig};
use tilecraft_input::{EventQueue, Key, PointerButton, RawEvent};
use tilecraft_session::{LoopState, Session};

fn click(x: i32, y: i32) -> RawEvent {
    RawEvent::PointerDown {
        x,
        y,
        button: PointerButton::Primary,
    }
}

#[test]
fn place_in_reach_then_refuse_far_corner() {
    let config = WorldConfig::default();
    assert_eq!(config.cell_size(), 51);

    let mut session = Session::new(config);
    assert_eq!(session.player().cell(), CellCoord::new(5, 5));

    let mut events = EventQueue::new();
    events.extend([RawEvent::KeyDown(Key::Char('2')), click(280, 280)]);
    assert_eq!(session.pump(&mut events), LoopState::Running);
    assert_eq!(session.grid().get(CellCoord::new(5, 5)), Ok(BlockId(2)));

    let before = session.grid().clone();
    events.push(click(10, 10));
    session.pump(&mut events);
    assert_eq!(session.grid().get(CellCoord::new(0, 0)), Ok(BlockId::EMPTY));
    assert_eq!(session.grid(), &before);
}

#[test]
fn edits_survive_quit_save_and_reload() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("world.json");
    let config = WorldConfig::default();

    // First run: no file yet, so the world starts empty.
    let grid = tilecraft_persist::load(&path, config.grid_size());
    let mut session = Session::with_grid(config, grid).unwrap();
    let mut events = EventQueue::new();
    events.extend([
        RawEvent::KeyDown(Key::Char('w')),
        RawEvent::KeyDown(Key::Char('w')),
        RawEvent::KeyDown(Key::Char('4')),
        click(256, 100),
        RawEvent::KeyDown(Key::Escape),
    ]);
    assert_eq!(session.pump(&mut events), LoopState::Stopped);
    assert_eq!(session.player().cell(), CellCoord::new(5, 3));
    tilecraft_persist::save(&path, session.grid()).unwrap();
    let saved = session.into_grid();

    // Second run picks the edit back up; the player is back at the center.
    let grid = tilecraft_persist::load(&path, config.grid_size());
    assert_eq!(grid, saved);
    assert_eq!(grid.get(CellCoord::new(5, 1)), Ok(BlockId(4)));
    let session = Session::with_grid(config, grid).unwrap();
    assert_eq!(session.player().cell(), CellCoord::new(5, 5));
    assert_eq!(session.selection(), BlockId(1));
}
