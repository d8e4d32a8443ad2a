use std::time::Instant;

use pretty_assertions::assert_eq;
use term_desktop::session::{
    OpenOptions, OpenOutcome, SessionCommand, SessionStore, WindowId,
};

fn open(store: &mut SessionStore, app: &str) -> WindowId {
    match store.open_window(app, None, None, OpenOptions::default(), Instant::now()) {
        OpenOutcome::Opened(id) | OpenOutcome::Refocused(id) => id,
        other => panic!("expected a window for {app}, got {other:?}"),
    }
}

fn focused_count(store: &SessionStore) -> usize {
    store.windows().windows().iter().filter(|w| w.focused).count()
}

#[test]
fn at_most_one_window_is_focused_across_any_sequence() {
    let mut store = SessionStore::new();
    let now = Instant::now();
    let a = open(&mut store, "a");
    let b = open(&mut store, "b");
    let c = open(&mut store, "c");

    let script = vec![
        SessionCommand::FocusWindow(a),
        SessionCommand::MinimizeWindow(a),
        SessionCommand::FocusWindow(b),
        SessionCommand::MinimizeWindow(b),
        SessionCommand::MinimizeWindow(b),
        SessionCommand::CloseWindow(c),
        SessionCommand::FocusWindow(a),
        SessionCommand::CloseWindow(a),
        SessionCommand::FocusWindow(WindowId(999)),
    ];
    for command in script {
        store.apply(command, now);
        assert!(
            focused_count(&store) <= 1,
            "focus invariant broken after a command"
        );
        assert!(
            store
                .windows()
                .windows()
                .iter()
                .all(|w| !(w.minimized && w.focused)),
            "a minimized window is focused"
        );
    }
}

#[test]
fn focus_raises_target_strictly_above_all_others() {
    let mut store = SessionStore::new();
    let now = Instant::now();
    let a = open(&mut store, "a");
    let _b = open(&mut store, "b");
    let _c = open(&mut store, "c");

    store.apply(SessionCommand::FocusWindow(a), now);
    let za = store.windows().get(a).unwrap().z_index;
    for w in store.windows().windows() {
        if w.id != a {
            assert!(za > w.z_index, "{} is not below the focused window", w.id);
        }
    }
}

#[test]
fn opening_the_same_app_twice_yields_one_focused_window() {
    let mut store = SessionStore::new();
    let now = Instant::now();
    store.apply(SessionCommand::open_app("app-x"), now);
    store.apply(SessionCommand::open_app("app-x"), now);

    let matching: Vec<_> = store
        .windows()
        .windows()
        .iter()
        .filter(|w| w.app_id == "app-x")
        .collect();
    assert_eq!(matching.len(), 1);
    assert!(matching[0].focused);
}

#[test]
fn three_opens_cascade_with_monotonic_offsets() {
    let mut store = SessionStore::new();
    let a = open(&mut store, "a");
    let b = open(&mut store, "b");
    let c = open(&mut store, "c");

    let positions: Vec<_> = [a, b, c]
        .iter()
        .map(|id| store.windows().get(*id).unwrap().position)
        .collect();
    assert_eq!(positions.len(), 3);
    for pair in positions.windows(2) {
        assert!(pair[1].x > pair[0].x);
        assert!(pair[1].y > pair[0].y);
    }
    // the step is fixed, so the deltas match
    assert_eq!(positions[1].x - positions[0].x, positions[2].x - positions[1].x);
    assert_eq!(positions[1].y - positions[0].y, positions[2].y - positions[1].y);
}

#[test]
fn closing_the_focused_window_refocuses_the_topmost_remaining() {
    let mut store = SessionStore::new();
    let now = Instant::now();
    let w1 = open(&mut store, "w1");
    let w2 = open(&mut store, "w2");
    assert!(store.windows().get(w2).unwrap().focused);

    store.apply(SessionCommand::CloseWindow(w2), now);
    assert_eq!(store.windows().len(), 1);
    assert_eq!(focused_count(&store), 1);
    assert!(store.windows().get(w1).unwrap().focused);
}

#[test]
fn focusing_a_minimized_window_restores_it() {
    let mut store = SessionStore::new();
    let now = Instant::now();
    let w1 = open(&mut store, "w1");
    store.apply(SessionCommand::MinimizeWindow(w1), now);
    assert!(store.windows().get(w1).unwrap().minimized);

    store.apply(SessionCommand::FocusWindow(w1), now);
    let w = store.windows().get(w1).unwrap();
    assert!(!w.minimized);
    assert!(w.focused);
}

#[test]
fn maximize_toggle_preserves_focus_and_minimized_state() {
    let mut store = SessionStore::new();
    let now = Instant::now();
    let a = open(&mut store, "a");
    let b = open(&mut store, "b");

    store.apply(SessionCommand::MaximizeWindow(a), now);
    assert!(store.windows().get(a).unwrap().maximized);
    assert!(store.windows().get(b).unwrap().focused);
    store.apply(SessionCommand::MaximizeWindow(a), now);
    assert!(!store.windows().get(a).unwrap().maximized);
}

#[test]
fn geometry_commands_write_through_unclamped() {
    use term_desktop::session::{Point, Size};
    let mut store = SessionStore::new();
    let now = Instant::now();
    let a = open(&mut store, "a");

    store.apply(SessionCommand::MoveWindow(a, Point::new(-4, 90)), now);
    store.apply(SessionCommand::ResizeWindow(a, Size::new(7, 3)), now);
    let w = store.windows().get(a).unwrap();
    assert_eq!(w.position, Point::new(-4, 90));
    assert_eq!(w.size, Size::new(7, 3));
}
