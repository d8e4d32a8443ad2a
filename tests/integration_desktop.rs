use std::time::Instant;

use pretty_assertions::assert_eq;
use term_desktop::session::{
    DesktopIcon, DockApp, DockPosition, Point, SessionCommand, SessionStore,
};

fn store_with_icons() -> SessionStore {
    let now = Instant::now();
    let mut store = SessionStore::new();
    for id in ["a", "b", "c"] {
        store.apply(
            SessionCommand::AddDesktopIcon(DesktopIcon::new(
                id,
                id,
                id.to_uppercase(),
                "@",
                Point::default(),
            )),
            now,
        );
    }
    store
}

fn selected(store: &SessionStore) -> Vec<&str> {
    store.desktop().selected_ids()
}

#[test]
fn multi_select_scenario_from_three_unselected_icons() {
    let now = Instant::now();
    let mut store = store_with_icons();

    store.apply(
        SessionCommand::SelectDesktopIcon {
            id: "a".to_string(),
            multi_select: false,
        },
        now,
    );
    store.apply(
        SessionCommand::SelectDesktopIcon {
            id: "b".to_string(),
            multi_select: true,
        },
        now,
    );
    assert_eq!(selected(&store), vec!["a", "b"]);

    store.apply(
        SessionCommand::SelectDesktopIcon {
            id: "b".to_string(),
            multi_select: true,
        },
        now,
    );
    assert_eq!(selected(&store), vec!["a"]);
}

#[test]
fn single_select_clears_every_other_icon() {
    let now = Instant::now();
    let mut store = store_with_icons();
    for id in ["a", "b"] {
        store.apply(
            SessionCommand::SelectDesktopIcon {
                id: id.to_string(),
                multi_select: true,
            },
            now,
        );
    }
    store.apply(
        SessionCommand::SelectDesktopIcon {
            id: "c".to_string(),
            multi_select: false,
        },
        now,
    );
    assert_eq!(selected(&store), vec!["c"]);

    store.apply(SessionCommand::ClearDesktopSelection, now);
    assert!(selected(&store).is_empty());
}

#[test]
fn icon_move_and_remove_round_trip() {
    let now = Instant::now();
    let mut store = store_with_icons();
    store.apply(
        SessionCommand::MoveDesktopIcon {
            id: "b".to_string(),
            position: Point::new(20, 6),
        },
        now,
    );
    assert_eq!(store.desktop().get("b").unwrap().position, Point::new(20, 6));

    store.apply(SessionCommand::RemoveDesktopIcon("b".to_string()), now);
    assert!(store.desktop().get("b").is_none());
    assert_eq!(store.desktop().icons().len(), 2);
}

#[test]
fn dock_add_is_idempotent_through_the_command_path() {
    let now = Instant::now();
    let mut store = SessionStore::new();
    let app = DockApp::new("wallet", "Wallet", "w", (1, 2, 3));
    store.apply(SessionCommand::AddToDock(app.clone()), now);
    store.apply(SessionCommand::AddToDock(app), now);
    assert_eq!(store.dock().apps().len(), 1);

    store.apply(SessionCommand::RemoveFromDock("wallet".to_string()), now);
    assert!(store.dock().apps().is_empty());
}

#[test]
fn dock_visibility_and_position_commands() {
    let now = Instant::now();
    let mut store = SessionStore::new();
    assert!(store.dock().visible());
    store.apply(SessionCommand::ToggleDockVisibility, now);
    assert!(!store.dock().visible());
    store.apply(SessionCommand::SetDockPosition(DockPosition::Left), now);
    assert_eq!(store.dock().position(), DockPosition::Left);
}

#[test]
fn taskbar_toggles_through_the_command_path() {
    let now = Instant::now();
    let mut store = SessionStore::new();
    store.apply(SessionCommand::ToggleAppsMenu, now);
    assert!(store.taskbar().apps_menu_open());
    store.apply(SessionCommand::ToggleTaskbarVisibility, now);
    assert!(!store.taskbar().visible());
    store.apply(SessionCommand::ToggleAppsMenu, now);
    assert!(!store.taskbar().apps_menu_open());
}

#[test]
fn settings_session_preserves_panel_across_close() {
    use term_desktop::session::SettingsPanel;
    let now = Instant::now();
    let mut store = SessionStore::new();

    store.apply(SessionCommand::OpenSettings(SettingsPanel::Appearance), now);
    assert!(store.settings().is_open());
    store.apply(SessionCommand::CloseSettings, now);
    assert!(!store.settings().is_open());
    assert_eq!(store.settings().active_panel(), SettingsPanel::Appearance);

    store.apply(
        SessionCommand::SetActiveSettingsPanel(SettingsPanel::About),
        now,
    );
    assert!(!store.settings().is_open());
    assert_eq!(store.settings().active_panel(), SettingsPanel::About);
}
