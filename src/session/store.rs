//! The session store proper: one mutable state tree, one dispatch point.
//!
//! Every public operation is available both as a [`SessionCommand`] routed
//! through [`SessionStore::apply`] and as the underlying sub-store method.
//! `apply` returns the side effects the shell must execute (currently only
//! external navigation); the store itself never performs I/O.

use std::time::Instant;

use super::context_menu::{ContextMenu, MenuItem};
use super::desktop::{DesktopIcon, DesktopLayer};
use super::dock::{DockApp, DockPosition, DockState};
use super::notifications::{NotificationId, NotificationQueue, NotificationRequest};
use super::settings::{SettingsPanel, SettingsSession};
use super::taskbar::TaskbarState;
use super::windows::{WindowId, WindowRegistry};
use super::{Point, Size};
use crate::constants::NOTIFICATION_DEFAULT_TTL;

/// Options accepted by the open-window operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// Reroute to an existing window for the same app instead of creating a
    /// second one. On by default.
    pub prevent_duplicates: bool,
    /// Launch the app's external URL (when it has a real one) instead of
    /// creating a window.
    pub open_external: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            prevent_duplicates: true,
            open_external: false,
        }
    }
}

/// What an open-window call actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new window was created and focused.
    Opened(WindowId),
    /// A duplicate was rerouted to the existing window.
    Refocused(WindowId),
    /// The launch left the shell; no window was touched.
    External(String),
    /// The app requires a subscription; a warning notification was queued
    /// instead of a window.
    Gated,
}

/// Side effects the shell executes after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    OpenExternalUrl(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    OpenWindow {
        app_id: String,
        title: Option<String>,
        content: Option<String>,
        options: OpenOptions,
    },
    CloseWindow(WindowId),
    MinimizeWindow(WindowId),
    MaximizeWindow(WindowId),
    FocusWindow(WindowId),
    MoveWindow(WindowId, Point),
    ResizeWindow(WindowId, Size),
    CycleWindowFocus {
        forward: bool,
    },
    AddDesktopIcon(DesktopIcon),
    RemoveDesktopIcon(String),
    MoveDesktopIcon {
        id: String,
        position: Point,
    },
    SelectDesktopIcon {
        id: String,
        multi_select: bool,
    },
    ClearDesktopSelection,
    AddToDock(DockApp),
    RemoveFromDock(String),
    ToggleDockVisibility,
    SetDockPosition(DockPosition),
    AddNotification(NotificationRequest),
    RemoveNotification(NotificationId),
    ClearAllNotifications,
    OpenContextMenu {
        anchor: Point,
        items: Vec<MenuItem>,
    },
    CloseContextMenu,
    OpenSettings(SettingsPanel),
    CloseSettings,
    SetActiveSettingsPanel(SettingsPanel),
    ToggleTaskbarVisibility,
    ToggleAppsMenu,
}

impl SessionCommand {
    /// Shorthand for the common launch-by-id case.
    pub fn open_app(app_id: impl Into<String>) -> Self {
        Self::OpenWindow {
            app_id: app_id.into(),
            title: None,
            content: None,
            options: OpenOptions::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    windows: WindowRegistry,
    desktop: DesktopLayer,
    dock: DockState,
    notifications: NotificationQueue,
    context_menu: Option<ContextMenu>,
    taskbar: TaskbarState,
    settings: SettingsSession,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn windows(&self) -> &WindowRegistry {
        &self.windows
    }

    pub fn desktop(&self) -> &DesktopLayer {
        &self.desktop
    }

    pub fn dock(&self) -> &DockState {
        &self.dock
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn taskbar(&self) -> &TaskbarState {
        &self.taskbar
    }

    pub fn settings(&self) -> &SettingsSession {
        &self.settings
    }

    /// True when the dock should currently be drawn: visible, and not
    /// auto-hidden behind a maximized window when `auto_hide` is on.
    pub fn dock_should_show(&self, auto_hide: bool) -> bool {
        self.dock.visible() && !(auto_hide && self.windows.any_maximized_visible())
    }

    /// The open-window operation, with the dock consulted for launch
    /// metadata. See [`OpenOutcome`] for the four possible results.
    pub fn open_window(
        &mut self,
        app_id: &str,
        title: Option<&str>,
        content: Option<String>,
        options: OpenOptions,
        now: Instant,
    ) -> OpenOutcome {
        if options.open_external
            && let Some(app) = self.dock.app(app_id)
            && app.has_external_url()
        {
            tracing::debug!(app_id, url = %app.url, "launch rerouted to external url");
            return OpenOutcome::External(app.url.clone());
        }

        if options.prevent_duplicates
            && let Some(existing) = self.windows.find_by_app(app_id).map(|w| w.id)
        {
            self.windows.focus(existing);
            return OpenOutcome::Refocused(existing);
        }

        if let Some(app) = self.dock.app(app_id)
            && app.requires_subscription
        {
            let name = app.name.clone();
            self.notifications.add(
                NotificationRequest::warning(
                    "Subscription required",
                    format!("{name} needs an active subscription."),
                )
                .with_duration(NOTIFICATION_DEFAULT_TTL),
                now,
            );
            return OpenOutcome::Gated;
        }

        let title = title
            .map(str::to_string)
            .or_else(|| self.dock.app(app_id).map(|app| app.name.clone()))
            .unwrap_or_else(|| "New Window".to_string());
        let id = self.windows.open(app_id, title, content, false);
        OpenOutcome::Opened(id)
    }

    /// Drains due notification deadlines. The event loop calls this every
    /// tick with the current instant.
    pub fn expire_notifications(&mut self, now: Instant) -> Vec<NotificationId> {
        self.notifications.expire_due(now)
    }

    /// Applies one command and returns the effects the shell must execute.
    pub fn apply(&mut self, command: SessionCommand, now: Instant) -> Vec<SessionEffect> {
        match command {
            SessionCommand::OpenWindow {
                app_id,
                title,
                content,
                options,
            } => {
                if let OpenOutcome::External(url) =
                    self.open_window(&app_id, title.as_deref(), content, options, now)
                {
                    return vec![SessionEffect::OpenExternalUrl(url)];
                }
            }
            SessionCommand::CloseWindow(id) => self.windows.close(id),
            SessionCommand::MinimizeWindow(id) => self.windows.minimize(id),
            SessionCommand::MaximizeWindow(id) => self.windows.maximize(id),
            SessionCommand::FocusWindow(id) => self.windows.focus(id),
            SessionCommand::MoveWindow(id, position) => self.windows.move_to(id, position),
            SessionCommand::ResizeWindow(id, size) => self.windows.resize(id, size),
            SessionCommand::CycleWindowFocus { forward } => self.windows.cycle_focus(forward),
            SessionCommand::AddDesktopIcon(icon) => self.desktop.add_icon(icon),
            SessionCommand::RemoveDesktopIcon(id) => self.desktop.remove_icon(&id),
            SessionCommand::MoveDesktopIcon { id, position } => {
                self.desktop.move_icon(&id, position);
            }
            SessionCommand::SelectDesktopIcon { id, multi_select } => {
                self.desktop.select_icon(&id, multi_select);
            }
            SessionCommand::ClearDesktopSelection => self.desktop.clear_selection(),
            SessionCommand::AddToDock(app) => self.dock.add_app(app),
            SessionCommand::RemoveFromDock(id) => self.dock.remove_app(&id),
            SessionCommand::ToggleDockVisibility => self.dock.toggle_visibility(),
            SessionCommand::SetDockPosition(position) => self.dock.set_position(position),
            SessionCommand::AddNotification(request) => {
                self.notifications.add(request, now);
            }
            SessionCommand::RemoveNotification(id) => self.notifications.remove(id),
            SessionCommand::ClearAllNotifications => self.notifications.clear_all(),
            SessionCommand::OpenContextMenu { anchor, items } => {
                // replaces any menu already open
                self.context_menu = Some(ContextMenu::new(anchor, items));
            }
            SessionCommand::CloseContextMenu => self.context_menu = None,
            SessionCommand::OpenSettings(panel) => self.settings.open(panel),
            SessionCommand::CloseSettings => self.settings.close(),
            SessionCommand::SetActiveSettingsPanel(panel) => {
                self.settings.set_active_panel(panel);
            }
            SessionCommand::ToggleTaskbarVisibility => self.taskbar.toggle_visibility(),
            SessionCommand::ToggleAppsMenu => self.taskbar.toggle_apps_menu(),
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::dock::builtin_apps;

    fn seeded() -> SessionStore {
        let mut store = SessionStore::new();
        for app in builtin_apps() {
            store.dock.add_app(app);
        }
        store
    }

    #[test]
    fn open_external_short_circuits_window_creation() {
        let mut store = seeded();
        let outcome = store.open_window(
            "bapps-store",
            None,
            None,
            OpenOptions {
                open_external: true,
                ..OpenOptions::default()
            },
            Instant::now(),
        );
        assert_eq!(
            outcome,
            OpenOutcome::External("https://www.bitcoinapps.store".to_string())
        );
        assert!(store.windows().is_empty());
    }

    #[test]
    fn open_external_with_placeholder_url_opens_a_window() {
        let mut store = seeded();
        let outcome = store.open_window(
            "bitcoin-wallet",
            None,
            None,
            OpenOptions {
                open_external: true,
                ..OpenOptions::default()
            },
            Instant::now(),
        );
        assert!(matches!(outcome, OpenOutcome::Opened(_)));
        assert_eq!(store.windows().len(), 1);
    }

    #[test]
    fn gated_app_notifies_instead_of_opening() {
        let mut store = seeded();
        let outcome = store.open_window(
            "bitcoin-music",
            None,
            None,
            OpenOptions::default(),
            Instant::now(),
        );
        assert_eq!(outcome, OpenOutcome::Gated);
        assert!(store.windows().is_empty());
        assert_eq!(store.notifications().len(), 1);
        assert_eq!(
            store.notifications().entries()[0].severity,
            crate::session::Severity::Warning
        );
    }

    #[test]
    fn duplicate_open_refocuses_before_gating_applies() {
        let mut store = seeded();
        // force a window for the gated app, then reopen it
        store.windows.open("bitcoin-music", "Bitcoin Music", None, false);
        let outcome = store.open_window(
            "bitcoin-music",
            None,
            None,
            OpenOptions::default(),
            Instant::now(),
        );
        assert!(matches!(outcome, OpenOutcome::Refocused(_)));
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn window_title_resolves_from_dock() {
        let mut store = seeded();
        let OpenOutcome::Opened(id) = store.open_window(
            "bitcoin-wallet",
            None,
            None,
            OpenOptions::default(),
            Instant::now(),
        ) else {
            panic!("expected a window");
        };
        assert_eq!(store.windows().get(id).unwrap().title, "Bitcoin Wallet");
        let OpenOutcome::Opened(other) = store.open_window(
            "unlisted-app",
            None,
            None,
            OpenOptions::default(),
            Instant::now(),
        ) else {
            panic!("expected a window");
        };
        assert_eq!(store.windows().get(other).unwrap().title, "New Window");
    }

    #[test]
    fn apply_maps_external_outcome_to_effect() {
        let mut store = seeded();
        let effects = store.apply(
            SessionCommand::OpenWindow {
                app_id: "bapps-store".to_string(),
                title: None,
                content: None,
                options: OpenOptions {
                    open_external: true,
                    ..OpenOptions::default()
                },
            },
            Instant::now(),
        );
        assert_eq!(
            effects,
            vec![SessionEffect::OpenExternalUrl(
                "https://www.bitcoinapps.store".to_string()
            )]
        );
    }

    #[test]
    fn context_menu_open_replaces_existing() {
        let mut store = SessionStore::new();
        let now = Instant::now();
        store.apply(
            SessionCommand::OpenContextMenu {
                anchor: Point::new(1, 1),
                items: vec![MenuItem::Separator],
            },
            now,
        );
        store.apply(
            SessionCommand::OpenContextMenu {
                anchor: Point::new(5, 5),
                items: vec![],
            },
            now,
        );
        assert_eq!(store.context_menu().unwrap().anchor, Point::new(5, 5));
        store.apply(SessionCommand::CloseContextMenu, now);
        assert!(store.context_menu().is_none());
    }

    #[test]
    fn dock_should_show_honors_auto_hide() {
        let mut store = seeded();
        assert!(store.dock_should_show(true));
        let OpenOutcome::Opened(id) = store.open_window(
            "bitcoin-wallet",
            None,
            None,
            OpenOptions::default(),
            Instant::now(),
        ) else {
            panic!("expected a window");
        };
        store.windows.maximize(id);
        assert!(!store.dock_should_show(true));
        // auto-hide off: maximized windows never hide the dock
        assert!(store.dock_should_show(false));
        store.windows.minimize(id);
        assert!(store.dock_should_show(true));
    }
}
