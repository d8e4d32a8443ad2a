//! The shell runner: owns the session store and the component set, routes
//! input events to store commands, and executes the effects that come back.
//!
//! Drag gestures never write to the store mid-gesture. The transient
//! position lives here, is visually authoritative while the button is held,
//! and commits as a single move/resize command on release.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use thiserror::Error;

use crate::components::{
    ContextMenuView, DesktopSurface, DockBar, HelpOverlay, MenuBar, MenuBarHit, MenuHit,
    NotificationHit, NotificationStack, SettingsHit, SettingsView, WindowChrome, WindowHitKind,
};
use crate::constants::{MENU_BAR_HEIGHT, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::keybindings::{Action, Keymap};
use crate::session::{
    MenuItem, NotificationRequest, Point, SessionCommand, SessionEffect, SessionStore, Size,
    WindowId,
};
use crate::ui::UiFrame;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    pub poll_interval: Duration,
    pub dock_auto_hide: bool,
    pub mouse_capture: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(16),
            dock_auto_hide: false,
            mouse_capture: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DragTarget {
    MoveWindow(WindowId),
    ResizeWindow(WindowId),
    MoveIcon(String),
}

#[derive(Debug)]
struct DragGesture {
    target: DragTarget,
    start: (u16, u16),
    origin: Point,
    origin_size: Size,
    preview: Point,
    preview_size: Size,
    moved: bool,
}

pub struct DesktopShell {
    store: SessionStore,
    keymap: Keymap,
    options: ShellOptions,
    menu_bar: MenuBar,
    desktop: DesktopSurface,
    chrome: WindowChrome,
    dock_bar: DockBar,
    toasts: NotificationStack,
    menu_view: ContextMenuView,
    settings_view: SettingsView,
    help: HelpOverlay,
    drag: Option<DragGesture>,
    last_icon_click: Option<(String, Instant)>,
    last_header_click: Option<(WindowId, Instant)>,
    desktop_area: Rect,
}

impl DesktopShell {
    pub fn new(store: SessionStore, options: ShellOptions) -> Self {
        Self {
            store,
            keymap: Keymap::default(),
            options,
            menu_bar: MenuBar::new(),
            desktop: DesktopSurface::new(),
            chrome: WindowChrome::new(),
            dock_bar: DockBar::new(),
            toasts: NotificationStack::new(),
            menu_view: ContextMenuView::new(),
            settings_view: SettingsView::new(),
            help: HelpOverlay::new(),
            drag: None,
            last_icon_click: None,
            last_header_click: None,
            desktop_area: Rect::default(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn options(&self) -> ShellOptions {
        self.options
    }

    /// Applies a command and executes whatever effects come back.
    pub fn dispatch(&mut self, command: SessionCommand) {
        let effects = self.store.apply(command, Instant::now());
        for effect in effects {
            self.execute(effect);
        }
    }

    fn execute(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::OpenExternalUrl(url) => {
                if let Err(err) = webbrowser::open(&url) {
                    tracing::warn!(%url, error = %err, "external navigation failed");
                    // external failures surface as notifications, never as
                    // errors crossing the store boundary
                    self.store.apply(
                        SessionCommand::AddNotification(
                            NotificationRequest::error(
                                "Could not open browser",
                                format!("{url}: {err}"),
                            )
                            .with_duration(crate::constants::NOTIFICATION_DEFAULT_TTL),
                        ),
                        Instant::now(),
                    );
                }
            }
        }
    }

    /// Idle work per poll interval: notification expiry.
    pub fn tick(&mut self, now: Instant) {
        for id in self.store.expire_notifications(now) {
            tracing::trace!(notification_id = %id, "notification expired");
        }
    }

    pub fn draw(&mut self, frame: &mut UiFrame<'_>) {
        let full = frame.area();
        let (bar, rest) = if self.store.taskbar().visible() && full.height > MENU_BAR_HEIGHT {
            (
                Rect {
                    height: MENU_BAR_HEIGHT,
                    ..full
                },
                Rect {
                    y: full.y + MENU_BAR_HEIGHT,
                    height: full.height - MENU_BAR_HEIGHT,
                    ..full
                },
            )
        } else {
            (Rect::default(), full)
        };
        let dock_shown = self.store.dock_should_show(self.options.dock_auto_hide);
        let desktop_area = self
            .dock_bar
            .layout(rest, self.store.dock().position(), dock_shown);
        self.desktop_area = desktop_area;

        let icon_override = match &self.drag {
            Some(gesture) => match &gesture.target {
                DragTarget::MoveIcon(id) => Some((id.as_str(), gesture.preview)),
                _ => None,
            },
            None => None,
        };
        self.desktop
            .render(frame, desktop_area, self.store.desktop().icons(), icon_override);

        let window_preview = self.drag.as_ref().and_then(|gesture| match gesture.target {
            DragTarget::MoveWindow(id) | DragTarget::ResizeWindow(id) => {
                Some((id, gesture.preview, gesture.preview_size))
            }
            DragTarget::MoveIcon(_) => None,
        });
        self.chrome
            .render(frame, desktop_area, self.store.windows(), window_preview);

        self.dock_bar.render(frame, self.store.dock());
        self.menu_bar.render(frame, bar, &self.store);
        self.toasts
            .render(frame, desktop_area, self.store.notifications());
        if let Some(menu) = self.store.context_menu() {
            self.menu_view.render(frame, desktop_area, menu);
        }
        self.settings_view.render(frame, desktop_area, &self.store);
        self.help.render(frame, full);
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.handle_key(key)
            }
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        let Some(action) = self.keymap.action_for(key) else {
            return ControlFlow::Continue;
        };
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::OpenHelp => self.help.toggle(),
            Action::CloseOverlay => self.close_topmost_transient(),
            Action::FocusNext => self.dispatch(SessionCommand::CycleWindowFocus { forward: true }),
            Action::FocusPrev => self.dispatch(SessionCommand::CycleWindowFocus { forward: false }),
            Action::MinimizeFocused => {
                if let Some(id) = self.store.windows().focused_id() {
                    self.dispatch(SessionCommand::MinimizeWindow(id));
                }
            }
            Action::MaximizeFocused => {
                if let Some(id) = self.store.windows().focused_id() {
                    self.dispatch(SessionCommand::MaximizeWindow(id));
                }
            }
            Action::CloseFocused => {
                if let Some(id) = self.store.windows().focused_id() {
                    self.dispatch(SessionCommand::CloseWindow(id));
                }
            }
            Action::ToggleDock => self.dispatch(SessionCommand::ToggleDockVisibility),
            Action::OpenSettings => {
                let panel = self.store.settings().active_panel();
                self.dispatch(SessionCommand::OpenSettings(panel));
            }
            Action::ClearNotifications => self.dispatch(SessionCommand::ClearAllNotifications),
        }
        ControlFlow::Continue
    }

    /// Escape closes exactly one surface, topmost first.
    fn close_topmost_transient(&mut self) {
        if self.help.visible() {
            self.help.hide();
        } else if self.store.context_menu().is_some() {
            self.menu_view.reset();
            self.dispatch(SessionCommand::CloseContextMenu);
        } else if self.store.taskbar().apps_menu_open() {
            self.dispatch(SessionCommand::ToggleAppsMenu);
        } else if self.store.settings().is_open() {
            self.dispatch(SessionCommand::CloseSettings);
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.on_left_down(mouse.column, mouse.row, mouse.modifiers);
            }
            MouseEventKind::Down(MouseButton::Right) => {
                self.on_right_down(mouse.column, mouse.row);
            }
            MouseEventKind::Drag(_) => self.on_drag(mouse.column, mouse.row),
            MouseEventKind::Up(_) => self.on_drag_end(),
            _ => {}
        }
    }

    fn on_left_down(&mut self, column: u16, row: u16, modifiers: KeyModifiers) {
        if self.help.visible() {
            self.help.hide();
            return;
        }

        if self.store.context_menu().is_some() {
            match self.menu_view.hit_test(column, row) {
                MenuHit::Action(command) => {
                    self.menu_view.reset();
                    self.dispatch(SessionCommand::CloseContextMenu);
                    if let Some(command) = command {
                        self.dispatch(command);
                    }
                }
                MenuHit::Submenu(index) => self.menu_view.toggle_submenu(index),
                MenuHit::Inert => {}
                MenuHit::Outside => {
                    self.menu_view.reset();
                    self.dispatch(SessionCommand::CloseContextMenu);
                }
            }
            return;
        }

        if self.store.taskbar().apps_menu_open() {
            match self.menu_bar.hit_test(column, row) {
                Some(MenuBarHit::AppsButton) | None => {
                    self.dispatch(SessionCommand::ToggleAppsMenu);
                }
                Some(MenuBarHit::AppEntry(app_id)) => {
                    self.dispatch(SessionCommand::ToggleAppsMenu);
                    self.dispatch(SessionCommand::open_app(app_id));
                }
                Some(MenuBarHit::SettingsEntry) => {
                    self.dispatch(SessionCommand::ToggleAppsMenu);
                    let panel = self.store.settings().active_panel();
                    self.dispatch(SessionCommand::OpenSettings(panel));
                }
                Some(MenuBarHit::Bar) => {}
            }
            return;
        }

        if let Some(hit) = self.settings_view.hit_test(column, row) {
            match hit {
                SettingsHit::Close => self.dispatch(SessionCommand::CloseSettings),
                SettingsHit::Panel(panel) => {
                    self.dispatch(SessionCommand::SetActiveSettingsPanel(panel));
                }
                SettingsHit::Inside => {}
            }
            return;
        }

        match self.menu_bar.hit_test(column, row) {
            Some(MenuBarHit::AppsButton) => {
                self.dispatch(SessionCommand::ToggleAppsMenu);
                return;
            }
            Some(MenuBarHit::Bar) => return,
            _ => {}
        }

        if let Some(hit) = self.toasts.hit_test(column, row).cloned() {
            match hit {
                NotificationHit::Action(id, command) => {
                    self.dispatch(command);
                    self.dispatch(SessionCommand::RemoveNotification(id));
                }
                NotificationHit::Dismiss(id) => {
                    self.dispatch(SessionCommand::RemoveNotification(id));
                }
            }
            return;
        }

        if self.dock_bar.contains(column, row) {
            if let Some(app_id) = self.dock_bar.app_at(column, row).map(str::to_string) {
                self.dispatch(SessionCommand::open_app(app_id));
            }
            return;
        }

        if let Some(hit) = self.chrome.hit_test(column, row) {
            match hit.kind {
                WindowHitKind::Minimize => {
                    self.dispatch(SessionCommand::MinimizeWindow(hit.id));
                }
                WindowHitKind::Maximize => {
                    self.dispatch(SessionCommand::MaximizeWindow(hit.id));
                }
                WindowHitKind::Close => self.dispatch(SessionCommand::CloseWindow(hit.id)),
                WindowHitKind::Resize => {
                    self.dispatch(SessionCommand::FocusWindow(hit.id));
                    self.begin_window_drag(hit.id, column, row, true);
                }
                WindowHitKind::Header => {
                    let now = Instant::now();
                    if let Some((prev_id, prev)) = self.last_header_click
                        && prev_id == hit.id
                        && now.duration_since(prev) <= DOUBLE_CLICK_WINDOW
                    {
                        self.last_header_click = None;
                        self.dispatch(SessionCommand::MaximizeWindow(hit.id));
                        return;
                    }
                    self.last_header_click = Some((hit.id, now));
                    self.dispatch(SessionCommand::FocusWindow(hit.id));
                    self.begin_window_drag(hit.id, column, row, false);
                }
                WindowHitKind::Body => self.dispatch(SessionCommand::FocusWindow(hit.id)),
            }
            return;
        }

        if let Some(icon_id) = self.desktop.icon_at(column, row).map(str::to_string) {
            let multi = modifiers.contains(KeyModifiers::CONTROL);
            let now = Instant::now();
            if !multi
                && let Some((prev_id, prev)) = self.last_icon_click.take()
                && prev_id == icon_id
                && now.duration_since(prev) <= DOUBLE_CLICK_WINDOW
            {
                if let Some(app_id) = self
                    .store
                    .desktop()
                    .get(&icon_id)
                    .map(|icon| icon.app_id.clone())
                {
                    self.dispatch(SessionCommand::open_app(app_id));
                }
                return;
            }
            self.last_icon_click = Some((icon_id.clone(), now));
            self.dispatch(SessionCommand::SelectDesktopIcon {
                id: icon_id.clone(),
                multi_select: multi,
            });
            if let Some(origin) = self.store.desktop().get(&icon_id).map(|icon| icon.position) {
                self.drag = Some(DragGesture {
                    target: DragTarget::MoveIcon(icon_id),
                    start: (column, row),
                    origin,
                    origin_size: DesktopSurface::icon_size(),
                    preview: origin,
                    preview_size: DesktopSurface::icon_size(),
                    moved: false,
                });
            }
            return;
        }

        self.dispatch(SessionCommand::ClearDesktopSelection);
    }

    fn begin_window_drag(&mut self, id: WindowId, column: u16, row: u16, resize: bool) {
        let Some(window) = self.store.windows().get(id) else {
            return;
        };
        if window.maximized {
            // maximized geometry is synthetic; dragging it makes no sense
            return;
        }
        let target = if resize {
            DragTarget::ResizeWindow(id)
        } else {
            DragTarget::MoveWindow(id)
        };
        self.drag = Some(DragGesture {
            target,
            start: (column, row),
            origin: window.position,
            origin_size: window.size,
            preview: window.position,
            preview_size: window.size,
            moved: false,
        });
    }

    fn on_right_down(&mut self, column: u16, row: u16) {
        if self.help.visible() || self.settings_view.hit_test(column, row).is_some() {
            return;
        }
        if self.store.taskbar().apps_menu_open() {
            self.dispatch(SessionCommand::ToggleAppsMenu);
        }

        let items = if let Some(hit) = self.chrome.hit_test(column, row) {
            window_menu_items(hit.id)
        } else if let Some(icon_id) = self.desktop.icon_at(column, row).map(str::to_string) {
            icon_menu_items(&self.store, &icon_id)
        } else if crate::ui::rect_contains(self.desktop_area, column, row) {
            desktop_menu_items(&self.store)
        } else {
            return;
        };
        self.menu_view.reset();
        self.dispatch(SessionCommand::OpenContextMenu {
            anchor: Point::new(column as i32, row as i32),
            items,
        });
    }

    fn on_drag(&mut self, column: u16, row: u16) {
        let area = self.desktop_area;
        let Some(gesture) = &mut self.drag else {
            return;
        };
        let dx = column as i32 - gesture.start.0 as i32;
        let dy = row as i32 - gesture.start.1 as i32;
        match &gesture.target {
            DragTarget::MoveWindow(_) | DragTarget::MoveIcon(_) => {
                gesture.preview =
                    clamp_drag_position(gesture.origin.offset(dx, dy), gesture.origin_size, area);
            }
            DragTarget::ResizeWindow(_) => {
                gesture.preview_size =
                    clamp_drag_size(gesture.origin, gesture.origin_size, dx, dy, area);
            }
        }
        gesture.moved = true;
    }

    /// Commits the transient geometry to the store in a single command.
    fn on_drag_end(&mut self) {
        let Some(gesture) = self.drag.take() else {
            return;
        };
        if !gesture.moved {
            return;
        }
        match gesture.target {
            DragTarget::MoveWindow(id) => {
                self.dispatch(SessionCommand::MoveWindow(id, gesture.preview));
            }
            DragTarget::ResizeWindow(id) => {
                self.dispatch(SessionCommand::ResizeWindow(id, gesture.preview_size));
            }
            DragTarget::MoveIcon(id) => self.dispatch(SessionCommand::MoveDesktopIcon {
                id,
                position: gesture.preview,
            }),
        }
    }
}

/// Clamp a dragged rectangle so it stays fully inside `area`. When the
/// rectangle is larger than the area it pins to the top-left edge.
fn clamp_drag_position(position: Point, size: Size, area: Rect) -> Point {
    let min_x = area.x as i32;
    let min_y = area.y as i32;
    let max_x = (area.x + area.width) as i32 - size.width as i32;
    let max_y = (area.y + area.height) as i32 - size.height as i32;
    Point::new(
        position.x.min(max_x).max(min_x),
        position.y.min(max_y).max(min_y),
    )
}

/// Clamp a resize drag between the minimum window size and the area edge.
fn clamp_drag_size(origin: Point, origin_size: Size, dx: i32, dy: i32, area: Rect) -> Size {
    let max_width = ((area.x + area.width) as i32 - origin.x).max(MIN_WINDOW_WIDTH as i32);
    let max_height = ((area.y + area.height) as i32 - origin.y).max(MIN_WINDOW_HEIGHT as i32);
    let width = (origin_size.width as i32 + dx)
        .clamp(MIN_WINDOW_WIDTH as i32, max_width);
    let height = (origin_size.height as i32 + dy)
        .clamp(MIN_WINDOW_HEIGHT as i32, max_height);
    Size::new(width as u16, height as u16)
}

fn window_menu_items(id: WindowId) -> Vec<MenuItem> {
    vec![
        MenuItem::action("Minimize", SessionCommand::MinimizeWindow(id)).with_shortcut("Ctrl-M"),
        MenuItem::action("Maximize", SessionCommand::MaximizeWindow(id)).with_shortcut("Ctrl-F"),
        MenuItem::Separator,
        MenuItem::action("Close", SessionCommand::CloseWindow(id)).with_shortcut("Ctrl-W"),
    ]
}

fn icon_menu_items(store: &SessionStore, icon_id: &str) -> Vec<MenuItem> {
    let open = store
        .desktop()
        .get(icon_id)
        .map(|icon| MenuItem::action("Open", SessionCommand::open_app(icon.app_id.clone())))
        .unwrap_or_else(|| MenuItem::disabled("Open"));
    vec![
        open,
        MenuItem::disabled("Rename"),
        MenuItem::Separator,
        MenuItem::action(
            "Remove from desktop",
            SessionCommand::RemoveDesktopIcon(icon_id.to_string()),
        ),
    ]
}

fn desktop_menu_items(store: &SessionStore) -> Vec<MenuItem> {
    let launch_items: Vec<MenuItem> = store
        .dock()
        .apps()
        .iter()
        .map(|app| {
            MenuItem::action(app.name.clone(), SessionCommand::open_app(app.id.clone()))
        })
        .collect();
    let dock_label = if store.dock().visible() {
        "Hide dock"
    } else {
        "Show dock"
    };
    vec![
        MenuItem::submenu("Open app", launch_items),
        MenuItem::Separator,
        MenuItem::action("Clear selection", SessionCommand::ClearDesktopSelection),
        MenuItem::action(dock_label, SessionCommand::ToggleDockVisibility).with_shortcut("Ctrl-D"),
        MenuItem::Separator,
        MenuItem::action(
            "Settings…",
            SessionCommand::OpenSettings(store.settings().active_panel()),
        )
        .with_shortcut("Ctrl-S"),
    ]
}

/// Runs the shell until the user quits. The caller owns terminal setup and
/// teardown; this function only pumps events and draws.
pub fn run_shell<B, D>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    shell: &mut DesktopShell,
) -> Result<(), ShellError>
where
    B: Backend,
    D: InputDriver,
{
    let options = shell.options();
    let mut event_loop = EventLoop::new(driver, options.poll_interval);
    event_loop.driver().set_mouse_capture(options.mouse_capture)?;

    event_loop.run(|_driver, event| {
        if let Some(event) = event {
            if let ControlFlow::Quit = shell.handle_event(&event) {
                return Ok(ControlFlow::Quit);
            }
        } else {
            shell.tick(Instant::now());
            terminal
                .draw(|frame| {
                    let mut ui = UiFrame::new(frame);
                    shell.draw(&mut ui);
                })
                .map_err(|e| io::Error::other(e.to_string()))?;
        }
        Ok(ControlFlow::Continue)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect {
        x: 0,
        y: 1,
        width: 80,
        height: 20,
    };

    #[test]
    fn drag_position_clamps_to_area() {
        let size = Size::new(20, 5);
        assert_eq!(
            clamp_drag_position(Point::new(-10, -10), size, AREA),
            Point::new(0, 1)
        );
        assert_eq!(
            clamp_drag_position(Point::new(200, 200), size, AREA),
            Point::new(60, 16)
        );
        assert_eq!(
            clamp_drag_position(Point::new(30, 8), size, AREA),
            Point::new(30, 8)
        );
    }

    #[test]
    fn oversized_drag_pins_to_origin_edge() {
        let size = Size::new(200, 50);
        assert_eq!(
            clamp_drag_position(Point::new(10, 10), size, AREA),
            Point::new(0, 1)
        );
    }

    #[test]
    fn resize_clamps_between_minimum_and_area_edge() {
        let origin = Point::new(10, 5);
        let origin_size = Size::new(30, 10);
        // shrink below the minimum
        let size = clamp_drag_size(origin, origin_size, -100, -100, AREA);
        assert_eq!(size, Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
        // grow past the area edge
        let size = clamp_drag_size(origin, origin_size, 200, 200, AREA);
        assert_eq!(size, Size::new(70, 16));
        // ordinary delta passes through
        let size = clamp_drag_size(origin, origin_size, 4, 2, AREA);
        assert_eq!(size, Size::new(34, 12));
    }

    #[test]
    fn desktop_menu_marks_dock_toggle_by_state() {
        let mut store = SessionStore::new();
        let items = desktop_menu_items(&store);
        assert!(items.iter().any(|item| item.label() == "Hide dock"));
        store.apply(SessionCommand::ToggleDockVisibility, Instant::now());
        let items = desktop_menu_items(&store);
        assert!(items.iter().any(|item| item.label() == "Show dock"));
    }
}
