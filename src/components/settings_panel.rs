//! The settings window: a panel list on the left, the active panel's
//! content on the right.

use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::session::{SessionStore, SettingsPanel};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};

const PANEL_LIST_WIDTH: u16 = 16;
const WIDTH: u16 = 54;
const HEIGHT: u16 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsHit {
    Panel(SettingsPanel),
    Close,
    /// Inside the window but on nothing interactive.
    Inside,
}

#[derive(Debug, Default)]
pub struct SettingsView {
    window: Rect,
    close: Rect,
    panel_rows: Vec<(Rect, SettingsPanel)>,
}

impl SettingsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, store: &SessionStore) {
        self.panel_rows.clear();
        self.window = Rect::default();
        if !store.settings().is_open() {
            return;
        }
        let width = WIDTH.min(area.width);
        let height = HEIGHT.min(area.height);
        let window = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        self.window = window;

        frame.fill(window, " ", theme::window_body_style());
        let header = Rect {
            height: 1,
            ..window
        };
        frame.fill(header, " ", theme::header_focused_style());
        frame.set_string(window.x + 1, window.y, "Settings", theme::header_focused_style());
        self.close = Rect {
            x: window.x + window.width.saturating_sub(2),
            y: window.y,
            width: 1,
            height: 1,
        };
        frame.set_string(
            self.close.x,
            self.close.y,
            "x",
            theme::header_focused_style().add_modifier(Modifier::BOLD),
        );

        let active = store.settings().active_panel();
        for (idx, panel) in SettingsPanel::ALL.into_iter().enumerate() {
            let row = Rect {
                x: window.x + 1,
                y: window.y + 2 + idx as u16,
                width: PANEL_LIST_WIDTH,
                height: 1,
            };
            if row.y >= window.y + window.height {
                break;
            }
            let style = if panel == active {
                theme::menu_selected_style()
            } else {
                theme::window_body_style()
            };
            frame.set_string(row.x, row.y, &format!(" {}", panel.title()), style);
            self.panel_rows.push((row, panel));
        }

        let content_x = window.x + PANEL_LIST_WIDTH + 2;
        let content_width = window.width.saturating_sub(PANEL_LIST_WIDTH + 3) as usize;
        for (idx, line) in panel_content(active, store).into_iter().enumerate() {
            let y = window.y + 2 + idx as u16;
            if y >= window.y + window.height || content_width == 0 {
                break;
            }
            frame.set_string(content_x, y, &line, theme::window_body_style());
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<SettingsHit> {
        if self.window.width == 0 || !rect_contains(self.window, column, row) {
            return None;
        }
        if rect_contains(self.close, column, row) {
            return Some(SettingsHit::Close);
        }
        for (rect, panel) in &self.panel_rows {
            if rect_contains(*rect, column, row) {
                return Some(SettingsHit::Panel(*panel));
            }
        }
        Some(SettingsHit::Inside)
    }
}

fn panel_content(panel: SettingsPanel, store: &SessionStore) -> Vec<String> {
    match panel {
        SettingsPanel::General => vec![
            "Session".to_string(),
            format!("  open windows: {}", store.windows().len()),
            format!("  desktop icons: {}", store.desktop().icons().len()),
        ],
        SettingsPanel::Appearance => vec![
            "Theme: Bitcoin dark".to_string(),
            "Wallpaper: dotted".to_string(),
        ],
        SettingsPanel::Dock => vec![
            format!("Position: {}", store.dock().position().as_str()),
            format!("Visible: {}", store.dock().visible()),
            format!("Pinned apps: {}", store.dock().apps().len()),
        ],
        SettingsPanel::Notifications => vec![
            format!("Queued: {}", store.notifications().len()),
            "Auto-expiry: per notification".to_string(),
        ],
        SettingsPanel::About => vec![
            format!("term-desktop {}", env!("CARGO_PKG_VERSION")),
            "A desktop session in your terminal.".to_string(),
        ],
    }
}
