//! The top menu bar and its pull-down apps menu.

use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::session::SessionStore;
use crate::theme;
use crate::ui::{UiFrame, rect_contains};

const APPS_LABEL: &str = " ▣ Apps ";
const SETTINGS_LABEL: &str = "Settings…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuBarHit {
    AppsButton,
    /// An app row inside the open apps menu.
    AppEntry(String),
    /// The settings row inside the open apps menu.
    SettingsEntry,
    /// Anywhere else on the bar.
    Bar,
}

#[derive(Debug, Default)]
pub struct MenuBar {
    bar: Rect,
    apps_button: Rect,
    dropdown: Rect,
    entries: Vec<(Rect, MenuBarHit)>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, bar: Rect, store: &SessionStore) {
        // reset every hit region first so a hidden bar cannot leave stale
        // rectangles behind for the next hit test
        self.bar = bar;
        self.apps_button = Rect::default();
        self.dropdown = Rect::default();
        self.entries.clear();
        if bar.height == 0 {
            return;
        }
        frame.fill(bar, " ", theme::menu_bar_style());

        self.apps_button = Rect {
            x: bar.x,
            y: bar.y,
            width: (APPS_LABEL.chars().count() as u16).min(bar.width),
            height: 1,
        };
        let apps_style = if store.taskbar().apps_menu_open() {
            theme::apps_menu_selected_style()
        } else {
            theme::menu_bar_style().add_modifier(Modifier::BOLD)
        };
        frame.set_string(bar.x, bar.y, APPS_LABEL, apps_style);

        let title = store
            .windows()
            .focused()
            .map(|w| w.title.as_str())
            .unwrap_or("Desktop");
        let title_x = bar.x + bar.width / 2 - (title.chars().count() as u16 / 2).min(bar.width / 2);
        frame.set_string(title_x, bar.y, title, theme::menu_bar_style());

        let hint = "F1 Help ";
        let hint_x = bar
            .x
            .saturating_add(bar.width.saturating_sub(hint.chars().count() as u16));
        frame.set_string(hint_x, bar.y, hint, theme::menu_bar_style());

        if store.taskbar().apps_menu_open() {
            self.render_dropdown(frame, store);
        }
    }

    fn render_dropdown(&mut self, frame: &mut UiFrame<'_>, store: &SessionStore) {
        let apps = store.dock().apps();
        let width = apps
            .iter()
            .map(|app| app.name.chars().count())
            .chain([SETTINGS_LABEL.chars().count()])
            .max()
            .unwrap_or(0) as u16
            + 4;
        // apps + separator + settings row
        let height = apps.len() as u16 + 2;
        self.dropdown = Rect {
            x: self.bar.x,
            y: self.bar.y + 1,
            width,
            height,
        };
        frame.fill(self.dropdown, " ", theme::apps_menu_style());

        let mut y = self.dropdown.y;
        for app in apps {
            let row = Rect {
                x: self.dropdown.x,
                y,
                width,
                height: 1,
            };
            frame.set_string(
                row.x + 1,
                y,
                &format!("{} {}", app.glyph, app.name),
                theme::apps_menu_style(),
            );
            self.entries.push((row, MenuBarHit::AppEntry(app.id.clone())));
            y += 1;
        }
        frame.set_string(
            self.dropdown.x,
            y,
            &"─".repeat(width as usize),
            theme::apps_menu_style(),
        );
        y += 1;
        let settings_row = Rect {
            x: self.dropdown.x,
            y,
            width,
            height: 1,
        };
        frame.set_string(settings_row.x + 1, y, SETTINGS_LABEL, theme::apps_menu_style());
        self.entries.push((settings_row, MenuBarHit::SettingsEntry));
    }

    /// Hit test against the bar and, when open, the dropdown.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<MenuBarHit> {
        if rect_contains(self.apps_button, column, row) {
            return Some(MenuBarHit::AppsButton);
        }
        for (rect, hit) in &self.entries {
            if rect_contains(*rect, column, row) {
                return Some(hit.clone());
            }
        }
        if rect_contains(self.bar, column, row) {
            return Some(MenuBarHit::Bar);
        }
        None
    }

    pub fn dropdown_contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.dropdown, column, row)
    }
}
