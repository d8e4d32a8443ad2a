//! The dock strip: one cell block per launchable app.

use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::constants::DOCK_THICKNESS;
use crate::session::{DockPosition, DockState};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};

const CELL_WIDTH: u16 = 5;
const CELL_HEIGHT: u16 = 2;

#[derive(Debug, Default)]
pub struct DockBar {
    area: Rect,
    cells: Vec<(Rect, String)>,
    visible: bool,
}

impl DockBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits the dock strip off `area` and returns the remainder for the
    /// desktop. Call this even when the dock is hidden so the layout stays
    /// stable; a hidden dock simply gives the whole area back.
    pub fn layout(&mut self, area: Rect, position: DockPosition, visible: bool) -> Rect {
        self.visible = visible;
        if !visible {
            self.area = Rect::default();
            return area;
        }
        let (dock, rest) = match position {
            DockPosition::Bottom => {
                let thickness = DOCK_THICKNESS.min(area.height);
                (
                    Rect {
                        y: area.y + area.height - thickness,
                        height: thickness,
                        ..area
                    },
                    Rect {
                        height: area.height - thickness,
                        ..area
                    },
                )
            }
            DockPosition::Left => {
                let thickness = (CELL_WIDTH + 2).min(area.width);
                (
                    Rect {
                        width: thickness,
                        ..area
                    },
                    Rect {
                        x: area.x + thickness,
                        width: area.width - thickness,
                        ..area
                    },
                )
            }
            DockPosition::Right => {
                let thickness = (CELL_WIDTH + 2).min(area.width);
                (
                    Rect {
                        x: area.x + area.width - thickness,
                        width: thickness,
                        ..area
                    },
                    Rect {
                        width: area.width - thickness,
                        ..area
                    },
                )
            }
        };
        self.area = dock;
        rest
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.visible && rect_contains(self.area, column, row)
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, dock: &DockState) {
        self.cells.clear();
        if !self.visible || self.area.width == 0 || self.area.height == 0 {
            return;
        }
        frame.fill(self.area, " ", theme::dock_style());

        let horizontal = matches!(dock.position(), DockPosition::Bottom);
        let mut x = self.area.x + 1;
        let mut y = self.area.y + 1;
        for app in dock.apps() {
            let cell = Rect {
                x,
                y,
                width: CELL_WIDTH,
                height: CELL_HEIGHT.min(self.area.height),
            };
            if cell.x + cell.width > self.area.x + self.area.width
                || cell.y + cell.height > self.area.y + self.area.height
            {
                break;
            }
            let accent = theme::rgb_to_color(app.color);
            let style = theme::dock_style().fg(accent);
            frame.set_string(
                cell.x + CELL_WIDTH / 2,
                cell.y,
                &app.glyph,
                style.add_modifier(Modifier::BOLD),
            );
            if cell.height > 1 {
                let short: String = app.name.chars().take(CELL_WIDTH as usize).collect();
                frame.set_string(cell.x, cell.y + 1, &short, theme::dock_style());
            }
            self.cells.push((cell, app.id.clone()));
            if horizontal {
                x += CELL_WIDTH + 1;
            } else {
                y += CELL_HEIGHT + 1;
            }
        }
    }

    pub fn app_at(&self, column: u16, row: u16) -> Option<&str> {
        self.cells
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, id)| id.as_str())
    }
}
