//! Window chrome: borders, header with control buttons, body content.
//!
//! Geometry comes from the registry except for the window currently being
//! dragged or resized, whose transient preview geometry is passed in and is
//! visually authoritative until the gesture commits.

use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::session::{Point, Size, WindowId, WindowRecord, WindowRegistry};
use crate::theme;
use crate::ui::{UiFrame, desktop_rect, rect_contains};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowHitKind {
    Header,
    Minimize,
    Maximize,
    Close,
    Resize,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHit {
    pub id: WindowId,
    pub kind: WindowHitKind,
}

#[derive(Debug, Clone, Copy)]
struct DrawnWindow {
    id: WindowId,
    rect: Rect,
    minimize: Rect,
    maximize: Rect,
    close: Rect,
    resize: Rect,
}

#[derive(Debug, Default)]
pub struct WindowChrome {
    // bottom-to-top paint order; hit tests scan it in reverse
    drawn: Vec<DrawnWindow>,
}

impl WindowChrome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints every non-minimized window in ascending stacking order.
    /// `preview` overrides the geometry of the window under an active drag.
    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        registry: &WindowRegistry,
        preview: Option<(WindowId, Point, Size)>,
    ) {
        self.drawn.clear();
        for id in registry.stacking_order() {
            let Some(window) = registry.get(id) else {
                continue;
            };
            let (position, size) = match preview {
                Some((pid, pos, sz)) if pid == id => (pos, sz),
                _ => (window.position, window.size),
            };
            let (position, size) = if window.maximized {
                (
                    Point::new(area.x as i32, area.y as i32),
                    Size::new(area.width, area.height),
                )
            } else {
                (position, size)
            };
            let Some(rect) = desktop_rect(position, size, area) else {
                continue;
            };
            self.draw_window(frame, rect, window);
        }
    }

    fn draw_window(&mut self, frame: &mut UiFrame<'_>, rect: Rect, window: &WindowRecord) {
        let header_style = if window.focused {
            theme::header_focused_style()
        } else {
            theme::header_unfocused_style()
        };

        frame.fill(rect, " ", theme::window_body_style());

        // header row: `[-][o][x]` left, title centered over the remainder
        let header = Rect {
            height: 1.min(rect.height),
            ..rect
        };
        frame.fill(header, " ", header_style);
        let buttons = ["-", "o", "x"];
        let mut button_rects = [Rect::default(); 3];
        for (idx, glyph) in buttons.iter().enumerate() {
            let x = rect.x.saturating_add(1 + idx as u16 * 2);
            let cell = Rect {
                x,
                y: rect.y,
                width: 1,
                height: 1,
            };
            if rect_contains(rect, x, rect.y) {
                frame.set_string(x, rect.y, glyph, header_style.add_modifier(Modifier::BOLD));
            }
            button_rects[idx] = cell;
        }
        let title_start = rect.x.saturating_add(8);
        let title_width = rect.width.saturating_sub(9) as usize;
        if title_width > 0 {
            let title: String = window.title.chars().take(title_width).collect();
            let centered_x =
                title_start + ((title_width.saturating_sub(title.chars().count())) / 2) as u16;
            frame.set_string(centered_x, rect.y, &title, header_style);
        }

        // body content, one line per row
        let body = Rect {
            x: rect.x.saturating_add(1),
            y: rect.y.saturating_add(1),
            width: rect.width.saturating_sub(2),
            height: rect.height.saturating_sub(2),
        };
        let fallback = format!("{} · {}", window.app_id, window.id);
        let content = window.content.as_deref().unwrap_or(&fallback);
        for (row, line) in content.lines().take(body.height as usize).enumerate() {
            frame.set_string(body.x, body.y + row as u16, line, theme::window_body_style());
        }

        // bottom border with the resize handle in the corner
        let bottom_y = rect.y.saturating_add(rect.height.saturating_sub(1));
        let border_style = theme::window_border_style(window.focused);
        if rect.height > 1 {
            let bottom = Rect {
                x: rect.x,
                y: bottom_y,
                width: rect.width,
                height: 1,
            };
            frame.fill(bottom, "─", border_style);
        }
        let resize = Rect {
            x: rect.x.saturating_add(rect.width.saturating_sub(1)),
            y: bottom_y,
            width: 1,
            height: 1,
        };
        frame.set_string(resize.x, resize.y, "┘", border_style);

        self.drawn.push(DrawnWindow {
            id: window.id,
            rect,
            minimize: button_rects[0],
            maximize: button_rects[1],
            close: button_rects[2],
            resize,
        });
    }

    /// Topmost window region under the pointer. Buttons win over the header,
    /// the header over the body, and the resize corner over the border.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<WindowHit> {
        for drawn in self.drawn.iter().rev() {
            if !rect_contains(drawn.rect, column, row) {
                continue;
            }
            let kind = if rect_contains(drawn.minimize, column, row) {
                WindowHitKind::Minimize
            } else if rect_contains(drawn.maximize, column, row) {
                WindowHitKind::Maximize
            } else if rect_contains(drawn.close, column, row) {
                WindowHitKind::Close
            } else if rect_contains(drawn.resize, column, row) {
                WindowHitKind::Resize
            } else if row == drawn.rect.y {
                WindowHitKind::Header
            } else {
                WindowHitKind::Body
            };
            return Some(WindowHit {
                id: drawn.id,
                kind,
            });
        }
        None
    }
}
