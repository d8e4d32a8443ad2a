//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to
//! the visible area and centralizes clipping logic.
//!
//! Window and icon geometry is signed and user-driven, so rectangles
//! routinely drift partially outside the terminal buffer mid-drag. Writing
//! out-of-bounds into the underlying `Buffer` can panic or corrupt
//! rendering; routing every draw through `UiFrame` keeps the guard in one
//! place instead of in each component.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::session::{Point, Size};

/// Wrapper around `ratatui::Frame` that clamps drawing to the visible area.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Fills the clipped rectangle with a single symbol and style.
    pub fn fill(&mut self, area: Rect, symbol: &str, style: Style) {
        let Some(clipped) = self.clip_rect(area) else {
            return;
        };
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                    cell.set_style(style);
                }
            }
        }
    }

    /// Writes a string starting at `(x, y)`, truncated at the frame edge.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) {
        safe_set_string(self.buffer, self.area, x, y, text, style);
    }
}

/// Converts a signed desktop rectangle to the on-screen `Rect` it occupies,
/// clipped against `bounds`. Returns `None` when nothing is visible.
pub fn desktop_rect(position: Point, size: Size, bounds: Rect) -> Option<Rect> {
    let x0 = position.x.max(bounds.x as i32);
    let y0 = position.y.max(bounds.y as i32);
    let x1 = (position.x + size.width as i32).min((bounds.x + bounds.width) as i32);
    let y1 = (position.y + size.height as i32).min((bounds.y + bounds.height) as i32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect {
        x: x0 as u16,
        y: y0 as u16,
        width: (x1 - x0) as u16,
        height: (y1 - y0) as u16,
    })
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn desktop_rect_clips_negative_origins() {
        let rect = desktop_rect(Point::new(-5, -2), Size::new(10, 6), BOUNDS).unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0, 0, 5, 4));
    }

    #[test]
    fn desktop_rect_fully_offscreen_is_none() {
        assert!(desktop_rect(Point::new(100, 0), Size::new(10, 6), BOUNDS).is_none());
        assert!(desktop_rect(Point::new(-20, 0), Size::new(10, 6), BOUNDS).is_none());
    }

    #[test]
    fn rect_contains_excludes_far_edges() {
        let rect = Rect {
            x: 2,
            y: 2,
            width: 3,
            height: 2,
        };
        assert!(rect_contains(rect, 2, 2));
        assert!(rect_contains(rect, 4, 3));
        assert!(!rect_contains(rect, 5, 2));
        assert!(!rect_contains(rect, 2, 4));
    }

    #[test]
    fn truncate_to_width_is_char_aware() {
        assert_eq!(truncate_to_width("héllo", 3), "hél");
        assert_eq!(truncate_to_width("ok", 5), "ok");
    }
}
