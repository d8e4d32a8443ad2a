//! Wallpaper and desktop icon rendering.

use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::session::{DesktopIcon, Point};
use crate::theme;
use crate::ui::{UiFrame, desktop_rect, rect_contains};

/// Cell footprint of one icon: a glyph row and a label row.
pub const ICON_WIDTH: u16 = 12;
pub const ICON_HEIGHT: u16 = 2;

#[derive(Debug, Default)]
pub struct DesktopSurface {
    icon_rects: Vec<(Rect, String)>,
}

impl DesktopSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size every icon occupies, used by drag clamping.
    pub fn icon_size() -> crate::session::Size {
        crate::session::Size::new(ICON_WIDTH, ICON_HEIGHT)
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        icons: &[DesktopIcon],
        drag_override: Option<(&str, Point)>,
    ) {
        self.icon_rects.clear();
        frame.fill(area, "·", theme::wallpaper_style());

        for icon in icons {
            let position = match drag_override {
                Some((id, preview)) if id == icon.id => preview,
                _ => icon.position,
            };
            let Some(rect) = desktop_rect(position, Self::icon_size(), area) else {
                continue;
            };
            let style = theme::icon_style(icon.selected);
            frame.fill(rect, " ", style);
            // glyph centered on the first row, label on the second
            let glyph_x = rect.x + rect.width / 2;
            frame.set_string(
                glyph_x.saturating_sub(1),
                rect.y,
                &icon.glyph,
                style.add_modifier(Modifier::BOLD),
            );
            if rect.height > 1 {
                let label = centered_label(&icon.name, rect.width as usize);
                frame.set_string(rect.x, rect.y + 1, &label, style);
            }
            self.icon_rects.push((rect, icon.id.clone()));
        }
    }

    /// The icon under the pointer, if any. Later icons paint over earlier
    /// ones, so scan in reverse.
    pub fn icon_at(&self, column: u16, row: u16) -> Option<&str> {
        self.icon_rects
            .iter()
            .rev()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, id)| id.as_str())
    }
}

fn centered_label(name: &str, width: usize) -> String {
    let label: String = name.chars().take(width).collect();
    let pad = width.saturating_sub(label.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_label_pads_short_names() {
        assert_eq!(centered_label("ab", 6), "  ab");
        assert_eq!(centered_label("toolongname", 4), "tool");
    }
}
