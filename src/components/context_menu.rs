//! Context menu popup rendering, with viewport clamping.
//!
//! The store holds the anchor exactly where the user clicked; this view is
//! responsible for repositioning the popup so the whole menu stays inside
//! the viewport, clamping each axis independently with a fixed margin.

use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::constants::CONTEXT_MENU_MARGIN;
use crate::session::{ContextMenu, MenuItem, Point, SessionCommand, Size};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};

#[derive(Debug, Clone, PartialEq)]
pub enum MenuHit {
    /// A leaf action with its command (already cloned out of the tree).
    Action(Option<SessionCommand>),
    /// A disabled row or separator; the click is consumed, nothing happens.
    Inert,
    /// A submenu row at this top-level index; toggles its flyout.
    Submenu(usize),
    /// Inside neither popup.
    Outside,
}

/// Width and height in cells the given items need, padding included.
pub fn menu_extent(items: &[MenuItem]) -> Size {
    let width = items
        .iter()
        .map(|item| match item {
            MenuItem::Separator => 0,
            MenuItem::Action(entry) => {
                let shortcut = entry
                    .shortcut
                    .as_ref()
                    .map(|s| s.chars().count() + 2)
                    .unwrap_or(0);
                let glyph = entry.glyph.as_ref().map(|g| g.chars().count() + 1).unwrap_or(0);
                entry.label.chars().count() + shortcut + glyph
            }
            MenuItem::Submenu { label, .. } => label.chars().count() + 2,
        })
        .max()
        .unwrap_or(0) as u16
        + 2;
    Size::new(width, items.len() as u16)
}

/// Clamps `anchor` so a menu of `extent` fits inside `viewport` with
/// `margin` cells to spare, each axis independently. The anchor never goes
/// left of or above the margin even when the menu is larger than the
/// viewport.
pub fn clamp_menu_anchor(anchor: Point, extent: Size, viewport: Rect, margin: u16) -> Point {
    let min_x = viewport.x as i32 + margin as i32;
    let min_y = viewport.y as i32 + margin as i32;
    let max_x = (viewport.x + viewport.width) as i32 - margin as i32 - extent.width as i32;
    let max_y = (viewport.y + viewport.height) as i32 - margin as i32 - extent.height as i32;
    Point::new(
        anchor.x.min(max_x).max(min_x),
        anchor.y.min(max_y).max(min_y),
    )
}

#[derive(Debug, Default)]
pub struct ContextMenuView {
    open_submenu: Option<usize>,
    rows: Vec<(Rect, MenuHit)>,
    popups: Vec<Rect>,
}

impl ContextMenuView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget transient submenu state; called whenever the store menu closes
    /// or is replaced.
    pub fn reset(&mut self) {
        self.open_submenu = None;
    }

    pub fn toggle_submenu(&mut self, index: usize) {
        self.open_submenu = if self.open_submenu == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, viewport: Rect, menu: &ContextMenu) {
        self.rows.clear();
        self.popups.clear();

        let extent = menu_extent(&menu.items);
        let anchor = clamp_menu_anchor(menu.anchor, extent, viewport, CONTEXT_MENU_MARGIN);
        let rect = Rect {
            x: anchor.x.max(0) as u16,
            y: anchor.y.max(0) as u16,
            width: extent.width,
            height: extent.height,
        };
        self.draw_items(frame, rect, &menu.items, true);

        if let Some(index) = self.open_submenu
            && let Some(MenuItem::Submenu { items, .. }) = menu.items.get(index)
        {
            let sub_extent = menu_extent(items);
            let sub_anchor = clamp_menu_anchor(
                Point::new(
                    rect.x as i32 + rect.width as i32,
                    rect.y as i32 + index as i32,
                ),
                sub_extent,
                viewport,
                CONTEXT_MENU_MARGIN,
            );
            let sub_rect = Rect {
                x: sub_anchor.x.max(0) as u16,
                y: sub_anchor.y.max(0) as u16,
                width: sub_extent.width,
                height: sub_extent.height,
            };
            self.draw_items(frame, sub_rect, items, false);
        }
    }

    fn draw_items(
        &mut self,
        frame: &mut UiFrame<'_>,
        rect: Rect,
        items: &[MenuItem],
        top_level: bool,
    ) {
        frame.fill(rect, " ", theme::menu_style());
        self.popups.push(rect);
        for (index, item) in items.iter().enumerate() {
            let row = Rect {
                x: rect.x,
                y: rect.y + index as u16,
                width: rect.width,
                height: 1,
            };
            let hit = match item {
                MenuItem::Separator => {
                    frame.set_string(
                        row.x,
                        row.y,
                        &"─".repeat(rect.width as usize),
                        theme::menu_style(),
                    );
                    MenuHit::Inert
                }
                MenuItem::Action(entry) => {
                    let style = if entry.disabled {
                        theme::menu_disabled_style()
                    } else {
                        theme::menu_style()
                    };
                    let glyph = entry.glyph.as_deref().unwrap_or("");
                    let label = if glyph.is_empty() {
                        format!(" {}", entry.label)
                    } else {
                        format!(" {glyph} {}", entry.label)
                    };
                    frame.set_string(row.x, row.y, &label, style);
                    if let Some(shortcut) = &entry.shortcut {
                        let x = row
                            .x
                            .saturating_add(rect.width.saturating_sub(shortcut.chars().count() as u16 + 1));
                        frame.set_string(x, row.y, shortcut, style.add_modifier(Modifier::DIM));
                    }
                    if entry.disabled {
                        MenuHit::Inert
                    } else {
                        MenuHit::Action(entry.command.clone())
                    }
                }
                MenuItem::Submenu { label, .. } => {
                    frame.set_string(row.x, row.y, &format!(" {label}"), theme::menu_style());
                    frame.set_string(
                        row.x.saturating_add(rect.width.saturating_sub(2)),
                        row.y,
                        "▸",
                        theme::menu_style(),
                    );
                    if top_level {
                        MenuHit::Submenu(index)
                    } else {
                        // nested submenus are not expanded further
                        MenuHit::Inert
                    }
                }
            };
            self.rows.push((row, hit));
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> MenuHit {
        for (rect, hit) in &self.rows {
            if rect_contains(*rect, column, row) {
                return hit.clone();
            }
        }
        if self.popups.iter().any(|p| rect_contains(*p, column, row)) {
            return MenuHit::Inert;
        }
        MenuHit::Outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn items() -> Vec<MenuItem> {
        vec![
            MenuItem::action("Open", SessionCommand::CloseContextMenu),
            MenuItem::Separator,
            MenuItem::disabled("Rename"),
        ]
    }

    #[test]
    fn extent_covers_widest_label_plus_padding() {
        let extent = menu_extent(&items());
        assert_eq!(extent.height, 3);
        assert_eq!(extent.width, "Rename".len() as u16 + 2);
    }

    #[test]
    fn anchor_inside_viewport_is_untouched() {
        let extent = Size::new(10, 4);
        let anchor = clamp_menu_anchor(Point::new(5, 5), extent, VIEWPORT, 1);
        assert_eq!(anchor, Point::new(5, 5));
    }

    #[test]
    fn anchor_near_edges_is_clamped_per_axis() {
        let extent = Size::new(10, 4);
        // right edge: x pulled back, y kept
        let anchor = clamp_menu_anchor(Point::new(78, 5), extent, VIEWPORT, 1);
        assert_eq!(anchor, Point::new(80 - 1 - 10, 5));
        // bottom edge: y pulled back, x kept
        let anchor = clamp_menu_anchor(Point::new(5, 23), extent, VIEWPORT, 1);
        assert_eq!(anchor, Point::new(5, 24 - 1 - 4));
        // both negative: pinned to the margin
        let anchor = clamp_menu_anchor(Point::new(-3, -9), extent, VIEWPORT, 1);
        assert_eq!(anchor, Point::new(1, 1));
    }

    #[test]
    fn oversized_menu_pins_to_margin() {
        let extent = Size::new(200, 4);
        let anchor = clamp_menu_anchor(Point::new(40, 5), extent, VIEWPORT, 1);
        assert_eq!(anchor.x, 1);
    }

    #[test]
    fn submenu_toggle_flips_and_resets() {
        let mut view = ContextMenuView::new();
        view.toggle_submenu(2);
        assert_eq!(view.open_submenu, Some(2));
        view.toggle_submenu(2);
        assert_eq!(view.open_submenu, None);
        view.toggle_submenu(1);
        view.reset();
        assert_eq!(view.open_submenu, None);
    }
}
