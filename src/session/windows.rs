//! The window registry: stacking, focus, and geometry for open windows.
//!
//! Invariants maintained across every operation:
//! - at most one window is focused at any observation point;
//! - a minimized window is never focused;
//! - focusing a window raises its z-index strictly above every other window.

use std::fmt;

use super::{Point, Size};
use crate::constants::{
    CASCADE_ORIGIN_X, CASCADE_ORIGIN_Y, CASCADE_STEP_X, CASCADE_STEP_Y, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_WIDTH,
};

/// Registry-assigned window identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: String,
    pub title: String,
    pub position: Point,
    pub size: Size,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
    pub focused: bool,
    /// Opaque body text shown by the placeholder chrome. The registry never
    /// inspects it.
    pub content: Option<String>,
}

#[derive(Debug)]
pub struct WindowRegistry {
    windows: Vec<WindowRecord>,
    next_id: u64,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            next_id: 1,
        }
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.get(id).is_some()
    }

    pub fn focused(&self) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.focused)
    }

    pub fn focused_id(&self) -> Option<WindowId> {
        self.focused().map(|w| w.id)
    }

    pub fn find_by_app(&self, app_id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.app_id == app_id)
    }

    /// Windows in ascending stacking order, minimized windows excluded.
    /// This is the paint order for the view layer.
    pub fn stacking_order(&self) -> Vec<WindowId> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| !w.minimized).collect();
        visible.sort_by_key(|w| w.z_index);
        visible.iter().map(|w| w.id).collect()
    }

    /// True while any non-minimized window is maximized. The dock auto-hide
    /// query consults this.
    pub fn any_maximized_visible(&self) -> bool {
        self.windows.iter().any(|w| w.maximized && !w.minimized)
    }

    fn max_z(&self) -> u32 {
        self.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    /// Creates a new window for `app_id`, cascaded diagonally from the
    /// previous one, focused, and stacked on top.
    ///
    /// When `prevent_duplicates` is set and a window for `app_id` already
    /// exists, that window is un-minimized (if needed) and focused instead,
    /// and its id is returned.
    pub fn open(
        &mut self,
        app_id: impl Into<String>,
        title: impl Into<String>,
        content: Option<String>,
        prevent_duplicates: bool,
    ) -> WindowId {
        let app_id = app_id.into();
        if prevent_duplicates
            && let Some(existing) = self.find_by_app(&app_id).map(|w| w.id)
        {
            self.focus(existing);
            return existing;
        }

        let count = self.windows.len() as i32;
        let id = WindowId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let record = WindowRecord {
            id,
            app_id,
            title: title.into(),
            position: Point::new(
                CASCADE_ORIGIN_X + count * CASCADE_STEP_X,
                CASCADE_ORIGIN_Y + count * CASCADE_STEP_Y,
            ),
            size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            z_index: self.max_z() + 1,
            minimized: false,
            maximized: false,
            focused: true,
            content,
        };
        for w in &mut self.windows {
            w.focused = false;
        }
        tracing::debug!(window_id = %record.id, app_id = %record.app_id, "opened window");
        self.windows.push(record);
        id
    }

    /// Removes the window. If the focused window was removed, the topmost
    /// remaining non-minimized window is re-focused.
    pub fn close(&mut self, id: WindowId) {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != id);
        if self.windows.len() == before {
            tracing::trace!(window_id = %id, "close on unknown window ignored");
            return;
        }
        tracing::debug!(window_id = %id, "closed window");
        if !self.windows.iter().any(|w| w.focused)
            && let Some(top) = self
                .windows
                .iter()
                .filter(|w| !w.minimized)
                .max_by_key(|w| w.z_index)
                .map(|w| w.id)
        {
            self.focus(top);
        }
    }

    /// Focuses the target: the only focused window afterward, raised above
    /// every other window, and un-minimized if it was minimized.
    pub fn focus(&mut self, id: WindowId) {
        if !self.contains(id) {
            tracing::trace!(window_id = %id, "focus on unknown window ignored");
            return;
        }
        let top = self.max_z();
        for w in &mut self.windows {
            if w.id == id {
                w.focused = true;
                w.minimized = false;
                w.z_index = top + 1;
            } else {
                w.focused = false;
            }
        }
    }

    /// Toggle semantics kept from the original store: minimizes a visible
    /// window, restores a minimized one. Minimizing clears focus; restoring
    /// through the toggle does not grant it back.
    pub fn minimize(&mut self, id: WindowId) {
        let Some(minimized) = self.get(id).map(|w| w.minimized) else {
            return;
        };
        if minimized {
            self.restore(id);
        } else if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.minimized = true;
            w.focused = false;
        }
    }

    /// Explicit counterpart to the minimize half of the toggle.
    pub fn restore(&mut self, id: WindowId) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.minimized = false;
        }
    }

    /// Toggles the maximized flag. Focus and minimized state are untouched;
    /// the view layer renders a maximized window over the full desktop area
    /// without disturbing its stored geometry.
    pub fn maximize(&mut self, id: WindowId) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.maximized = !w.maximized;
        }
    }

    /// Direct geometry write. Bounds clamping is the caller's job, applied
    /// before commit (the drag handler clamps against the viewport).
    pub fn move_to(&mut self, id: WindowId, position: Point) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.position = position;
        }
    }

    pub fn resize(&mut self, id: WindowId, size: Size) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.size = size;
        }
    }

    pub fn set_title(&mut self, id: WindowId, title: impl Into<String>) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.title = title.into();
        }
    }

    /// Moves focus to the next (or previous) window in creation order,
    /// wrapping around. Minimized windows are skipped.
    pub fn cycle_focus(&mut self, forward: bool) {
        let eligible: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|w| !w.minimized)
            .map(|w| w.id)
            .collect();
        if eligible.is_empty() {
            return;
        }
        let current = self.focused_id();
        let idx = current
            .and_then(|id| eligible.iter().position(|x| *x == id))
            .unwrap_or(0);
        let step = if forward { 1isize } else { -1isize };
        let next = ((idx as isize + step).rem_euclid(eligible.len() as isize)) as usize;
        self.focus(eligible[next]);
    }
}
