//! Desktop icon layer: positioned, selectable shortcuts on the wallpaper.

use super::Point;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIcon {
    pub id: String,
    pub app_id: String,
    pub name: String,
    pub glyph: String,
    pub position: Point,
    pub selected: bool,
}

impl DesktopIcon {
    pub fn new(
        id: impl Into<String>,
        app_id: impl Into<String>,
        name: impl Into<String>,
        glyph: impl Into<String>,
        position: Point,
    ) -> Self {
        Self {
            id: id.into(),
            app_id: app_id.into(),
            name: name.into(),
            glyph: glyph.into(),
            position,
            selected: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct DesktopLayer {
    icons: Vec<DesktopIcon>,
}

impl DesktopLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn get(&self, id: &str) -> Option<&DesktopIcon> {
        self.icons.iter().find(|icon| icon.id == id)
    }

    pub fn add_icon(&mut self, icon: DesktopIcon) {
        tracing::debug!(icon_id = %icon.id, app_id = %icon.app_id, "added desktop icon");
        self.icons.push(icon);
    }

    pub fn remove_icon(&mut self, id: &str) {
        self.icons.retain(|icon| icon.id != id);
    }

    /// Position update. The drag handler clamps against the viewport before
    /// calling this; the layer itself does not clamp.
    pub fn move_icon(&mut self, id: &str, position: Point) {
        if let Some(icon) = self.icons.iter_mut().find(|icon| icon.id == id) {
            icon.position = position;
        }
    }

    /// Single-select replaces the whole selection with the target.
    /// Multi-select toggles the target and leaves every other icon alone.
    pub fn select_icon(&mut self, id: &str, multi_select: bool) {
        for icon in &mut self.icons {
            icon.selected = if multi_select {
                if icon.id == id {
                    !icon.selected
                } else {
                    icon.selected
                }
            } else {
                icon.id == id
            };
        }
    }

    pub fn clear_selection(&mut self) {
        for icon in &mut self.icons {
            icon.selected = false;
        }
    }

    pub fn selected_ids(&self) -> Vec<&str> {
        self.icons
            .iter()
            .filter(|icon| icon.selected)
            .map(|icon| icon.id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_abc() -> DesktopLayer {
        let mut layer = DesktopLayer::new();
        for id in ["a", "b", "c"] {
            layer.add_icon(DesktopIcon::new(id, id, id.to_uppercase(), "@", Point::default()));
        }
        layer
    }

    #[test]
    fn single_select_is_exclusive() {
        let mut layer = layer_abc();
        layer.select_icon("a", false);
        layer.select_icon("b", false);
        assert_eq!(layer.selected_ids(), vec!["b"]);
    }

    #[test]
    fn multi_select_is_additive_and_toggles() {
        let mut layer = layer_abc();
        layer.select_icon("a", false);
        layer.select_icon("b", true);
        assert_eq!(layer.selected_ids(), vec!["a", "b"]);
        layer.select_icon("b", true);
        assert_eq!(layer.selected_ids(), vec!["a"]);
    }

    #[test]
    fn clear_selection_resets_all() {
        let mut layer = layer_abc();
        layer.select_icon("a", false);
        layer.select_icon("c", true);
        layer.clear_selection();
        assert!(layer.selected_ids().is_empty());
    }

    #[test]
    fn move_and_remove_unknown_ids_are_noops() {
        let mut layer = layer_abc();
        layer.move_icon("ghost", Point::new(9, 9));
        layer.remove_icon("ghost");
        assert_eq!(layer.icons().len(), 3);
    }

    #[test]
    fn move_icon_updates_position() {
        let mut layer = layer_abc();
        layer.move_icon("b", Point::new(12, 4));
        assert_eq!(layer.get("b").unwrap().position, Point::new(12, 4));
    }
}
