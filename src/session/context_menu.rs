//! Context menu controller: at most one menu, anchored where it was opened.
//!
//! Menu items form a tagged tree — separator, leaf action, or submenu —
//! exhaustively matched wherever items are rendered or traversed. Leaf
//! actions carry a [`SessionCommand`] instead of a callback so the menu is
//! plain data and dispatch stays in one place.

use super::Point;
use super::store::SessionCommand;

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub label: String,
    pub glyph: Option<String>,
    pub shortcut: Option<String>,
    pub disabled: bool,
    pub command: Option<SessionCommand>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    Separator,
    Action(MenuEntry),
    Submenu { label: String, items: Vec<MenuItem> },
}

impl MenuItem {
    pub fn action(label: impl Into<String>, command: SessionCommand) -> Self {
        Self::Action(MenuEntry {
            label: label.into(),
            glyph: None,
            shortcut: None,
            disabled: false,
            command: Some(command),
        })
    }

    pub fn disabled(label: impl Into<String>) -> Self {
        Self::Action(MenuEntry {
            label: label.into(),
            glyph: None,
            shortcut: None,
            disabled: true,
            command: None,
        })
    }

    pub fn submenu(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self::Submenu {
            label: label.into(),
            items,
        }
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        if let Self::Action(entry) = &mut self {
            entry.shortcut = Some(shortcut.into());
        }
        self
    }

    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        if let Self::Action(entry) = &mut self {
            entry.glyph = Some(glyph.into());
        }
        self
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Separator => "",
            Self::Action(entry) => &entry.label,
            Self::Submenu { label, .. } => label,
        }
    }

    /// True for rows the selection cursor may land on.
    pub fn selectable(&self) -> bool {
        match self {
            Self::Separator => false,
            Self::Action(entry) => !entry.disabled,
            Self::Submenu { .. } => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    pub anchor: Point,
    pub items: Vec<MenuItem>,
}

impl ContextMenu {
    pub fn new(anchor: Point, items: Vec<MenuItem>) -> Self {
        Self { anchor, items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_and_disabled_are_not_selectable() {
        assert!(!MenuItem::Separator.selectable());
        assert!(!MenuItem::disabled("grayed").selectable());
        assert!(MenuItem::action("go", SessionCommand::CloseContextMenu).selectable());
        assert!(MenuItem::submenu("more", vec![]).selectable());
    }

    #[test]
    fn builders_attach_decorations_to_actions_only() {
        let item = MenuItem::action("open", SessionCommand::CloseContextMenu)
            .with_shortcut("Ctrl-O")
            .with_glyph("▸");
        match item {
            MenuItem::Action(entry) => {
                assert_eq!(entry.shortcut.as_deref(), Some("Ctrl-O"));
                assert_eq!(entry.glyph.as_deref(), Some("▸"));
            }
            other => panic!("expected action, got {other:?}"),
        }
        // decorating a separator is a no-op, not a panic
        let sep = MenuItem::Separator.with_shortcut("x");
        assert_eq!(sep, MenuItem::Separator);
    }
}
