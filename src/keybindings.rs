use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    OpenHelp,
    CloseOverlay,
    // Focus navigation
    FocusNext,
    FocusPrev,
    // Focused-window operations
    MinimizeFocused,
    MaximizeFocused,
    CloseFocused,
    // Shell surfaces
    ToggleDock,
    OpenSettings,
    ClearNotifications,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::OpenHelp => "Toggle help",
            Action::CloseOverlay => "Close menu / overlay (Esc)",
            Action::FocusNext => "Focus next window (Tab)",
            Action::FocusPrev => "Focus previous window (BackTab)",
            Action::MinimizeFocused => "Minimize focused window",
            Action::MaximizeFocused => "Maximize / restore focused window",
            Action::CloseFocused => "Close focused window",
            Action::ToggleDock => "Toggle dock",
            Action::OpenSettings => "Open settings",
            Action::ClearNotifications => "Clear notifications",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift-Tab".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("-")
    }
}

#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(KeyCombo, Action)>,
}

impl Default for Keymap {
    fn default() -> Self {
        use KeyCode::*;
        let ctrl = KeyModifiers::CONTROL;
        let none = KeyModifiers::NONE;
        Self {
            bindings: vec![
                (KeyCombo::new(Char('q'), ctrl), Action::Quit),
                (KeyCombo::new(F(1), none), Action::OpenHelp),
                (KeyCombo::new(Esc, none), Action::CloseOverlay),
                (KeyCombo::new(Tab, none), Action::FocusNext),
                // terminals report Shift-Tab as BackTab with SHIFT set
                (KeyCombo::new(BackTab, KeyModifiers::SHIFT), Action::FocusPrev),
                (KeyCombo::new(BackTab, none), Action::FocusPrev),
                (KeyCombo::new(Char('m'), ctrl), Action::MinimizeFocused),
                (KeyCombo::new(Char('f'), ctrl), Action::MaximizeFocused),
                (KeyCombo::new(Char('w'), ctrl), Action::CloseFocused),
                (KeyCombo::new(Char('d'), ctrl), Action::ToggleDock),
                (KeyCombo::new(Char('s'), ctrl), Action::OpenSettings),
                (KeyCombo::new(Char('n'), ctrl), Action::ClearNotifications),
            ],
        }
    }
}

impl Keymap {
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(combo, _)| combo.matches(key))
            .map(|(_, action)| *action)
    }

    pub fn combo_for(&self, action: Action) -> Option<&KeyCombo> {
        self.bindings
            .iter()
            .find(|(_, bound)| *bound == action)
            .map(|(combo, _)| combo)
    }

    pub fn bindings(&self) -> &[(KeyCombo, Action)] {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keymap_resolves_quit() {
        let keymap = Keymap::default();
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(keymap.action_for(&key), Some(Action::Quit));
    }

    #[test]
    fn unbound_keys_resolve_to_none() {
        let keymap = Keymap::default();
        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(keymap.action_for(&key), None);
    }

    #[test]
    fn backtab_resolves_with_and_without_shift() {
        let keymap = Keymap::default();
        for mods in [KeyModifiers::SHIFT, KeyModifiers::NONE] {
            let key = KeyEvent::new(KeyCode::BackTab, mods);
            assert_eq!(keymap.action_for(&key), Some(Action::FocusPrev));
        }
    }

    #[test]
    fn combo_display_names_modifiers() {
        let combo = KeyCombo::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(combo.display(), "Ctrl-W");
    }
}
