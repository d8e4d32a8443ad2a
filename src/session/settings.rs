//! Settings session: which preferences panel is open, if any.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsPanel {
    #[default]
    General,
    Appearance,
    Dock,
    Notifications,
    About,
}

impl SettingsPanel {
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Appearance,
        Self::Dock,
        Self::Notifications,
        Self::About,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Appearance => "appearance",
            Self::Dock => "dock",
            Self::Notifications => "notifications",
            Self::About => "about",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Appearance => "Appearance",
            Self::Dock => "Dock",
            Self::Notifications => "Notifications",
            Self::About => "About",
        }
    }
}

impl FromStr for SettingsPanel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|panel| panel.as_str() == value)
            .ok_or_else(|| format!("unknown settings panel: {value}"))
    }
}

#[derive(Debug, Default)]
pub struct SettingsSession {
    open: bool,
    active_panel: SettingsPanel,
}

impl SettingsSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active_panel(&self) -> SettingsPanel {
        self.active_panel
    }

    pub fn open(&mut self, panel: SettingsPanel) {
        self.open = true;
        self.active_panel = panel;
    }

    /// Closing preserves the panel selection for the next open.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn set_active_panel(&mut self, panel: SettingsPanel) {
        self.active_panel = panel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_preserves_panel_selection() {
        let mut settings = SettingsSession::new();
        settings.open(SettingsPanel::Dock);
        settings.close();
        assert!(!settings.is_open());
        assert_eq!(settings.active_panel(), SettingsPanel::Dock);
    }

    #[test]
    fn set_active_panel_does_not_open() {
        let mut settings = SettingsSession::new();
        settings.set_active_panel(SettingsPanel::About);
        assert!(!settings.is_open());
        assert_eq!(settings.active_panel(), SettingsPanel::About);
    }

    #[test]
    fn panel_ids_round_trip() {
        for panel in SettingsPanel::ALL {
            assert_eq!(panel.as_str().parse::<SettingsPanel>().unwrap(), panel);
        }
        assert!("network".parse::<SettingsPanel>().is_err());
    }
}
