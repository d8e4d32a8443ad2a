//! Dock registry: the ordered strip of launchable applications.
//!
//! The dock is also the record store `open_window` consults to decide
//! whether a launch should navigate externally or gate on a subscription.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockPosition {
    #[default]
    Bottom,
    Left,
    Right,
}

impl DockPosition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl FromStr for DockPosition {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(format!("unknown dock position: {other}")),
        }
    }
}

/// A launchable application record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockApp {
    pub id: String,
    pub name: String,
    /// Short glyph shown in the dock cell.
    pub glyph: String,
    /// Accent color for the dock cell and window chrome.
    pub color: (u8, u8, u8),
    /// Launch target. `"#"` is the placeholder for apps that open in-shell.
    pub url: String,
    pub requires_subscription: bool,
}

impl DockApp {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        glyph: impl Into<String>,
        color: (u8, u8, u8),
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            glyph: glyph.into(),
            color,
            url: "#".to_string(),
            requires_subscription: false,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_subscription(mut self) -> Self {
        self.requires_subscription = true;
        self
    }

    /// True when the record carries a real external launch target rather
    /// than the in-shell placeholder.
    pub fn has_external_url(&self) -> bool {
        !self.url.is_empty() && self.url != "#"
    }
}

#[derive(Debug)]
pub struct DockState {
    apps: Vec<DockApp>,
    visible: bool,
    position: DockPosition,
}

impl Default for DockState {
    fn default() -> Self {
        Self {
            apps: Vec::new(),
            visible: true,
            position: DockPosition::Bottom,
        }
    }
}

impl DockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apps(&self) -> &[DockApp] {
        &self.apps
    }

    pub fn app(&self, id: &str) -> Option<&DockApp> {
        self.apps.iter().find(|app| app.id == id)
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> DockPosition {
        self.position
    }

    /// Idempotent: a second add with the same id is ignored.
    pub fn add_app(&mut self, app: DockApp) {
        if self.apps.iter().any(|existing| existing.id == app.id) {
            return;
        }
        tracing::debug!(app_id = %app.id, "added app to dock");
        self.apps.push(app);
    }

    pub fn remove_app(&mut self, id: &str) {
        self.apps.retain(|app| app.id != id);
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    pub fn set_position(&mut self, position: DockPosition) {
        self.position = position;
    }
}

/// The built-in application catalog seeded into the dock at boot.
pub fn builtin_apps() -> Vec<DockApp> {
    vec![
        DockApp::new("bitcoin-wallet", "Bitcoin Wallet", "₿", (247, 147, 26)),
        DockApp::new("bitcoin-email", "Bitcoin Email", "✉", (239, 68, 68)),
        DockApp::new("bitcoin-writer", "Bitcoin Writer", "✎", (59, 130, 246)),
        DockApp::new("bitcoin-drive", "Bitcoin Drive", "◫", (34, 197, 94)),
        DockApp::new("bitcoin-music", "Bitcoin Music", "♫", (168, 85, 247)).with_subscription(),
        DockApp::new("bitcoin-jobs", "Bitcoin Jobs", "⚒", (234, 179, 8)),
        DockApp::new("bapps-store", "BAPPS Store", "▣", (20, 184, 166))
            .with_url("https://www.bitcoinapps.store"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_app_is_idempotent_by_id() {
        let mut dock = DockState::new();
        dock.add_app(DockApp::new("a", "A", "a", (0, 0, 0)));
        dock.add_app(DockApp::new("a", "A again", "x", (1, 1, 1)));
        assert_eq!(dock.apps().len(), 1);
        assert_eq!(dock.app("a").unwrap().name, "A");
    }

    #[test]
    fn remove_and_toggle() {
        let mut dock = DockState::new();
        dock.add_app(DockApp::new("a", "A", "a", (0, 0, 0)));
        dock.remove_app("a");
        assert!(dock.apps().is_empty());
        assert!(dock.visible());
        dock.toggle_visibility();
        assert!(!dock.visible());
    }

    #[test]
    fn placeholder_url_is_not_external() {
        let app = DockApp::new("a", "A", "a", (0, 0, 0));
        assert!(!app.has_external_url());
        assert!(app.with_url("https://example.com").has_external_url());
    }

    #[test]
    fn dock_position_round_trips_from_str() {
        for pos in [DockPosition::Bottom, DockPosition::Left, DockPosition::Right] {
            assert_eq!(pos.as_str().parse::<DockPosition>().unwrap(), pos);
        }
        assert!("top".parse::<DockPosition>().is_err());
    }

    #[test]
    fn builtin_catalog_has_unique_ids() {
        let apps = builtin_apps();
        for (i, app) in apps.iter().enumerate() {
            assert!(apps.iter().skip(i + 1).all(|other| other.id != app.id));
        }
    }
}
