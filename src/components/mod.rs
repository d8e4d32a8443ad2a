//! Shell components: each renders one desktop surface and remembers the
//! rectangles it drew, so the runner can hit-test pointer events against
//! the same frame the user saw.

pub mod context_menu;
pub mod desktop_surface;
pub mod dock_bar;
pub mod help_overlay;
pub mod menu_bar;
pub mod notification_stack;
pub mod settings_panel;
pub mod window_chrome;

pub use context_menu::{ContextMenuView, MenuHit, clamp_menu_anchor, menu_extent};
pub use desktop_surface::DesktopSurface;
pub use dock_bar::DockBar;
pub use help_overlay::HelpOverlay;
pub use menu_bar::{MenuBar, MenuBarHit};
pub use notification_stack::{NotificationHit, NotificationStack};
pub use settings_panel::{SettingsHit, SettingsView};
pub use window_chrome::{WindowChrome, WindowHit, WindowHitKind};
