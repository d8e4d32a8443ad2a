//! Shared crate-wide constants.

use std::time::Duration;

/// Top-left cell of the first opened window.
pub const CASCADE_ORIGIN_X: i32 = 6;
pub const CASCADE_ORIGIN_Y: i32 = 3;

/// Diagonal offset applied per already-open window, so successive windows
/// cascade instead of stacking exactly on top of one another.
pub const CASCADE_STEP_X: i32 = 3;
pub const CASCADE_STEP_Y: i32 = 1;

/// Default geometry (in cells) of a freshly opened window.
pub const DEFAULT_WINDOW_WIDTH: u16 = 56;
pub const DEFAULT_WINDOW_HEIGHT: u16 = 16;

/// Smallest size a resize drag may shrink a window to. The chrome needs
/// room for the header buttons and one content row.
pub const MIN_WINDOW_WIDTH: u16 = 16;
pub const MIN_WINDOW_HEIGHT: u16 = 4;

/// Cells kept between a clamped context menu and the viewport edge.
pub const CONTEXT_MENU_MARGIN: u16 = 1;

/// Column width of notification toasts.
pub const NOTIFICATION_WIDTH: u16 = 34;

/// Time-to-live applied to notifications the shell raises on its own
/// (launch gating, effect failures).
pub const NOTIFICATION_DEFAULT_TTL: Duration = Duration::from_secs(5);

/// Thickness in cells of the dock strip, including its border row.
pub const DOCK_THICKNESS: u16 = 3;

/// Height in cells of the top menu bar.
pub const MENU_BAR_HEIGHT: u16 = 1;
