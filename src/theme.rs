use ratatui::style::{Color, Modifier, Style};

use crate::session::Severity;

// Centralized theme colors. RGB values are mapped down to indexed colors
// when the terminal does not advertise truecolor support.

pub const BITCOIN_ORANGE_RGB: (u8, u8, u8) = (247, 147, 26);
pub const DESKTOP_BG_RGB: (u8, u8, u8) = (24, 28, 38);

/// Map an RGB triple to a `Color` appropriate for the current terminal.
/// Truecolor (`COLORTERM` mentioning `truecolor`/`24bit`) passes through;
/// anything else gets the nearest xterm-256 cube index.
pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    let (r, g, b) = rgb;
    if let Ok(var) = std::env::var("COLORTERM") {
        let lv = var.to_lowercase();
        if lv.contains("truecolor") || lv.contains("24bit") {
            return Color::Rgb(r, g, b);
        }
    }
    Color::Indexed(rgb_to_xterm_index(r, g, b))
}

fn rgb_to_xterm_index(r: u8, g: u8, b: u8) -> u8 {
    // nearest point in the 6x6x6 cube (indices 16..231)
    let scale = |v: u8| ((v as u16 * 5 + 127) / 255) as u8;
    16 + 36 * scale(r) + 6 * scale(g) + scale(b)
}

pub fn accent() -> Color {
    rgb_to_color(BITCOIN_ORANGE_RGB)
}

pub fn desktop_bg() -> Color {
    rgb_to_color(DESKTOP_BG_RGB)
}

// Menu bar / taskbar
pub fn menu_bar_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn apps_menu_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn apps_menu_selected_style() -> Style {
    Style::default().bg(Color::Gray).fg(Color::Black)
}

// Window chrome
pub fn header_focused_style() -> Style {
    Style::default()
        .bg(accent())
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

pub fn header_unfocused_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn window_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(accent())
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn window_body_style() -> Style {
    Style::default().bg(Color::Black).fg(Color::Gray)
}

// Desktop
pub fn wallpaper_style() -> Style {
    Style::default().bg(desktop_bg()).fg(Color::DarkGray)
}

pub fn icon_style(selected: bool) -> Style {
    if selected {
        Style::default().bg(accent()).fg(Color::Black)
    } else {
        Style::default().bg(desktop_bg()).fg(Color::White)
    }
}

// Dock
pub fn dock_style() -> Style {
    Style::default().bg(Color::Black).fg(Color::White)
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

// Context menu
pub fn menu_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn menu_selected_style() -> Style {
    Style::default().bg(Color::Gray).fg(Color::Black)
}

pub fn menu_disabled_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::Gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_returns_a_color_variant() {
        match accent() {
            Color::Rgb(_, _, _) | Color::Indexed(_) => {}
            other => panic!("unexpected color variant: {other:?}"),
        }
    }

    #[test]
    fn cube_index_stays_in_cube_range() {
        for rgb in [(0, 0, 0), (255, 255, 255), (247, 147, 26)] {
            let idx = rgb_to_xterm_index(rgb.0, rgb.1, rgb.2);
            assert!((16..=231).contains(&idx));
        }
    }

    #[test]
    fn severity_colors_are_distinct() {
        let colors = [
            severity_color(Severity::Info),
            severity_color(Severity::Success),
            severity_color(Severity::Warning),
            severity_color(Severity::Error),
        ];
        for (i, color) in colors.iter().enumerate() {
            assert!(colors.iter().skip(i + 1).all(|other| other != color));
        }
    }
}
