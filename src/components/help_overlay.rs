//! Centered help overlay fed by the markdown embedded at build time.

use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::theme;
use crate::ui::UiFrame;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/generated_help.rs"));
}

pub fn help_text() -> &'static str {
    std::str::from_utf8(generated::EMBEDDED_HELP.content).unwrap_or("help unavailable")
}

#[derive(Debug, Default)]
pub struct HelpOverlay {
    visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        if !self.visible {
            return;
        }
        let text = help_text();
        let content_width = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as u16;
        let width = (content_width + 4).min(area.width);
        let height = (text.lines().count() as u16 + 2).min(area.height);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        frame.fill(rect, " ", theme::menu_style());
        for (idx, line) in text.lines().enumerate() {
            let y = rect.y + 1 + idx as u16;
            if y + 1 >= rect.y + rect.height {
                break;
            }
            let style = if line.starts_with('#') {
                theme::menu_style().add_modifier(Modifier::BOLD)
            } else {
                theme::menu_style()
            };
            frame.set_string(rect.x + 2, y, line, style);
        }
    }
}
