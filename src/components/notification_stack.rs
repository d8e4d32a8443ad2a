//! Notification toasts, stacked below the menu bar on the right edge.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::constants::NOTIFICATION_WIDTH;
use crate::session::{NotificationId, NotificationQueue, SessionCommand};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationHit {
    Dismiss(NotificationId),
    /// An action row; dispatch the command, then dismiss.
    Action(NotificationId, SessionCommand),
}

#[derive(Debug, Default)]
pub struct NotificationStack {
    targets: Vec<(Rect, NotificationHit)>,
}

impl NotificationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, queue: &NotificationQueue) {
        self.targets.clear();
        if queue.is_empty() || area.width < NOTIFICATION_WIDTH {
            return;
        }
        let x = area.x + area.width - NOTIFICATION_WIDTH - 1;
        let mut y = area.y + 1;

        // newest first
        for notification in queue.entries().iter().rev() {
            let action_rows = notification.actions.len() as u16;
            let height = 2 + action_rows;
            if y + height >= area.y + area.height {
                break;
            }
            let rect = Rect {
                x,
                y,
                width: NOTIFICATION_WIDTH,
                height,
            };
            let color = theme::severity_color(notification.severity);
            let style = Style::default().bg(color).fg(ratatui::style::Color::Black);
            frame.fill(rect, " ", style);
            frame.set_string(
                rect.x + 1,
                rect.y,
                &notification.title,
                style.add_modifier(Modifier::BOLD),
            );
            frame.set_string(
                rect.x + rect.width.saturating_sub(2),
                rect.y,
                "x",
                style.add_modifier(Modifier::BOLD),
            );
            frame.set_string(rect.x + 1, rect.y + 1, &notification.message, style);
            for (idx, action) in notification.actions.iter().enumerate() {
                let row_y = rect.y + 2 + idx as u16;
                let label = format!("[ {} ]", action.label);
                let row = Rect {
                    x: rect.x + 1,
                    y: row_y,
                    width: label.chars().count() as u16,
                    height: 1,
                };
                let action_style = if action.primary {
                    style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    style
                };
                frame.set_string(row.x, row_y, &label, action_style);
                self.targets.push((
                    row,
                    NotificationHit::Action(notification.id, action.command.clone()),
                ));
            }
            self.targets
                .push((rect, NotificationHit::Dismiss(notification.id)));
            y += height + 1;
        }
    }

    /// Action rows are registered before their containing toast, so they win
    /// the scan.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<&NotificationHit> {
        self.targets
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, hit)| hit)
    }
}
