//! Status bar: transient messages on the left, session on the right

use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::ui::Styles;

/// Types of status messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Info,
    Success,
    Error,
}

/// Status message with type and content
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: DateTime<Local>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: Local::now(),
        }
    }
}

/// Status display component
#[derive(Debug, Clone, Default)]
pub struct StatusDisplay {
    current_message: Option<StatusMessage>,
    auto_clear_timeout: Option<Duration>,
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_clear(mut self, timeout: Duration) -> Self {
        self.auto_clear_timeout = Some(timeout);
        self
    }

    pub fn set_message(&mut self, message: StatusMessage) {
        self.current_message = Some(message);
    }

    pub fn set_info(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Info));
    }

    pub fn set_success(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Success));
    }

    pub fn set_error(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Error));
    }

    pub fn clear(&mut self) {
        self.current_message = None;
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    /// Drop the current message once it is older than the auto-clear timeout.
    /// Errors stay until replaced.
    pub fn expire(&mut self, now: DateTime<Local>) {
        let (Some(timeout), Some(message)) = (self.auto_clear_timeout, &self.current_message) else {
            return;
        };
        if message.status_type == StatusType::Error {
            return;
        }
        let elapsed = now.signed_duration_since(message.timestamp);
        if elapsed.to_std().unwrap_or_default() > timeout {
            self.current_message = None;
        }
    }

    /// Render the message with `fallback` when idle, and `session` right-aligned
    pub fn render(&self, f: &mut Frame, area: Rect, fallback: &str, session: &str, styles: &Styles) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles.inactive_border());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let session_width = (session.chars().count() as u16 + 1).min(inner.width / 2);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(session_width)])
            .split(inner);

        let (content, style) = match &self.current_message {
            Some(message) => (
                format_message(message),
                match message.status_type {
                    StatusType::Info => styles.info(),
                    StatusType::Success => styles.success(),
                    StatusType::Error => styles.error(),
                },
            ),
            None => (fallback.to_string(), styles.inactive()),
        };

        f.render_widget(Paragraph::new(content).style(style), chunks[0]);
        f.render_widget(
            Paragraph::new(session.to_string()).style(styles.info()),
            chunks[1],
        );
    }
}

fn format_message(message: &StatusMessage) -> String {
    let prefix = match message.status_type {
        StatusType::Info => "ℹ",
        StatusType::Success => "✓",
        StatusType::Error => "✗",
    };
    format!(
        "{} [{}] {}",
        prefix,
        message.timestamp.format("%H:%M:%S"),
        message.message
    )
}
