//! Shared styles and layout helpers for the TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::Theme;

/// Styles for the active theme
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    theme: Theme,
}

impl Styles {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn text(&self) -> Style {
        match self.theme {
            Theme::Dark => Style::default().fg(Color::White),
            Theme::Light => Style::default().fg(Color::Black),
        }
    }

    pub fn selected(&self) -> Style {
        match self.theme {
            Theme::Dark => Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            Theme::Light => Style::default()
                .bg(Color::LightBlue)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn title(&self) -> Style {
        let color = match self.theme {
            Theme::Dark => Color::Yellow,
            Theme::Light => Color::Blue,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn header(&self) -> Style {
        self.text().add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn warning(&self) -> Style {
        match self.theme {
            Theme::Dark => Style::default().fg(Color::Yellow),
            Theme::Light => Style::default().fg(Color::Rgb(180, 110, 0)),
        }
    }

    pub fn info(&self) -> Style {
        match self.theme {
            Theme::Dark => Style::default().fg(Color::Cyan),
            Theme::Light => Style::default().fg(Color::Blue),
        }
    }

    pub fn inactive(&self) -> Style {
        match self.theme {
            Theme::Dark => Style::default().fg(Color::Gray),
            Theme::Light => Style::default().fg(Color::DarkGray),
        }
    }

    pub fn active_border(&self) -> Style {
        self.title().remove_modifier(Modifier::BOLD)
    }

    pub fn inactive_border(&self) -> Style {
        self.inactive()
    }

    /// Border style for a pane depending on focus
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.active_border()
        } else {
            self.inactive_border()
        }
    }
}

/// Helper to create a centered rect using up certain percentage of the available rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Truncate a string to a display width, marking the cut with "..."
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width - 3 {
            break;
        }
        result.push(c);
        width += char_width;
    }
    result.push_str("...");
    result
}
