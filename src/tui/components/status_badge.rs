//! Colored status badges

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::list::status::{present_status, StatusColor};

pub fn badge_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Green => Color::Green,
        StatusColor::Yellow => Color::Yellow,
        StatusColor::Orange => Color::Rgb(255, 165, 0),
        StatusColor::Red => Color::Red,
        StatusColor::Blue => Color::LightBlue,
        StatusColor::Purple => Color::Magenta,
        StatusColor::Gray => Color::Gray,
    }
}

/// "✓ Active" styled with the status color
pub fn status_span(status: &str) -> Span<'static> {
    let presentation = present_status(status);
    Span::styled(
        format!("{} {}", presentation.icon.glyph(), presentation.label),
        Style::default()
            .fg(badge_color(presentation.color))
            .add_modifier(Modifier::BOLD),
    )
}
