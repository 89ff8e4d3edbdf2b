//! Search box widget

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{list::search::SearchInput, tui::ui::Styles};

pub const PLACEHOLDER: &str = "Search...";

pub fn render_search(f: &mut Frame, area: Rect, input: &SearchInput, focused: bool, styles: &Styles) {
    let title = if input.is_pending() {
        "Search (typing…)"
    } else {
        "Search"
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styles.border(focused));

    let paragraph = if input.value().is_empty() && !focused {
        Paragraph::new(PLACEHOLDER).style(styles.inactive())
    } else {
        Paragraph::new(input.value().to_string()).style(styles.text())
    };
    f.render_widget(paragraph.block(block), area);

    if focused {
        let before: String = input.value().chars().take(input.cursor_position()).collect();
        let cursor_x = area.x + 1 + before.width() as u16;
        if cursor_x < area.x + area.width.saturating_sub(1) {
            f.set_cursor(cursor_x, area.y + 1);
        }
    }
}
