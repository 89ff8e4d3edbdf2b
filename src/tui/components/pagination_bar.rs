//! Pagination bar widget

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    list::pagination::{PageItem, Pagination},
    tui::ui::Styles,
};

pub fn pagination_line(pagination: &Pagination, styles: &Styles) -> Line<'static> {
    let enabled = |on: bool| if on { styles.text() } else { styles.inactive() };

    let mut spans = vec![
        Span::styled("◀ Prev", enabled(pagination.can_go_previous())),
        Span::raw("  "),
    ];
    for item in pagination.window() {
        match item {
            PageItem::Page(page) if page == pagination.current_page => {
                spans.push(Span::styled(format!("[{}]", page), styles.selected()));
            }
            item => spans.push(Span::styled(item.to_string(), styles.text())),
        }
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled("Next ▶", enabled(pagination.can_go_next())));
    spans.push(Span::raw("   "));
    spans.push(Span::styled(pagination.range_label(), styles.info()));
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        format!("Per page: {}", pagination.items_per_page),
        styles.inactive(),
    ));
    Line::from(spans)
}

pub fn render_pagination(f: &mut Frame, area: Rect, pagination: &Pagination, styles: &Styles) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.inactive_border());
    let paragraph = Paragraph::new(pagination_line(pagination, styles))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, area);
}
