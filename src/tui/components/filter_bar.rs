//! Filter bar widget: one "Label: Value" selector per filter

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    list::filters::{FilterBar, FilterValues},
    tui::ui::Styles,
};

pub fn filter_line(bar: &FilterBar, values: &FilterValues, focused: bool, styles: &Styles) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, definition) in bar.definitions.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let value = definition.label_for(bar.value_of(values, &definition.key));
        let style = if focused && idx == bar.focused {
            styles.selected()
        } else {
            styles.text()
        };
        spans.push(Span::styled(format!("{}: ", definition.label), styles.info()));
        spans.push(Span::styled(format!("◂ {} ▸", value), style));
    }

    if let Some(badge) = bar.badge(values) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[{} active]", badge),
            styles.warning().add_modifier(Modifier::BOLD),
        ));
    }
    if bar.show_clear_all(values) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("x: Clear all", styles.inactive()));
    }
    Line::from(spans)
}

pub fn render_filters(
    f: &mut Frame,
    area: Rect,
    bar: &FilterBar,
    values: &FilterValues,
    focused: bool,
    styles: &Styles,
) {
    let block = Block::default()
        .title("Filters")
        .borders(Borders::ALL)
        .border_style(styles.border(focused));
    let paragraph = Paragraph::new(filter_line(bar, values, focused, styles)).block(block);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list::filters::FilterDefinition, models::Theme};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_filter_line_badge_and_clear_all() {
        let bar = FilterBar::new(vec![
            FilterDefinition::new("status", "Status").with_option("active", "Active"),
            FilterDefinition::new("gender", "Gender").with_option("female", "Female"),
        ]);
        let styles = Styles::new(Theme::Dark);

        let mut values = FilterValues::new();
        let text = line_text(&filter_line(&bar, &values, false, &styles));
        assert_eq!(text, "Status: ◂ All ▸  Gender: ◂ All ▸");

        values.insert("status".to_string(), "active".to_string());
        let text = line_text(&filter_line(&bar, &values, false, &styles));
        assert!(text.contains("Status: ◂ Active ▸"));
        assert!(text.contains("[1 active]"));
        assert!(text.contains("x: Clear all"));
    }
}
