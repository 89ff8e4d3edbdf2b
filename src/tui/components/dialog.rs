//! Modal popups: delete confirmation, errors and row details

use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    list::controller::Dialog,
    tui::ui::{centered_rect, Styles},
};

pub fn dialog_lines(dialog: &Dialog, styles: &Styles) -> (String, Vec<Line<'static>>) {
    match dialog {
        Dialog::ConfirmDelete { name, verb, .. } => (
            format!("{} {}", verb, name),
            vec![
                Line::from(format!("{} {}?", verb, name)),
                Line::from(""),
                Line::from(Span::styled(
                    "This cannot be undone.",
                    styles.warning(),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("y", styles.header()),
                    Span::raw(format!(": {}   ", verb)),
                    Span::styled("n", styles.header()),
                    Span::raw(": Keep"),
                ]),
            ],
        ),
        Dialog::Error { title, message } => (
            title.clone(),
            vec![
                Line::from(Span::styled(message.clone(), styles.error())),
                Line::from(""),
                Line::from(Span::styled("Enter/Esc to close", styles.inactive())),
            ],
        ),
    }
}

pub fn render_dialog(f: &mut Frame, area: Rect, dialog: &Dialog, styles: &Styles) {
    let (title, lines) = dialog_lines(dialog, styles);
    let border = match dialog {
        Dialog::ConfirmDelete { .. } => styles.warning(),
        Dialog::Error { .. } => styles.error(),
    };
    render_popup(f, centered_rect(50, 30, area), &title, lines, border);
}

/// Field/value popup for an activated row
pub fn render_details(
    f: &mut Frame,
    area: Rect,
    title: &str,
    fields: &[(String, String)],
    styles: &Styles,
) {
    let label_width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut lines: Vec<Line> = fields
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", label, width = label_width),
                    styles.info().add_modifier(Modifier::BOLD),
                ),
                Span::styled(value.clone(), styles.text()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Enter/Esc to close", styles.inactive())));

    render_popup(f, centered_rect(60, 60, area), title, lines, styles.active_border());
}

fn render_popup(
    f: &mut Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    border: ratatui::style::Style,
) {
    let block = Block::default()
        .title(title.to_string())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(border);
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;

    #[test]
    fn test_confirm_dialog_uses_verb() {
        let dialog = Dialog::ConfirmDelete {
            id: "7".to_string(),
            name: "appointment for Ana Diaz".to_string(),
            verb: "Cancel",
        };
        let (title, lines) = dialog_lines(&dialog, &Styles::new(Theme::Dark));
        assert_eq!(title, "Cancel appointment for Ana Diaz");
        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(first, "Cancel appointment for Ana Diaz?");
    }
}
