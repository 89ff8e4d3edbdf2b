//! Data table widget: sortable headers, status badges, loading and empty states

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::{
    list::table::{CellValue, DataTable, SortState, TableBody},
    tui::{components::status_badge::status_span, ui::Styles},
};

pub const LOADING_TEXT: &str = "⟳ Loading...";

/// Everything needed to draw one table frame
pub struct TableView<'a, R> {
    pub table: &'a DataTable<R>,
    pub rows: &'a [R],
    pub sort: Option<&'a SortState>,
    pub loading: bool,
    pub focused: bool,
    pub title: &'a str,
}

impl<'a, R> TableView<'a, R> {
    pub fn render(&self, f: &mut Frame, area: Rect, styles: &Styles) {
        let block = Block::default()
            .title(self.title.to_string())
            .borders(Borders::ALL)
            .border_style(styles.border(self.focused));
        let inner = block.inner(area);
        f.render_widget(block, area);

        match self.table.body(self.loading, self.rows.len()) {
            TableBody::Loading => {
                let spinner = Paragraph::new(LOADING_TEXT)
                    .style(styles.warning())
                    .alignment(Alignment::Center);
                f.render_widget(spinner, centered_line(inner));
            }
            TableBody::Empty => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(2), Constraint::Min(0)])
                    .split(inner);
                let header_only = Table::new(Vec::<Row>::new(), self.widths())
                    .header(self.header(styles));
                f.render_widget(header_only, chunks[0]);

                let message = Paragraph::new(self.table.empty_message.clone())
                    .style(styles.inactive())
                    .alignment(Alignment::Center);
                f.render_widget(message, centered_line(chunks[1]));
            }
            TableBody::Rows => {
                let rows: Vec<Row> = self
                    .rows
                    .iter()
                    .map(|row| {
                        Row::new(
                            self.table
                                .render_row(row)
                                .into_iter()
                                .map(|value| cell(value, styles)),
                        )
                    })
                    .collect();

                let table = Table::new(rows, self.widths())
                    .header(self.header(styles))
                    .highlight_style(styles.selected())
                    .highlight_symbol("▶ ");

                let mut state = TableState::default();
                state.select(self.table.selected());
                f.render_stateful_widget(table, inner, &mut state);
            }
        }
    }

    fn widths(&self) -> Vec<Constraint> {
        let count = self.table.columns.len().max(1) as u32;
        self.table
            .columns
            .iter()
            .map(|_| Constraint::Ratio(1, count))
            .collect()
    }

    fn header(&self, styles: &Styles) -> Row<'static> {
        let cells = self.table.columns.iter().enumerate().map(|(idx, column)| {
            let label = match self.table.indicator(idx, self.sort) {
                Some(indicator) => format!("{} {}", column.label, indicator),
                None => column.label.clone(),
            };
            let mut style = styles.header();
            if self.focused && idx == self.table.header_cursor() {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            Cell::from(label).style(style)
        });
        Row::new(cells).bottom_margin(1)
    }
}

fn cell(value: CellValue, styles: &Styles) -> Cell<'static> {
    match value {
        CellValue::Text(text) => Cell::from(text),
        CellValue::Status(status) => Cell::from(Line::from(status_span(&status))),
        CellValue::Empty => Cell::from("-").style(styles.inactive()),
    }
}

/// One-line rect in the vertical middle of `area`
fn centered_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}
