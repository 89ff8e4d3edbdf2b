//! Generic table model: typed columns, single-column sort and row selection

use std::fmt;

/// Sort direction of the active sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("Unsupported sort order: {}. Use asc or desc", other)),
        }
    }
}

/// The one column the list is sorted by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: &str, direction: SortDirection) -> Self {
        Self {
            key: key.to_string(),
            direction,
        }
    }
}

/// Next sort after clicking the header of `key`: the active column flips,
/// any other column becomes active ascending.
pub fn toggle_sort(current: Option<&SortState>, key: &str) -> SortState {
    match current {
        Some(sort) if sort.key == key => SortState::new(key, sort.direction.flipped()),
        _ => SortState::new(key, SortDirection::Asc),
    }
}

/// Displayable value produced by a column for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    /// Rendered through the status presentation
    Status(String),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn status(value: impl Into<String>) -> Self {
        CellValue::Status(value.into())
    }

    /// Text for an optional value, empty when absent or blank
    pub fn optional<T: fmt::Display>(value: Option<T>) -> Self {
        match value {
            Some(v) => {
                let text = v.to_string();
                if text.trim().is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(text)
                }
            }
            None => CellValue::Empty,
        }
    }

    /// Plain text used by the CLI and the detail popup
    pub fn plain(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Status(status) => crate::list::status::present_status(status).label,
            CellValue::Empty => "-".to_string(),
        }
    }
}

/// Column definition parameterized over the row type
pub struct Column<R> {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    render: Box<dyn Fn(&R) -> CellValue + Send + Sync>,
}

impl<R> Column<R> {
    pub fn new<F>(key: &str, label: &str, render: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
            render: Box::new(render),
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn render(&self, row: &R) -> CellValue {
        (self.render)(row)
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .finish()
    }
}

/// What the table body shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableBody {
    Loading,
    Empty,
    Rows,
}

/// Table state: columns, header cursor and selected row
pub struct DataTable<R> {
    pub columns: Vec<Column<R>>,
    pub empty_message: String,
    /// Rows are interactive only when the owner handles activation
    pub row_activation: bool,
    header_cursor: usize,
    selected: Option<usize>,
}

impl<R> DataTable<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            empty_message: "No data available".to_string(),
            row_activation: false,
            header_cursor: 0,
            selected: None,
        }
    }

    pub fn with_empty_message(mut self, message: &str) -> Self {
        self.empty_message = message.to_string();
        self
    }

    pub fn with_row_activation(mut self) -> Self {
        self.row_activation = true;
        self
    }

    pub fn body(&self, loading: bool, row_count: usize) -> TableBody {
        if loading {
            TableBody::Loading
        } else if row_count == 0 {
            TableBody::Empty
        } else {
            TableBody::Rows
        }
    }

    pub fn header_cursor(&self) -> usize {
        self.header_cursor
    }

    pub fn header_right(&mut self) {
        if !self.columns.is_empty() {
            self.header_cursor = (self.header_cursor + 1) % self.columns.len();
        }
    }

    pub fn header_left(&mut self) {
        if !self.columns.is_empty() {
            self.header_cursor = if self.header_cursor == 0 {
                self.columns.len() - 1
            } else {
                self.header_cursor - 1
            };
        }
    }

    /// Click on a header; unsortable columns never change the sort
    pub fn click_header(&self, index: usize, current: Option<&SortState>) -> Option<SortState> {
        let column = self.columns.get(index)?;
        column.sortable.then(|| toggle_sort(current, &column.key))
    }

    pub fn click_header_at_cursor(&self, current: Option<&SortState>) -> Option<SortState> {
        self.click_header(self.header_cursor, current)
    }

    /// Sort indicator for a column, only on the active sortable column
    pub fn indicator(&self, index: usize, current: Option<&SortState>) -> Option<&'static str> {
        let column = self.columns.get(index)?;
        match current {
            Some(sort) if column.sortable && sort.key == column.key => {
                Some(sort.direction.indicator())
            }
            _ => None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Keep the selection inside a freshly loaded row set
    pub fn reset_selection(&mut self, row_count: usize) {
        self.selected = match (self.selected, row_count) {
            (_, 0) => None,
            (Some(idx), n) if idx < n => Some(idx),
            _ => Some(0),
        };
    }

    pub fn select_next(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % row_count,
            None => 0,
        });
    }

    pub fn select_previous(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => row_count - 1,
            Some(i) => i - 1,
        });
    }

    pub fn selected_row<'a>(&self, rows: &'a [R]) -> Option<&'a R> {
        self.selected.and_then(|i| rows.get(i))
    }

    /// Row activation hands over the full row, or nothing for non-interactive tables
    pub fn activate<'a>(&self, rows: &'a [R]) -> Option<&'a R> {
        if self.row_activation {
            self.selected_row(rows)
        } else {
            None
        }
    }

    pub fn render_row(&self, row: &R) -> Vec<CellValue> {
        self.columns.iter().map(|column| column.render(row)).collect()
    }
}
