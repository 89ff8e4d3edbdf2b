//! Generic list page: search box, filter bar, data table and pagination

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    api::ApiError,
    config::ListConfig,
    entities::{
        Appointment, Doctor, InventoryItem, Invoice, ListEntity, MedicalRecord, Patient,
    },
    list::{
        controller::{Dialog, FetchOutcome, FetchTicket, ListController},
        filters::{FilterBar, FilterEvent},
        pagination::PaginationEvent,
        search::SearchInput,
        source::ListPage,
        table::DataTable,
    },
    models::EntityKind,
    tui::{
        components::{
            data_table::TableView,
            dialog::{render_details, render_dialog},
            filter_bar::render_filters,
            pagination_bar::render_pagination,
            search_input::render_search,
        },
        traits::{ListPane, ScreenAction},
        ui::Styles,
    },
};

/// Which part of the list page receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
    Filters,
}

/// Field/value pairs of an activated row
#[derive(Debug, Clone)]
struct RowDetails {
    title: String,
    fields: Vec<(String, String)>,
}

pub struct ListScreen<R: ListEntity> {
    instance: Uuid,
    controller: ListController<R>,
    table: DataTable<R>,
    filter_bar: FilterBar,
    search: SearchInput,
    focus: Focus,
    details: Option<RowDetails>,
}

impl<R: ListEntity> ListScreen<R> {
    pub fn new(page_size: u32, debounce: Duration) -> Self {
        let mut table = DataTable::new(R::columns()).with_empty_message(R::empty_message());
        if R::has_details() {
            table = table.with_row_activation();
        }

        Self {
            instance: Uuid::new_v4(),
            controller: ListController::new(page_size),
            table,
            filter_bar: FilterBar::new(R::filters()),
            search: SearchInput::new(debounce),
            focus: Focus::Table,
            details: None,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn controller(&self) -> &ListController<R> {
        &self.controller
    }

    fn fetch(ticket: Option<FetchTicket>) -> Vec<ScreenAction> {
        ticket.map(ScreenAction::Fetch).into_iter().collect()
    }

    fn search_changed(&mut self, emitted: Option<String>) -> Vec<ScreenAction> {
        let ticket = emitted.and_then(|text| self.controller.on_search(&text));
        self.search.sync(&self.controller.query().search_text);
        Self::fetch(ticket)
    }

    fn filter_changed(&mut self, event: Option<FilterEvent>) -> Vec<ScreenAction> {
        Self::fetch(event.and_then(|e| self.controller.on_filter(e)))
    }

    fn page_changed(&mut self, event: Option<PaginationEvent>) -> Vec<ScreenAction> {
        Self::fetch(event.and_then(|e| self.controller.on_pagination(e)))
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) -> Vec<ScreenAction> {
        let pending = match self.controller.dialog() {
            Some(Dialog::ConfirmDelete { name, verb, .. }) => Some((name.clone(), *verb)),
            _ => None,
        };

        match (pending, key.code) {
            (Some((name, verb)), KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter) => {
                match self.controller.confirm_delete() {
                    Some(ticket) => vec![
                        ScreenAction::SetStatus(format!("{} {}...", verb, name)),
                        ScreenAction::Delete(ticket),
                    ],
                    None => Vec::new(),
                }
            }
            (Some(_), KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc) => {
                self.controller.cancel_delete();
                Vec::new()
            }
            (None, KeyCode::Enter | KeyCode::Esc) => {
                self.controller.dismiss_dialog();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) -> Vec<ScreenAction> {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let emitted = self.search.clear();
                self.search_changed(emitted)
            }
            KeyCode::Char(c) => {
                self.search.insert_char(c, now);
                Vec::new()
            }
            KeyCode::Backspace => {
                self.search.delete_char(now);
                Vec::new()
            }
            KeyCode::Left => {
                self.search.move_cursor_left();
                Vec::new()
            }
            KeyCode::Right => {
                self.search.move_cursor_right();
                Vec::new()
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                self.focus = Focus::Table;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Vec<ScreenAction> {
        let values = &self.controller.query().filters;
        match key.code {
            KeyCode::Left | KeyCode::BackTab => {
                self.filter_bar.focus_previous();
                Vec::new()
            }
            KeyCode::Right | KeyCode::Tab => {
                self.filter_bar.focus_next();
                Vec::new()
            }
            KeyCode::Up => {
                let event = self.filter_bar.cycle_focused(values, -1);
                self.filter_changed(event)
            }
            KeyCode::Down | KeyCode::Enter | KeyCode::Char(' ') => {
                let event = self.filter_bar.cycle_focused(values, 1);
                self.filter_changed(event)
            }
            KeyCode::Char('x') => {
                let event = self.filter_bar.clear_all(values);
                self.filter_changed(event)
            }
            KeyCode::Esc | KeyCode::Char('f') => {
                self.focus = Focus::Table;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Vec<ScreenAction> {
        let row_count = self.controller.rows().len();
        let pagination = self.controller.pagination();

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.table.select_previous(row_count);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.table.select_next(row_count);
                Vec::new()
            }
            KeyCode::Left | KeyCode::Char('[') => {
                self.table.header_left();
                Vec::new()
            }
            KeyCode::Right | KeyCode::Char(']') => {
                self.table.header_right();
                Vec::new()
            }
            KeyCode::Char('s') => {
                let sort = self
                    .table
                    .click_header_at_cursor(self.controller.query().sort.as_ref());
                Self::fetch(sort.and_then(|s| self.controller.on_sort(s)))
            }
            KeyCode::Enter => {
                if let Some(row) = self.table.activate(self.controller.rows()) {
                    self.details = Some(RowDetails {
                        title: row.display_name(),
                        fields: self
                            .table
                            .columns
                            .iter()
                            .map(|column| (column.label.clone(), column.render(row).plain()))
                            .collect(),
                    });
                }
                Vec::new()
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(row) = self.table.selected_row(self.controller.rows()).cloned() {
                    self.controller.request_delete(&row);
                }
                Vec::new()
            }
            KeyCode::Char('n') | KeyCode::PageDown => self.page_changed(pagination.next()),
            KeyCode::Char('p') | KeyCode::PageUp => self.page_changed(pagination.previous()),
            KeyCode::Home => self.page_changed(pagination.select_page(1)),
            KeyCode::End => self.page_changed(pagination.last()),
            KeyCode::Char(c @ '1'..='9') => {
                let page = c.to_digit(10).unwrap_or(1);
                self.page_changed(pagination.select_page(page))
            }
            KeyCode::Char('+') => self.page_changed(Some(pagination.cycle_items_per_page())),
            KeyCode::Char('r') => vec![ScreenAction::Fetch(self.controller.refresh())],
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                Vec::new()
            }
            KeyCode::Char('f') if !self.filter_bar.is_empty() => {
                self.focus = Focus::Filters;
                Vec::new()
            }
            KeyCode::Char('x') => {
                let event = self.filter_bar.clear_all(&self.controller.query().filters);
                self.filter_changed(event)
            }
            KeyCode::Esc => vec![ScreenAction::NavigateBack],
            _ => Vec::new(),
        }
    }
}

impl<R: ListEntity> ListPane for ListScreen<R> {
    fn entity(&self) -> EntityKind {
        R::KIND
    }

    fn instance(&self) -> Uuid {
        self.instance
    }

    fn mount(&mut self) -> Vec<ScreenAction> {
        vec![ScreenAction::Fetch(self.controller.mount())]
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, styles: &Styles) {
        let mut constraints = vec![Constraint::Length(3)];
        if !self.filter_bar.is_empty() {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(3));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        render_search(f, chunks[0], &self.search, self.focus == Focus::Search, styles);

        let mut next = 1;
        if !self.filter_bar.is_empty() {
            render_filters(
                f,
                chunks[1],
                &self.filter_bar,
                &self.controller.query().filters,
                self.focus == Focus::Filters,
                styles,
            );
            next = 2;
        }

        let title = format!("{} ({})", R::KIND.title(), self.controller.total_items());
        TableView {
            table: &self.table,
            rows: self.controller.rows(),
            sort: self.controller.query().sort.as_ref(),
            loading: self.controller.is_loading(),
            focused: self.focus == Focus::Table,
            title: &title,
        }
        .render(f, chunks[next], styles);

        render_pagination(f, chunks[next + 1], &self.controller.pagination(), styles);

        if let Some(dialog) = self.controller.dialog() {
            render_dialog(f, area, dialog, styles);
        } else if let Some(details) = &self.details {
            render_details(f, area, &details.title, &details.fields, styles);
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Vec<ScreenAction> {
        if self.controller.dialog().is_some() {
            return self.handle_dialog_key(key);
        }
        if self.details.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.details = None;
            }
            return Vec::new();
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key, now),
            Focus::Filters => self.handle_filter_key(key),
            Focus::Table => self.handle_table_key(key),
        }
    }

    fn tick(&mut self, now: Instant) -> Vec<ScreenAction> {
        let emitted = self.search.poll(now);
        self.search_changed(emitted)
    }

    fn on_fetch_result(&mut self, seq: u64, result: Result<ListPage, ApiError>) -> Vec<ScreenAction> {
        match self.controller.apply_fetch(seq, result) {
            FetchOutcome::Stale => Vec::new(),
            FetchOutcome::Updated => {
                self.table.reset_selection(self.controller.rows().len());
                Vec::new()
            }
            FetchOutcome::Failed => {
                self.table.reset_selection(0);
                let message = self.controller.last_error().unwrap_or("Request failed");
                vec![ScreenAction::SetError(message.to_string())]
            }
            FetchOutcome::Clamped(ticket) => {
                debug!("{} page clamped to {}", R::KIND, self.controller.query().page);
                vec![ScreenAction::Fetch(ticket)]
            }
        }
    }

    fn on_delete_result(&mut self, id: &str, result: Result<(), ApiError>) -> Vec<ScreenAction> {
        match self.controller.apply_delete(id, result) {
            Some(ticket) => vec![
                ScreenAction::SetStatus(format!("{} completed", R::KIND.delete_verb())),
                ScreenAction::Fetch(ticket),
            ],
            None => Vec::new(),
        }
    }

    fn captures_text_input(&self) -> bool {
        self.focus == Focus::Search
    }
}

/// Build a freshly mounted list screen for `kind`
pub fn list_screen(kind: EntityKind, list: &ListConfig) -> Box<dyn ListPane> {
    let debounce = Duration::from_millis(list.search_debounce_ms);
    match kind {
        EntityKind::Patients => Box::new(ListScreen::<Patient>::new(list.page_size, debounce)),
        EntityKind::Doctors => Box::new(ListScreen::<Doctor>::new(list.page_size, debounce)),
        EntityKind::Appointments => {
            Box::new(ListScreen::<Appointment>::new(list.page_size, debounce))
        }
        EntityKind::Billing => Box::new(ListScreen::<Invoice>::new(list.page_size, debounce)),
        EntityKind::Inventory => {
            Box::new(ListScreen::<InventoryItem>::new(list.page_size, debounce))
        }
        EntityKind::Records => {
            Box::new(ListScreen::<MedicalRecord>::new(list.page_size, debounce))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn fetch_ticket(actions: &[ScreenAction]) -> Option<&FetchTicket> {
        actions.iter().find_map(|a| match a {
            ScreenAction::Fetch(ticket) => Some(ticket),
            _ => None,
        })
    }

    fn param<'a>(ticket: &'a FetchTicket, key: &str) -> Option<&'a str> {
        ticket
            .params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn patients(count: usize, total: u64) -> ListPage {
        ListPage {
            rows: (0..count)
                .map(|i| {
                    json!({ "id": i + 1, "firstName": "Ana", "lastName": format!("Diaz{}", i), "status": "active" })
                })
                .collect(),
            total,
        }
    }

    fn mounted() -> (ListScreen<Patient>, u64) {
        let mut screen = ListScreen::<Patient>::new(10, DEBOUNCE);
        let actions = screen.mount();
        let seq = fetch_ticket(&actions).unwrap().seq;
        (screen, seq)
    }

    #[test]
    fn test_mount_issues_one_fetch() {
        let mut screen = ListScreen::<Patient>::new(25, DEBOUNCE);
        let actions = screen.mount();
        assert_eq!(actions.len(), 1);
        let ticket = fetch_ticket(&actions).unwrap();
        assert_eq!(ticket.entity, EntityKind::Patients);
        assert_eq!(param(ticket, "page"), Some("1"));
        assert_eq!(param(ticket, "limit"), Some("25"));
        assert_eq!(param(ticket, "search"), Some(""));
    }

    #[test]
    fn test_typing_is_debounced_into_one_fetch() {
        let (mut screen, _) = mounted();
        let start = Instant::now();

        screen.handle_key_event(key(KeyCode::Char('/')), start);
        assert_eq!(screen.focus(), Focus::Search);
        assert!(screen.captures_text_input());
        for (i, c) in "ana".chars().enumerate() {
            let at = start + Duration::from_millis(100 * i as u64);
            assert!(screen.handle_key_event(key(KeyCode::Char(c)), at).is_empty());
        }

        assert!(screen.tick(start + Duration::from_millis(400)).is_empty());
        let actions = screen.tick(start + Duration::from_millis(600));
        let ticket = fetch_ticket(&actions).unwrap();
        assert_eq!(param(ticket, "search"), Some("ana"));
        assert!(screen.tick(start + Duration::from_millis(1200)).is_empty());
    }

    #[test]
    fn test_clearing_search_fetches_immediately() {
        let (mut screen, _) = mounted();
        let now = Instant::now();
        screen.handle_key_event(key(KeyCode::Char('/')), now);
        screen.handle_key_event(key(KeyCode::Char('x')), now);
        screen.tick(now + Duration::from_secs(1));

        let clear = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        let actions = screen.handle_key_event(clear, now + Duration::from_secs(2));
        assert_eq!(param(fetch_ticket(&actions).unwrap(), "search"), Some(""));
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let (mut screen, first) = mounted();
        let refresh = screen.handle_key_event(key(KeyCode::Char('r')), Instant::now());
        let second = fetch_ticket(&refresh).unwrap().seq;

        assert!(screen.on_fetch_result(first, Ok(patients(3, 3))).is_empty());
        assert!(screen.controller().rows().is_empty());

        screen.on_fetch_result(second, Ok(patients(2, 2)));
        assert_eq!(screen.controller().rows().len(), 2);
    }

    #[test]
    fn test_fetch_failure_reports_error() {
        let (mut screen, seq) = mounted();
        let error = ApiError::Status {
            status: 503,
            message: "maintenance".to_string(),
        };
        let actions = screen.on_fetch_result(seq, Err(error));
        assert_eq!(
            actions,
            vec![ScreenAction::SetError("maintenance (status 503)".to_string())]
        );
        assert!(screen.controller().rows().is_empty());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let (mut screen, seq) = mounted();
        screen.on_fetch_result(seq, Ok(patients(2, 2)));
        let now = Instant::now();

        screen.handle_key_event(key(KeyCode::Char('d')), now);
        assert!(screen.controller().dialog().is_some());
        assert!(screen.handle_key_event(key(KeyCode::Char('n')), now).is_empty());
        assert!(screen.controller().dialog().is_none());

        screen.handle_key_event(key(KeyCode::Char('d')), now);
        let actions = screen.handle_key_event(key(KeyCode::Char('y')), now);
        let delete = actions.iter().find_map(|a| match a {
            ScreenAction::Delete(ticket) => Some(ticket.clone()),
            _ => None,
        });
        assert_eq!(delete.map(|t| t.id), Some("1".to_string()));

        let actions = screen.on_delete_result("1", Ok(()));
        assert!(fetch_ticket(&actions).is_some());
    }

    #[test]
    fn test_enter_opens_details_except_inventory() {
        let (mut screen, seq) = mounted();
        screen.on_fetch_result(seq, Ok(patients(1, 1)));
        screen.handle_key_event(key(KeyCode::Enter), Instant::now());
        assert!(screen.details.is_some());
        screen.handle_key_event(key(KeyCode::Esc), Instant::now());
        assert!(screen.details.is_none());

        let mut inventory = ListScreen::<InventoryItem>::new(10, DEBOUNCE);
        let seq = fetch_ticket(&inventory.mount()).unwrap().seq;
        let page = ListPage {
            rows: vec![json!({ "id": "g1", "name": "Gloves", "quantity": 4, "status": "low-stock" })],
            total: 1,
        };
        inventory.on_fetch_result(seq, Ok(page));
        inventory.handle_key_event(key(KeyCode::Enter), Instant::now());
        assert!(inventory.details.is_none());
    }

    #[test]
    fn test_sort_and_page_keys() {
        let (mut screen, seq) = mounted();
        screen.on_fetch_result(seq, Ok(patients(10, 47)));
        let now = Instant::now();

        let actions = screen.handle_key_event(key(KeyCode::Char('3')), now);
        assert_eq!(param(fetch_ticket(&actions).unwrap(), "page"), Some("3"));

        let actions = screen.handle_key_event(key(KeyCode::Char('s')), now);
        let ticket = fetch_ticket(&actions).unwrap();
        assert_eq!(param(ticket, "sortOrder"), Some("asc"));
        assert_eq!(param(ticket, "page"), Some("3"));

        let actions = screen.handle_key_event(key(KeyCode::Char('+')), now);
        let ticket = fetch_ticket(&actions).unwrap();
        assert_eq!(param(ticket, "limit"), Some("25"));
        assert_eq!(param(ticket, "page"), Some("1"));
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let (mut screen, _) = mounted();
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Esc), Instant::now()),
            vec![ScreenAction::NavigateBack]
        );
    }

    #[test]
    fn test_draw_shows_loading_until_first_result() {
        let (mut screen, seq) = mounted();
        let styles = Styles::new(Theme::Dark);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        let render = |screen: &mut ListScreen<Patient>, terminal: &mut Terminal<TestBackend>| {
            terminal
                .draw(|f| {
                    let area = f.size();
                    screen.draw(f, area, &styles)
                })
                .unwrap();
            let buffer = terminal.backend().buffer();
            let mut text = String::new();
            for y in 0..buffer.area.height {
                for x in 0..buffer.area.width {
                    text.push_str(buffer.get(x, y).symbol());
                }
            }
            text
        };

        assert!(render(&mut screen, &mut terminal).contains("Loading..."));

        screen.on_fetch_result(seq, Ok(patients(0, 0)));
        let text = render(&mut screen, &mut terminal);
        assert_eq!(text.matches(Patient::empty_message()).count(), 1);
        assert!(text.contains("No results"));
    }
}
