//! Main TUI application state and event loop

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::{
    config::Config,
    context::AppContext,
    list::{
        controller::{DeleteTicket, FetchTicket},
        source::ListSource,
    },
    models::EntityKind,
    tui::{
        components::StatusDisplay,
        events::AppEvent,
        screens::{list_screen, HelpScreen, MainMenuScreen},
        traits::{ListPane, ScreenAction},
        ui::{centered_rect, Styles},
    },
};

/// Poll interval of the UI loop; also the debounce resolution
pub const TICK_RATE: Duration = Duration::from_millis(50);

/// Application screens
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    MainMenu,
    List(EntityKind),
    Help,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Application configuration
    pub config: Config,
    pub context: AppContext,
    styles: Styles,
    source: Arc<dyn ListSource>,

    // Screen states
    pub main_menu: MainMenuScreen,
    pub help: HelpScreen,
    /// Mounted list page, rebuilt on every navigation
    active_list: Option<Box<dyn ListPane>>,

    pub status: StatusDisplay,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Requests issued by the mounted list page
    in_flight: Vec<JoinHandle<()>>,

    pub should_quit: bool,
    pub show_help_popup: bool,
}

impl App {
    pub fn new(config: Config, context: AppContext, source: Arc<dyn ListSource>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            current_screen: Screen::MainMenu,
            styles: Styles::new(context.theme),
            config,
            context,
            source,
            main_menu: MainMenuScreen::new(),
            help: HelpScreen::new(),
            active_list: None,
            status: StatusDisplay::new().with_auto_clear(Duration::from_secs(5)),
            events_tx,
            events_rx,
            in_flight: Vec::new(),
            should_quit: false,
            show_help_popup: false,
        }
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            while let Ok(app_event) = self.events_rx.try_recv() {
                self.handle_app_event(app_event);
            }

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key, Instant::now());
                    }
                }
            }

            self.tick(Instant::now());
        }

        self.unmount_list();
        Ok(())
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        let typing = self
            .active_list
            .as_ref()
            .map(|pane| pane.captures_text_input())
            .unwrap_or(false);

        // Global shortcuts
        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return;
            }
            KeyCode::Char('?') if !typing => {
                self.show_help_popup = !self.show_help_popup;
                return;
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return;
            }
            KeyCode::Char('q') if !typing => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }
        if self.show_help_popup {
            return;
        }

        let actions = match self.current_screen {
            Screen::MainMenu => vec![self.main_menu.handle_key_event(key)],
            Screen::Help => vec![self.help.handle_key_event(key)],
            Screen::List(_) => match self.active_list.as_mut() {
                Some(pane) => pane.handle_key_event(key, now),
                None => Vec::new(),
            },
        };
        self.perform(actions);
    }

    /// Route a finished request to the list page that issued it
    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        let Some(pane) = self.active_list.as_mut() else {
            debug!("Dropping event for unmounted list {}", app_event.instance());
            return;
        };
        if pane.instance() != app_event.instance() {
            debug!("Dropping event for unmounted list {}", app_event.instance());
            return;
        }

        let actions = match app_event {
            AppEvent::FetchCompleted { seq, result, .. } => pane.on_fetch_result(seq, result),
            AppEvent::DeleteCompleted { id, result, .. } => pane.on_delete_result(&id, result),
        };
        self.perform(actions);
    }

    /// Fire due timers and forget finished tasks
    pub fn tick(&mut self, now: Instant) {
        self.status.expire(chrono::Local::now());
        self.in_flight.retain(|handle| !handle.is_finished());

        let actions = match self.active_list.as_mut() {
            Some(pane) => pane.tick(now),
            None => Vec::new(),
        };
        self.perform(actions);
    }

    fn perform(&mut self, actions: Vec<ScreenAction>) {
        for action in actions {
            match action {
                ScreenAction::None => {}
                ScreenAction::NavigateTo(screen) => self.navigate_to_screen(screen),
                ScreenAction::NavigateBack => self.navigate_to_screen(Screen::MainMenu),
                ScreenAction::Quit => self.should_quit = true,
                ScreenAction::SetStatus(message) => self.status.set_info(message),
                ScreenAction::SetError(message) => self.status.set_error(message),
                ScreenAction::Fetch(ticket) => self.spawn_fetch(ticket),
                ScreenAction::Delete(ticket) => self.spawn_delete(ticket),
            }
        }
    }

    /// Navigate to a specific screen; list pages are always mounted fresh
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        self.unmount_list();
        self.current_screen = screen.clone();
        self.status.clear();

        if let Screen::List(kind) = screen {
            let mut pane = list_screen(kind, &self.config.list);
            info!("Opening {} list ({})", kind, pane.instance());
            let actions = pane.mount();
            self.active_list = Some(pane);
            self.perform(actions);
        }
    }

    fn unmount_list(&mut self) {
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
        if let Some(pane) = self.active_list.take() {
            debug!("Unmounted {} list ({})", pane.entity(), pane.instance());
        }
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let Some(instance) = self.active_list.as_ref().map(|pane| pane.instance()) else {
            return;
        };
        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();

        self.in_flight.push(tokio::spawn(async move {
            let result = source.fetch_page(ticket.entity, &ticket.params).await;
            let _ = tx.send(AppEvent::FetchCompleted {
                instance,
                seq: ticket.seq,
                result,
            });
        }));
    }

    fn spawn_delete(&mut self, ticket: DeleteTicket) {
        let Some(instance) = self.active_list.as_ref().map(|pane| pane.instance()) else {
            return;
        };
        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();

        self.in_flight.push(tokio::spawn(async move {
            let result = source.delete(ticket.entity, &ticket.id).await;
            let _ = tx.send(AppEvent::DeleteCompleted {
                instance,
                id: ticket.id,
                result,
            });
        }));
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        let styles = self.styles;
        match self.current_screen {
            Screen::MainMenu => self.main_menu.draw(f, chunks[0], &styles),
            Screen::Help => self.help.draw(f, chunks[0], &styles),
            Screen::List(_) => {
                if let Some(pane) = self.active_list.as_mut() {
                    pane.draw(f, chunks[0], &styles);
                }
            }
        }

        self.status.render(
            f,
            chunks[1],
            &self.screen_hint(),
            &self.context.session.label(),
            &styles,
        );

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn screen_hint(&self) -> String {
        match self.current_screen {
            Screen::MainMenu => "Main Menu | Enter: Open | q: Quit | F1/?: Help".to_string(),
            Screen::Help => "Help | Esc: Back | q: Quit".to_string(),
            Screen::List(kind) => format!(
                "{} | /: Search | f: Filters | s: Sort | d: {} | Esc: Back | F1/?: Help",
                kind.title(),
                kind.delete_verb()
            ),
        }
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 60, area);
        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.context_help())
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .border_style(self.styles.warning()),
            )
            .style(self.styles.text());
        f.render_widget(help_popup, popup_area);
    }

    fn context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            Esc - Go back\n\
            q - Quit application\n\
            F1 / ? - Toggle this help\n\n";

        let screen_help = match self.current_screen {
            Screen::MainMenu => {
                "Main Menu:\n\
                ↑/↓ - Navigate menu\n\
                Enter - Open list\n\
                P/D/A/B/I/R - Open a list directly\n\
                H - Help"
            }
            Screen::Help => {
                "Help Screen:\n\
                ↑/↓ - Switch help sections\n\
                Page Up/Down - Scroll"
            }
            Screen::List(EntityKind::Inventory) => {
                "Inventory:\n\
                / - Search, f - Filters, x - Clear filters\n\
                ←/→ - Column, s - Sort\n\
                n/p - Next/previous page, + - Page size\n\
                d - Delete item, r - Reload"
            }
            Screen::List(EntityKind::Appointments) => {
                "Appointments:\n\
                / - Search, f - Filters, x - Clear filters\n\
                ←/→ - Column, s - Sort\n\
                n/p - Next/previous page, + - Page size\n\
                Enter - Details, d - Cancel appointment, r - Reload"
            }
            Screen::List(_) => {
                "List:\n\
                / - Search, f - Filters, x - Clear filters\n\
                ←/→ - Column, s - Sort\n\
                n/p - Next/previous page, + - Page size\n\
                Enter - Details, d - Delete, r - Reload"
            }
        };

        format!("{}{}", global_help, screen_help)
    }
}
