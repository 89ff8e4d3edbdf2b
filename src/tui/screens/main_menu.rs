//! Main menu screen: one entry per list plus help

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    models::EntityKind,
    tui::{app::Screen, traits::ScreenAction, ui::Styles},
};

/// Main menu option
#[derive(Debug, Clone)]
pub struct MenuOption {
    pub title: String,
    pub description: String,
    pub shortcut: char,
    pub screen: Screen,
}

/// Main menu screen state
pub struct MainMenuScreen {
    pub menu_state: ListState,
    pub menu_options: Vec<MenuOption>,
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenuScreen {
    pub fn new() -> Self {
        let mut menu_options: Vec<MenuOption> = EntityKind::ALL
            .iter()
            .map(|kind| MenuOption {
                title: kind.title().to_string(),
                description: describe(*kind).to_string(),
                shortcut: kind.shortcut(),
                screen: Screen::List(*kind),
            })
            .collect();
        menu_options.push(MenuOption {
            title: "Help".to_string(),
            description: "Keyboard shortcuts and usage".to_string(),
            shortcut: 'H',
            screen: Screen::Help,
        });

        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        Self {
            menu_state,
            menu_options,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        let len = self.menu_options.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let selected = self.menu_state.selected().unwrap_or(0);
                let new_selected = if selected == 0 { len - 1 } else { selected - 1 };
                self.menu_state.select(Some(new_selected));
                ScreenAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let selected = self.menu_state.selected().unwrap_or(0);
                self.menu_state.select(Some((selected + 1) % len));
                ScreenAction::None
            }
            KeyCode::Enter => self
                .menu_state
                .selected()
                .and_then(|i| self.menu_options.get(i))
                .map(|option| ScreenAction::NavigateTo(option.screen.clone()))
                .unwrap_or(ScreenAction::None),
            KeyCode::Esc => ScreenAction::Quit,
            KeyCode::Char(c) => {
                // Shortcut keys are case insensitive
                let upper_c = c.to_ascii_uppercase();
                self.menu_options
                    .iter()
                    .find(|option| option.shortcut == upper_c)
                    .map(|option| ScreenAction::NavigateTo(option.screen.clone()))
                    .unwrap_or(ScreenAction::None)
            }
            _ => ScreenAction::None,
        }
    }

    /// Draw the main menu screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect, styles: &Styles) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Menu
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        let title = Paragraph::new("Hospital Management Dashboard")
            .style(styles.title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        self.draw_menu(f, chunks[1], styles);
        draw_instructions(f, chunks[2], styles);
    }

    fn draw_menu(&mut self, f: &mut Frame, area: Rect, styles: &Styles) {
        let selected = self.menu_state.selected();
        let items: Vec<ListItem> = self
            .menu_options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if Some(i) == selected {
                    styles.selected()
                } else {
                    styles.text()
                };

                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("[{}] ", option.shortcut), styles.info()),
                        Span::styled(option.title.clone(), style.add_modifier(Modifier::BOLD)),
                    ]),
                    Line::from(Span::styled(
                        format!("     {}", option.description),
                        if Some(i) == selected { style } else { styles.inactive() },
                    )),
                ])
            })
            .collect();

        let menu = List::new(items)
            .block(
                Block::default()
                    .title("Lists")
                    .borders(Borders::ALL)
                    .border_style(styles.active_border()),
            )
            .highlight_style(styles.selected());

        f.render_stateful_widget(menu, area, &mut self.menu_state);
    }
}

fn describe(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Patients => "Registered patients and their admission status",
        EntityKind::Doctors => "Medical staff by department and specialization",
        EntityKind::Appointments => "Scheduled visits; cancel from the list",
        EntityKind::Billing => "Invoices and payment status",
        EntityKind::Inventory => "Medical supplies and stock levels",
        EntityKind::Records => "Diagnoses, prescriptions, lab results and imaging",
    }
}

fn draw_instructions(f: &mut Frame, area: Rect, styles: &Styles) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let instructions = vec![
        Line::from(vec![
            Span::styled("Navigation: ", styles.info()),
            Span::raw("↑/↓ to move, "),
            Span::styled("Enter", bold),
            Span::raw(" to open, "),
            Span::styled("P/D/A/B/I/R/H", bold),
            Span::raw(" for direct access"),
        ]),
        Line::from(vec![
            Span::styled("Global: ", styles.info()),
            Span::styled("F1/?", bold),
            Span::raw(" for help, "),
            Span::styled("q", bold),
            Span::raw(" to quit"),
        ]),
    ];

    let paragraph = Paragraph::new(instructions).block(
        Block::default()
            .title("Instructions")
            .borders(Borders::ALL)
            .border_style(styles.inactive_border()),
    );
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_shortcuts_are_case_insensitive() {
        let mut menu = MainMenuScreen::new();
        assert_eq!(
            menu.handle_key_event(key(KeyCode::Char('a'))),
            ScreenAction::NavigateTo(Screen::List(EntityKind::Appointments))
        );
        assert_eq!(
            menu.handle_key_event(key(KeyCode::Char('H'))),
            ScreenAction::NavigateTo(Screen::Help)
        );
        assert_eq!(menu.handle_key_event(key(KeyCode::Char('z'))), ScreenAction::None);
    }

    #[test]
    fn test_menu_wraps_around() {
        let mut menu = MainMenuScreen::new();
        menu.handle_key_event(key(KeyCode::Up));
        assert_eq!(
            menu.handle_key_event(key(KeyCode::Enter)),
            ScreenAction::NavigateTo(Screen::Help)
        );
        menu.handle_key_event(key(KeyCode::Down));
        assert_eq!(
            menu.handle_key_event(key(KeyCode::Enter)),
            ScreenAction::NavigateTo(Screen::List(EntityKind::Patients))
        );
    }
}
