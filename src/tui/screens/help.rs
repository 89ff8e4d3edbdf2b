//! Help screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::tui::{traits::ScreenAction, ui::Styles};

/// Help sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpSection {
    Overview,
    Navigation,
    Search,
    Filters,
    Sorting,
    Actions,
}

impl HelpSection {
    pub const ALL: [HelpSection; 6] = [
        HelpSection::Overview,
        HelpSection::Navigation,
        HelpSection::Search,
        HelpSection::Filters,
        HelpSection::Sorting,
        HelpSection::Actions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HelpSection::Overview => "Overview",
            HelpSection::Navigation => "Navigation",
            HelpSection::Search => "Searching",
            HelpSection::Filters => "Filters",
            HelpSection::Sorting => "Sorting & Pages",
            HelpSection::Actions => "Row Actions",
        }
    }

    // (heading, bullet lines)
    fn body(&self) -> Vec<(&'static str, Vec<&'static str>)> {
        match self {
            HelpSection::Overview => vec![
                ("Lists:", vec![
                    "Patients, Doctors, Appointments, Billing, Inventory and Medical Records",
                    "Every list is searched, filtered, sorted and paged on the server",
                ]),
                ("Status bar:", vec![
                    "Shows the last message on the left and the signed-in user on the right",
                    "Request errors stay until the next message replaces them",
                ]),
            ],
            HelpSection::Navigation => vec![
                ("Global:", vec![
                    "q - Quit (except while typing a search)",
                    "F1 or ? - Toggle help popup",
                    "Esc - Back to the main menu",
                ]),
                ("Main menu:", vec![
                    "↑/↓ and Enter - Open a list",
                    "P/D/A/B/I/R - Open a list directly, H - Help",
                ]),
            ],
            HelpSection::Search => vec![
                ("Search box:", vec![
                    "/ - Focus the search box",
                    "Typing waits for a short pause before searching",
                    "Ctrl+U - Clear the search immediately",
                    "Esc, Enter or Tab - Back to the table",
                ]),
            ],
            HelpSection::Filters => vec![
                ("Filter bar:", vec![
                    "f - Focus the filter bar",
                    "←/→ - Choose a filter",
                    "↑/↓ - Change its value",
                    "x - Clear all filters (shown while any filter is active)",
                ]),
            ],
            HelpSection::Sorting => vec![
                ("Sorting:", vec![
                    "←/→ or [/] - Move the header cursor",
                    "s - Sort by the column under the cursor, again to flip the direction",
                ]),
                ("Pages:", vec![
                    "n/p or PageDown/PageUp - Next or previous page",
                    "Home/End - First or last page",
                    "1-9 - Jump to a page",
                    "+ - Cycle page size (10, 25, 50, 100)",
                    "r - Reload the current page",
                ]),
            ],
            HelpSection::Actions => vec![
                ("Rows:", vec![
                    "↑/↓ - Select a row",
                    "Enter - Show row details (not available for inventory)",
                    "d - Delete the selected row, or cancel an appointment",
                    "y/n - Confirm or keep when asked",
                ]),
            ],
        }
    }

    pub fn lines(&self, styles: &Styles) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(self.as_str(), styles.title())), Line::from("")];
        for (heading, items) in self.body() {
            lines.push(Line::from(Span::styled(heading, styles.info())));
            lines.extend(items.iter().map(|item| Line::from(format!("• {}", item))));
            lines.push(Line::from(""));
        }
        lines
    }
}

/// Help screen state
pub struct HelpScreen {
    pub current_section: usize,
    pub section_state: ListState,
    pub scroll_offset: usize,
}

impl Default for HelpScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpScreen {
    pub fn new() -> Self {
        let mut section_state = ListState::default();
        section_state.select(Some(0));

        Self {
            current_section: 0,
            section_state,
            scroll_offset: 0,
        }
    }

    pub fn section(&self) -> HelpSection {
        HelpSection::ALL[self.current_section]
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Up => {
                if self.current_section > 0 {
                    self.current_section -= 1;
                    self.section_state.select(Some(self.current_section));
                    self.scroll_offset = 0;
                }
            }
            KeyCode::Down => {
                if self.current_section < HelpSection::ALL.len() - 1 {
                    self.current_section += 1;
                    self.section_state.select(Some(self.current_section));
                    self.scroll_offset = 0;
                }
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.scroll_offset += 10;
            }
            KeyCode::Home => {
                self.scroll_offset = 0;
            }
            KeyCode::Esc => return ScreenAction::NavigateBack,
            _ => {}
        }
        ScreenAction::None
    }

    /// Draw the help screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect, styles: &Styles) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(area);

        let items: Vec<ListItem> = HelpSection::ALL
            .iter()
            .map(|section| ListItem::new(section.as_str()))
            .collect();
        let section_list = List::new(items)
            .block(
                Block::default()
                    .title("Help Sections")
                    .borders(Borders::ALL)
                    .border_style(styles.active_border()),
            )
            .highlight_style(styles.selected());
        f.render_stateful_widget(section_list, chunks[0], &mut self.section_state);

        let visible: Vec<Line> = self
            .section()
            .lines(styles)
            .into_iter()
            .skip(self.scroll_offset)
            .collect();
        let content = Paragraph::new(visible)
            .block(
                Block::default()
                    .title(format!("Help - {}", self.section().as_str()))
                    .borders(Borders::ALL)
                    .border_style(styles.active_border()),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(content, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_section_navigation_resets_scroll() {
        let mut help = HelpScreen::new();
        help.handle_key_event(KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE));
        assert_eq!(help.scroll_offset, 10);

        help.handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(help.section(), HelpSection::Navigation);
        assert_eq!(help.scroll_offset, 0);

        assert_eq!(
            help.handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            ScreenAction::NavigateBack
        );
    }

    #[test]
    fn test_section_lines() {
        let lines = HelpSection::Search.lines(&Styles::new(Theme::Dark));
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text[0], "Searching");
        assert!(text.contains(&"• Ctrl+U - Clear the search immediately".to_string()));
    }
}
