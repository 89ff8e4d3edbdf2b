//! Core traits shared by the TUI screens

use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use uuid::Uuid;

use crate::{
    api::ApiError,
    list::{
        controller::{DeleteTicket, FetchTicket},
        source::ListPage,
    },
    models::EntityKind,
    tui::{app::Screen, ui::Styles},
};

/// Actions that can be returned from screen event handling
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Navigate to a different screen
    NavigateTo(Screen),
    /// Go back to the main menu
    NavigateBack,
    /// Quit the application
    Quit,
    /// Set status message
    SetStatus(String),
    /// Set error message
    SetError(String),
    /// Issue a list request in the background
    Fetch(FetchTicket),
    /// Issue a delete request in the background
    Delete(DeleteTicket),
    /// No action taken
    None,
}

/// A mounted list page, erased over its row type
pub trait ListPane: Send {
    fn entity(&self) -> EntityKind;

    /// Identity of this mount; results tagged with another instance are dropped
    fn instance(&self) -> Uuid;

    /// Actions to run when the screen is first shown
    fn mount(&mut self) -> Vec<ScreenAction>;

    fn draw(&mut self, f: &mut Frame, area: Rect, styles: &Styles);

    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Vec<ScreenAction>;

    /// Called on every loop tick to fire due debounce timers
    fn tick(&mut self, now: Instant) -> Vec<ScreenAction>;

    fn on_fetch_result(&mut self, seq: u64, result: Result<ListPage, ApiError>) -> Vec<ScreenAction>;

    fn on_delete_result(&mut self, id: &str, result: Result<(), ApiError>) -> Vec<ScreenAction>;

    /// Whether printable keys belong to the screen (e.g. while typing a search)
    fn captures_text_input(&self) -> bool;
}
