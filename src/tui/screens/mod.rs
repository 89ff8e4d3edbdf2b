//! Screen implementations for the TUI

pub mod help;
pub mod list_screen;
pub mod main_menu;

pub use help::HelpScreen;
pub use list_screen::{list_screen, ListScreen};
pub use main_menu::MainMenuScreen;
