//! Reusable widgets for the list screens

pub mod data_table;
pub mod dialog;
pub mod filter_bar;
pub mod pagination_bar;
pub mod search_input;
pub mod status_badge;
pub mod status_display;

pub use status_display::{StatusDisplay, StatusMessage, StatusType};
