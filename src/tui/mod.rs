//! Terminal user interface for browsing the hospital lists

pub mod app;
pub mod components;
pub mod events;
pub mod screens;
pub mod traits;
pub mod ui;

pub use app::{App, Screen};
