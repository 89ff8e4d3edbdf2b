//! medboard: terminal list views over a hospital management REST API

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod entities;
pub mod list;
pub mod models;
pub mod tui;
