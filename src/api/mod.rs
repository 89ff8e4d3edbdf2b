//! HTTP access to the hospital REST API

pub mod client;
pub mod errors;

pub use client::ApiClient;
pub use errors::ApiError;
