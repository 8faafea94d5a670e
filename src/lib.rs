pub mod api;
pub mod auth;
pub mod config;
pub mod contacts;
pub mod dashboard;
pub mod dispatch;
pub mod error;
pub mod mail;
pub mod models;
pub mod recipients;
pub mod security;
pub mod session;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
