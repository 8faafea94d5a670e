pub mod auth;
pub mod compose;
pub mod contact_lists;
pub mod groups;
pub mod health;
pub mod mails;
pub mod session;
pub mod templates;

use axum::Router;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .merge(health::health_routes())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::auth_routes())
        .nest("/session", session::session_routes())
        .nest("/groups", groups::group_routes())
        .nest("/contact-lists", contact_lists::contact_list_routes())
        .nest("/templates", templates::template_routes())
        .nest("/compose", compose::compose_routes())
        .nest("/mails", mails::mail_routes())
}

/// Trimmed value of a required form field
pub(crate) fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(trimmed)
}
