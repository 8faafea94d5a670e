use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::auth::CurrentUser;
use crate::error::{AppError, Result};
use crate::session::{NavAction, Session};
use crate::state::AppState;

/// Session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session))
        .route("/navigate", post(navigate))
}

async fn load(state: &AppState, email: &str) -> Result<Session> {
    state
        .sessions
        .get_session(email)
        .await?
        .ok_or_else(|| AppError::NotFound("No active session".to_string()))
}

/// GET /api/v1/session
async fn get_session(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Session>> {
    Ok(Json(load(&state, &user.email).await?))
}

/// POST /api/v1/session/navigate
async fn navigate(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(action): Json<NavAction>,
) -> Result<Json<Session>> {
    let mut session = load(&state, &user.email).await?;
    let page = session.apply(action)?;
    state.sessions.save_session(&session).await?;

    tracing::debug!(email = %user.email, page = ?page, "Navigated");
    Ok(Json(session))
}
