use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;

use crate::api::required;
use crate::auth::CurrentUser;
use crate::error::{AppError, Result};
use crate::models::{AuthRequest, LoginResponse, User};
use crate::security::{hash_password, verify_password};
use crate::session::{NavAction, Page, Session};
use crate::state::AppState;

/// Auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let email = required(&request.email, "Email")?;
    if request.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    let user = User {
        email: email.to_string(),
        password_hash: hash_password(&request.password, state.config.password_hash_cost)?,
        created_at: Utc::now(),
    };
    state.users.create_user(&user).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "email": user.email })),
    ))
}

/// POST /api/v1/auth/login - issue a token and start a fresh session
async fn login(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<LoginResponse>> {
    let email = request.email.trim();

    let user = state
        .users
        .get_user(email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    if !verify_password(&request.password, &user.password_hash)? {
        tracing::warn!(email = %email, "Rejected login");
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let mut session = Session::new(user.email.clone());
    session.apply(NavAction::Authenticated)?;
    state.sessions.save_session(&session).await?;

    let token = state.auth.generate_token(&user.email)?;
    tracing::info!(email = %user.email, "User logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.auth.expiry_seconds(),
        session,
    }))
}

/// POST /api/v1/auth/logout
async fn logout(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Session>> {
    let mut session = state
        .sessions
        .get_session(&user.email)
        .await?
        .unwrap_or_else(|| Session::new(user.email.clone()));

    if session.page.is_dashboard() || session.page == Page::ChooseService {
        session.apply(NavAction::Logout)?;
    }
    state.sessions.save_session(&session).await?;

    tracing::info!(email = %user.email, "User logged out");
    Ok(Json(session))
}
