use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;

use crate::auth::CurrentUser;
use crate::config::Platform;
use crate::dashboard::MailStats;
use crate::error::Result;
use crate::models::{MailLogEntry, MailQuery, PlatformQuery};
use crate::state::AppState;

const MAX_TREND_DAYS: u32 = 90;

/// Mail log routes
pub fn mail_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_mails))
        .route("/stats", get(mail_stats))
        .route("/daily", get(daily_counts))
}

/// Log entries are tagged with the SMTP host of the platform
fn platform_host(state: &AppState, platform: Option<Platform>) -> Option<String> {
    platform.map(|p| state.config.smtp(p).host.clone())
}

/// GET /api/v1/mails?platform=&status=
async fn list_mails(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<MailQuery>,
) -> Result<Json<Vec<MailLogEntry>>> {
    let host = platform_host(&state, query.platform);
    let entries = state.mail_log.list(host.as_deref(), query.status).await?;
    Ok(Json(entries))
}

/// GET /api/v1/mails/stats?platform=
async fn mail_stats(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<PlatformQuery>,
) -> Result<Json<MailStats>> {
    let host = platform_host(&state, query.platform);
    Ok(Json(state.mail_log.stats(host.as_deref()).await?))
}

/// GET /api/v1/mails/daily?platform=&days=
///
/// `days` defaults to 1, i.e. only today's bucket.
async fn daily_counts(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<PlatformQuery>,
) -> Result<Json<BTreeMap<NaiveDate, usize>>> {
    let host = platform_host(&state, query.platform);
    let days = query.days.unwrap_or(1).clamp(1, MAX_TREND_DAYS);
    Ok(Json(
        state.mail_log.daily_counts(host.as_deref(), days).await?,
    ))
}
