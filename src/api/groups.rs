use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::required;
use crate::auth::CurrentUser;
use crate::error::{AppError, Result};
use crate::models::{CreateGroupRequest, Group, GroupQuery, UpdateGroupRequest};
use crate::state::AppState;

/// Group routes
pub fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_groups).post(create_group))
        .route(
            "/{group_id}",
            get(get_group).put(update_group).delete(delete_group),
        )
}

/// Trimmed name plus the non-empty trimmed emails; both must be present
fn validate(request: CreateGroupRequest) -> Result<(String, Vec<String>)> {
    let name = required(&request.name, "Group name")?.to_string();
    let emails: Vec<String> = request
        .emails
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect();

    if emails.is_empty() {
        return Err(AppError::BadRequest(
            "Please provide a valid group name and at least one email".to_string(),
        ));
    }
    Ok((name, emails))
}

/// GET /api/v1/groups?search=
async fn list_groups(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<GroupQuery>,
) -> Result<Json<Vec<Group>>> {
    let groups = state
        .groups
        .list_groups(&user.email, query.search.as_deref())
        .await?;
    Ok(Json(groups))
}

/// POST /api/v1/groups
async fn create_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>)> {
    let (name, emails) = validate(request)?;
    let group = Group::new(name, emails, user.email);

    state.groups.create_group(&group).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /api/v1/groups/:group_id
async fn get_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(group_id): Path<String>,
) -> Result<Json<Group>> {
    let group = state
        .groups
        .get_group(&user.email, &group_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group {} not found", group_id)))?;
    Ok(Json(group))
}

/// PUT /api/v1/groups/:group_id - replace name and recipients
async fn update_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(group_id): Path<String>,
    Json(request): Json<UpdateGroupRequest>,
) -> Result<Json<Group>> {
    let (name, emails) = validate(request)?;
    let group = state
        .groups
        .update_group(&user.email, &group_id, name, emails)
        .await?;
    Ok(Json(group))
}

/// DELETE /api/v1/groups/:group_id
async fn delete_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(group_id): Path<String>,
) -> Result<StatusCode> {
    state.groups.delete_group(&user.email, &group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
