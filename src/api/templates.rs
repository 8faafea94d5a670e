use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::required;
use crate::auth::CurrentUser;
use crate::error::{AppError, Result};
use crate::models::{SaveTemplateRequest, Template};
use crate::state::AppState;

/// Template routes
pub fn template_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates).post(create_template))
        .route(
            "/{template_id}",
            get(get_template)
                .put(update_template)
                .delete(delete_template),
        )
}

/// Store a new template; only the name is required here since the compose
/// page may save a partly written message.
pub(crate) async fn save_new_template(
    state: &AppState,
    request: SaveTemplateRequest,
) -> Result<Template> {
    let name = required(&request.name, "Template name")?.to_string();
    let template = Template::new(name, request.subject, request.body);
    state.templates.create_template(&template).await?;
    Ok(template)
}

/// GET /api/v1/templates
async fn list_templates(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Template>>> {
    Ok(Json(state.templates.list_templates().await?))
}

/// POST /api/v1/templates
async fn create_template(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<SaveTemplateRequest>,
) -> Result<(StatusCode, Json<Template>)> {
    required(&request.subject, "Template subject")?;
    required(&request.body, "Template body")?;
    let template = save_new_template(&state, request).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// GET /api/v1/templates/:template_id
async fn get_template(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(template_id): Path<String>,
) -> Result<Json<Template>> {
    let template = state
        .templates
        .get_template(&template_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {} not found", template_id)))?;
    Ok(Json(template))
}

/// PUT /api/v1/templates/:template_id
async fn update_template(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(template_id): Path<String>,
    Json(request): Json<SaveTemplateRequest>,
) -> Result<Json<Template>> {
    let name = required(&request.name, "Template name")?.to_string();
    let template = state
        .templates
        .update_template(&template_id, name, request.subject, request.body)
        .await?;
    Ok(Json(template))
}

/// DELETE /api/v1/templates/:template_id
async fn delete_template(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(template_id): Path<String>,
) -> Result<StatusCode> {
    state.templates.delete_template(&template_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
