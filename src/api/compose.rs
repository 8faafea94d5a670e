use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;

use crate::api::templates::save_new_template;
use crate::auth::CurrentUser;
use crate::dispatch::DispatchReport;
use crate::error::{AppError, Result};
use crate::mail::{OutboundMessage, SmtpCredentials};
use crate::models::{SaveTemplateRequest, SendMailRequest, Template};
use crate::recipients;
use crate::state::AppState;

/// Compose routes
pub fn compose_routes() -> Router<AppState> {
    Router::new()
        .route("/send", post(send_mail))
        .route("/template", post(save_as_template))
}

/// POST /api/v1/compose/send
///
/// Resolves recipients from the chosen group, manual entries and contact
/// list, then makes one send attempt. Validation problems are returned as
/// 4xx errors with nothing logged; transport failures come back as a report
/// with status `failed`.
async fn send_mail(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<SendMailRequest>,
) -> Result<Json<DispatchReport>> {
    let platform = match request.platform {
        Some(p) => p,
        None => state
            .sessions
            .get_session(&user.email)
            .await?
            .and_then(|s| s.platform)
            .ok_or_else(|| AppError::BadRequest("Choose a service first".to_string()))?,
    };

    let credentials = SmtpCredentials::from_settings(state.config.smtp(platform))
        .ok_or_else(|| {
            AppError::BadRequest(format!("Mail service {} is not configured", platform))
        })?;

    let template = match request.template_id.as_deref() {
        Some(id) => Some(
            state
                .templates
                .get_template(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Template {} not found", id)))?,
        ),
        None => None,
    };
    let (subject, body) = fill_from_template(request.subject, request.body, template.as_ref());

    let group = match request.group_id.as_deref() {
        Some(id) => Some(
            state
                .groups
                .get_group(&user.email, id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Group {} not found", id)))?,
        ),
        None => None,
    };

    let contacts = match request.contact_list.as_deref() {
        Some(file_name) => Some(
            state
                .contact_lists
                .get_contact_list(file_name)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Contact list '{}' not found", file_name))
                })?,
        ),
        None => None,
    };

    let recipients =
        recipients::resolve(group.as_ref(), &request.manual_recipients, contacts.as_ref());

    let report = state
        .dispatcher
        .send(
            &credentials,
            OutboundMessage {
                subject,
                body,
                recipients,
            },
        )
        .await?;

    if let Some(group) = &group {
        state
            .groups
            .mark_sent(&user.email, &group.id, Utc::now())
            .await?;
    }

    Ok(Json(report))
}

/// Template text fills whichever of subject/body the form left blank
fn fill_from_template(
    subject: String,
    body: String,
    template: Option<&Template>,
) -> (String, String) {
    match template {
        Some(t) => {
            let subject = if subject.trim().is_empty() {
                t.subject.clone()
            } else {
                subject
            };
            let body = if body.trim().is_empty() {
                t.body.clone()
            } else {
                body
            };
            (subject, body)
        }
        None => (subject, body),
    }
}

/// POST /api/v1/compose/template - save the current subject/body as a template
async fn save_as_template(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<SaveTemplateRequest>,
) -> Result<(StatusCode, Json<Template>)> {
    let template = save_new_template(&state, request).await?;
    Ok((StatusCode::CREATED, Json(template)))
}
