use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::auth::CurrentUser;
use crate::contacts::extract_contacts;
use crate::error::{AppError, Result};
use crate::models::{ContactList, UpdateContactListRequest};
use crate::recipients::split_addresses;
use crate::state::AppState;

/// Contact list routes
pub fn contact_list_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contact_lists).post(upload_contact_list))
        .route(
            "/{file_name}",
            get(get_contact_list)
                .put(update_contact_list)
                .delete(delete_contact_list),
        )
}

/// GET /api/v1/contact-lists
async fn list_contact_lists(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<ContactList>>> {
    Ok(Json(state.contact_lists.list_contact_lists().await?))
}

/// POST /api/v1/contact-lists - multipart upload, field `file`
async fn upload_contact_list(
    State(state): State<AppState>,
    _user: CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ContactList>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("Uploaded file has no name".to_string()))?;
        let data = field.bytes().await?;

        let contacts = extract_contacts(&data)?;
        let list = ContactList::new(file_name, contacts.emails, contacts.phone_numbers);
        state.contact_lists.create_contact_list(&list).await?;

        return Ok((StatusCode::CREATED, Json(list)));
    }

    Err(AppError::BadRequest("Choose a CSV file to upload".to_string()))
}

/// GET /api/v1/contact-lists/:file_name
async fn get_contact_list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(file_name): Path<String>,
) -> Result<Json<ContactList>> {
    let list = state
        .contact_lists
        .get_contact_list(&file_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Contact list '{}' not found", file_name)))?;
    Ok(Json(list))
}

/// PUT /api/v1/contact-lists/:file_name - replace the email list
async fn update_contact_list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(file_name): Path<String>,
    Json(request): Json<UpdateContactListRequest>,
) -> Result<Json<ContactList>> {
    let emails = split_addresses(&request.emails);
    let list = state.contact_lists.update_emails(&file_name, emails).await?;
    Ok(Json(list))
}

/// DELETE /api/v1/contact-lists/:file_name
async fn delete_contact_list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(file_name): Path<String>,
) -> Result<StatusCode> {
    state.contact_lists.delete_contact_list(&file_name).await?;
    Ok(StatusCode::NO_CONTENT)
}
