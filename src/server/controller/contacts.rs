use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        trust::ContactsDto,
    },
    server::{
        error::{contacts::ContactsError, Error},
        model::app::AppState,
        service::contacts::ContactsService,
    },
};

pub static CONTACTS_TAG: &str = "contacts";

fn contacts_service(state: &AppState) -> ContactsService<'_> {
    ContactsService::new(&state.db, &state.http_client, &state.esi_url)
}

/// ESI access token of the character, forwarded as `Authorization: Bearer <token>`
fn access_token(headers: &HeaderMap) -> Result<&str, ContactsError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ContactsError::MissingAccessToken)
}

/// Add every trusted character and corporation to a character's contacts
#[utoipa::path(
    post,
    path = "/api/contacts/add",
    tag = CONTACTS_TAG,
    request_body = ContactsDto,
    responses(
        (status = 200, description = "Contacts written", body = MessageDto),
        (status = 400, description = "Invalid character ID", body = ErrorDto),
        (status = 401, description = "Missing ESI access token", body = ErrorDto),
        (status = 502, description = "ESI refused the contacts", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ContactsDto>,
) -> Result<impl IntoResponse, Error> {
    let access_token = access_token(&headers)?;
    let message = contacts_service(&state)
        .add_contacts(request.character_id, access_token)
        .await?;

    Ok((StatusCode::OK, Json(message)))
}

/// Remove every untrusted character and corporation from a character's contacts
#[utoipa::path(
    post,
    path = "/api/contacts/delete",
    tag = CONTACTS_TAG,
    request_body = ContactsDto,
    responses(
        (status = 200, description = "Contacts removed", body = MessageDto),
        (status = 400, description = "Invalid character ID", body = ErrorDto),
        (status = 401, description = "Missing ESI access token", body = ErrorDto),
        (status = 502, description = "ESI refused the removal", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ContactsDto>,
) -> Result<impl IntoResponse, Error> {
    let access_token = access_token(&headers)?;
    let message = contacts_service(&state)
        .delete_contacts(request.character_id, access_token)
        .await?;

    Ok((StatusCode::OK, Json(message)))
}
