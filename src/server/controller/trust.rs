use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        trust::{
            CommentDto, EntityKind, IdentifierDto, ListKey, TrustListsDto, TrustState,
            TrustedEntityDto,
        },
    },
    server::{
        error::Error,
        model::app::AppState,
        service::{directory::DirectoryService, trust::TrustService},
    },
};

pub static TRUST_TAG: &str = "trust";

fn trust_service(state: &AppState) -> TrustService<'_> {
    let directory = DirectoryService::new(&state.esi_client, &state.http_client, &state.esi_url);

    TrustService::new(&state.db, directory)
}

/// Get all trusted & untrusted characters and corporations
#[utoipa::path(
    get,
    path = "/api/trust",
    tag = TRUST_TAG,
    responses(
        (status = 200, description = "All four trust lists", body = TrustListsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_trust_lists(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let lists = trust_service(&state).get_lists().await?;

    Ok((StatusCode::OK, Json(lists)))
}

/// Add a character or corporation to a list by ID or exact name
#[utoipa::path(
    post,
    path = "/api/trust/{state}/{kind}/add",
    tag = TRUST_TAG,
    params(
        ("state" = TrustState, Path, description = "List to add to"),
        ("kind" = EntityKind, Path, description = "Kind of entity to add")
    ),
    request_body = IdentifierDto,
    responses(
        (status = 200, description = "Stored record for the entity", body = TrustedEntityDto),
        (status = 400, description = "Identifier could not be resolved", body = ErrorDto),
        (status = 409, description = "Entity is already in the opposite list", body = ErrorDto),
        (status = 500, description = "Entity data retrieval failed", body = ErrorDto)
    ),
)]
pub async fn add_entity(
    State(state): State<AppState>,
    Path((trust_state, kind)): Path<(TrustState, EntityKind)>,
    Json(request): Json<IdentifierDto>,
) -> Result<impl IntoResponse, Error> {
    let entity = trust_service(&state)
        .add(ListKey::new(trust_state, kind), request)
        .await?;

    Ok((StatusCode::OK, Json(entity)))
}

/// Remove a character or corporation from a list by ID
#[utoipa::path(
    post,
    path = "/api/trust/{state}/{kind}/remove",
    tag = TRUST_TAG,
    params(
        ("state" = TrustState, Path, description = "List to remove from"),
        ("kind" = EntityKind, Path, description = "Kind of entity to remove")
    ),
    request_body = IdentifierDto,
    responses(
        (status = 200, description = "Entity is no longer in the list", body = MessageDto),
        (status = 400, description = "Identifier is not a valid ID", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_entity(
    State(state): State<AppState>,
    Path((trust_state, kind)): Path<(TrustState, EntityKind)>,
    Json(request): Json<IdentifierDto>,
) -> Result<impl IntoResponse, Error> {
    let message = trust_service(&state)
        .remove(ListKey::new(trust_state, kind), request)
        .await?;

    Ok((StatusCode::OK, Json(message)))
}

/// Replace the comment on a list entry
#[utoipa::path(
    put,
    path = "/api/trust/{state}/{kind}/comment",
    tag = TRUST_TAG,
    params(
        ("state" = TrustState, Path, description = "List holding the entry"),
        ("kind" = EntityKind, Path, description = "Kind of entity")
    ),
    request_body = CommentDto,
    responses(
        (status = 200, description = "Comment updated", body = MessageDto),
        (status = 404, description = "Entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_comment(
    State(state): State<AppState>,
    Path((trust_state, kind)): Path<(TrustState, EntityKind)>,
    Json(request): Json<CommentDto>,
) -> Result<impl IntoResponse, Error> {
    let message = trust_service(&state)
        .update_comment(ListKey::new(trust_state, kind), request)
        .await?;

    Ok((StatusCode::OK, Json(message)))
}
