use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::{
    api::ErrorDto,
    trust::{EntityKind, TrustState},
};

/// Rejections of trust-list requests, each mapped to the message shown to the user.
#[derive(Error, Debug)]
pub enum TrustError {
    #[error("Identifier resolution failed: {0}")]
    ResolutionFailed(String),
    #[error("Entity data retrieval failed: {0}")]
    RetrievalFailed(String),
    #[error("Identifier must be a valid ID for removal: {0}")]
    InvalidRemovalId(String),
    #[error("{} already exists in the {opposite} list.", .kind.label())]
    Conflict {
        kind: EntityKind,
        opposite: TrustState,
    },
    #[error("Entry not found")]
    EntryNotFound,
}

impl TrustError {
    fn status(&self) -> StatusCode {
        match self {
            Self::ResolutionFailed(_) | Self::InvalidRemovalId(_) => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::EntryNotFound => StatusCode::NOT_FOUND,
            Self::RetrievalFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TrustError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
