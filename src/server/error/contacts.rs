use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Rejections of contact writes.
#[derive(Error, Debug)]
pub enum ContactsError {
    #[error("Missing ESI access token for the character")]
    MissingAccessToken,
    #[error("Invalid Character ID: {0}")]
    InvalidCharacterId(i64),
    /// ESI refused a batch, e.g. the token lacks `esi-characters.write_contacts.v1`.
    #[error("Error {action} contacts: ESI answered with status {status}")]
    EsiRejected { action: &'static str, status: u16 },
}

impl ContactsError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingAccessToken => StatusCode::UNAUTHORIZED,
            Self::InvalidCharacterId(_) => StatusCode::BAD_REQUEST,
            Self::EsiRejected { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ContactsError {
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
