//! Error types for the trust-list server.
//!
//! Domain errors carry their own HTTP mapping. Everything else is logged and answered with a
//! generic 500 so internals never reach the client.

pub mod config;
pub mod contacts;
pub mod retry;
pub mod trust;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, contacts::ContactsError, trust::TrustError},
};

/// Main error type for the server.
///
/// Aggregates domain errors and external library errors so handlers and services can use `?`
/// throughout.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Rejected trust-list request.
    #[error(transparent)]
    TrustError(#[from] TrustError),
    /// Rejected contact write.
    #[error(transparent)]
    ContactsError(#[from] ContactsError),
    /// ESI client error (API requests, OAuth, rate limiting).
    #[error(transparent)]
    EsiError(#[from] eve_esi::Error),
    /// Raw HTTP error from ESI endpoints the ESI client does not cover.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Failure binding or serving the listener.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::TrustError(err) => err.into_response(),
            Self::ContactsError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wraps any displayable error into a logged, generic 500 Internal Server Error response.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
