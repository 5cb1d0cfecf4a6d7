//! Axum handlers for the trust-list API.
//!
//! Handlers extract the list from the path, delegate to [`TrustService`](crate::server::service::trust::TrustService)
//! and let [`Error`](crate::server::error::Error) map failures to HTTP responses. The contacts
//! handlers forward the caller's ESI access token to [`ContactsService`](crate::server::service::contacts::ContactsService).

pub mod contacts;
pub mod trust;
