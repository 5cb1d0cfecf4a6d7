//! Remote authority server for the trust lists.
//!
//! Persists list membership with sea-orm, validates identifiers against EVE Online's ESI and
//! exposes the lists over an axum HTTP API documented with utoipa.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
