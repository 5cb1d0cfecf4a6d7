//! Data transfer objects shared by the reconciliation core and the server.

pub mod api;
pub mod trust;
