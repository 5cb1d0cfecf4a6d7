//! Service layer: trust-list business logic, ESI lookups and contact writes.

pub mod contacts;
pub mod directory;
pub mod retry;
pub mod trust;
