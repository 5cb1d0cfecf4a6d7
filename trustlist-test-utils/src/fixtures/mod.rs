//! Fixtures for test data and mock HTTP endpoints.
//!
//! - `eve` - ESI responses (characters, corporations, alliances, name lookups)
//! - `trust` - trust-list rows in the test database

pub mod eve;
pub mod trust;
