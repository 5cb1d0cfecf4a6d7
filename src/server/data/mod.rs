//! Database repositories.

pub mod trust;
