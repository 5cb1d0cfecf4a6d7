//! Client-side reconciliation of trust lists with the remote authority.

pub mod error;
pub mod presentation;
pub mod registry;
pub mod remote;
pub mod trust;
