pub mod cascade;
pub mod contacts;
pub mod engine;
pub mod identifier;
pub(crate) mod pending;
pub mod store;

#[cfg(test)]
mod tests;

pub use engine::{ReconciliationEngine, Removal};
pub use identifier::{Identifier, IdentifierError};
pub use store::{StoreError, TrustStore};
