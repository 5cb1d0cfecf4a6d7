//! Error types for the reconciliation core.
//!
//! None of these are fatal. Every failure is surfaced to the user through the presentation
//! adapter and the trust store is left as it was before the failed remote call.

use thiserror::Error;

use crate::{
    client::trust::identifier::IdentifierError,
    model::trust::{EntityKind, TrustState},
};

/// Failure talking to the remote authority.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Non-success status, carrying the message from the response body or a generic fallback.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Failed to send request: {0}")]
    Transport(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrustError {
    /// Bad or missing identifier, reported before any network call.
    #[error(transparent)]
    Validation(#[from] IdentifierError),
    /// The identifier is already held by the opposite list for this entity kind.
    #[error("{} already exists in the {opposite} list.", .kind.label())]
    Conflict {
        kind: EntityKind,
        opposite: TrustState,
    },
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// The remote authority answered an add with a record of the other entity kind.
    #[error("Expected a {expected} record but the server returned a {returned}")]
    KindMismatch {
        expected: EntityKind,
        returned: EntityKind,
    },
    /// An add or remove for the same list and identifier has not resolved yet.
    #[error("A {state} {kind} request for {identifier} is already in progress")]
    InFlight {
        state: TrustState,
        kind: EntityKind,
        identifier: String,
    },
}

/// Which half of the two-step contacts write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactsStage {
    Add,
    Delete,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactsError {
    #[error("Invalid Character ID: {0}")]
    InvalidCharacterId(i64),
    #[error("Failed to add contacts: {0}")]
    AddFailed(RemoteError),
    /// Trusted contacts were written but untrusted contacts were not removed.
    #[error("Contacts were added but removing untrusted contacts failed: {0}")]
    PartiallyApplied(RemoteError),
}

impl ContactsError {
    pub fn stage(&self) -> Option<ContactsStage> {
        match self {
            Self::InvalidCharacterId(_) => None,
            Self::AddFailed(_) => Some(ContactsStage::Add),
            Self::PartiallyApplied(_) => Some(ContactsStage::Delete),
        }
    }
}
