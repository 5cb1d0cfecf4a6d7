use std::fmt;

use thiserror::Error;

use crate::model::trust::TrustedEntityDto;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Identifier needs a name or id")]
    Empty,
    #[error("Identifier must be a positive number: {0}")]
    NotPositive(String),
    #[error("Identifier must be a valid ID for removal: {0}")]
    NotAnId(String),
}

/// A resolved entity identifier, either a numeric EVE ID or a name.
///
/// Names compare case-insensitively against the display name of an entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identifier {
    Id(i64),
    Name(String),
}

impl Identifier {
    /// Classifies a user-supplied token.
    ///
    /// Surrounding whitespace is ignored. A token made only of ASCII digits is an ID and must
    /// be a positive `i64`; anything else is a name.
    pub fn resolve(token: &str) -> Result<Self, IdentifierError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if token.bytes().all(|b| b.is_ascii_digit()) {
            return match token.parse::<i64>() {
                Ok(id) if id > 0 => Ok(Self::Id(id)),
                _ => Err(IdentifierError::NotPositive(token.to_string())),
            };
        }

        Ok(Self::Name(token.to_string()))
    }

    pub fn from_id(id: i64) -> Result<Self, IdentifierError> {
        if id <= 0 {
            return Err(IdentifierError::NotPositive(id.to_string()));
        }

        Ok(Self::Id(id))
    }

    pub fn as_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Name(_) => None,
        }
    }

    /// True if this identifier refers to `entity`.
    ///
    /// Names compare ignoring ASCII case, the same rule the server uses when resolving names.
    pub fn matches(&self, entity: &TrustedEntityDto) -> bool {
        match self {
            Self::Id(id) => entity.primary_id() == *id,
            Self::Name(name) => entity.name().eq_ignore_ascii_case(name),
        }
    }

    /// Key used to detect duplicate in-flight operations, names fold ASCII case only.
    pub(crate) fn normalized(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Name(name) => name.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl TryFrom<i64> for Identifier {
    type Error = IdentifierError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::from_id(id)
    }
}
