use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Which of the two membership lists an entity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum TrustState {
    Trusted,
    Untrusted,
}

impl TrustState {
    pub fn opposite(self) -> Self {
        match self {
            Self::Trusted => Self::Untrusted,
            Self::Untrusted => Self::Trusted,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trusted => "trusted",
            Self::Untrusted => "untrusted",
        }
    }

    /// Capitalized form used in user-facing notices, e.g. "Trusted".
    pub fn label(self) -> &'static str {
        match self {
            Self::Trusted => "Trusted",
            Self::Untrusted => "Untrusted",
        }
    }

    pub fn is_trusted(self) -> bool {
        matches!(self, Self::Trusted)
    }
}

impl fmt::Display for TrustState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of EVE Online entity held in a trust list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum EntityKind {
    Character,
    Corporation,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Corporation => "corporation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Character => "Character",
            Self::Corporation => "Corporation",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one of the four trust lists (trust state x entity kind).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListKey {
    pub state: TrustState,
    pub kind: EntityKind,
}

impl ListKey {
    pub const TRUSTED_CHARACTERS: ListKey = ListKey::new(TrustState::Trusted, EntityKind::Character);
    pub const TRUSTED_CORPORATIONS: ListKey =
        ListKey::new(TrustState::Trusted, EntityKind::Corporation);
    pub const UNTRUSTED_CHARACTERS: ListKey =
        ListKey::new(TrustState::Untrusted, EntityKind::Character);
    pub const UNTRUSTED_CORPORATIONS: ListKey =
        ListKey::new(TrustState::Untrusted, EntityKind::Corporation);

    pub const ALL: [ListKey; 4] = [
        Self::TRUSTED_CHARACTERS,
        Self::TRUSTED_CORPORATIONS,
        Self::UNTRUSTED_CHARACTERS,
        Self::UNTRUSTED_CORPORATIONS,
    ];

    pub const fn new(state: TrustState, kind: EntityKind) -> Self {
        Self { state, kind }
    }

    /// The list holding the same entity kind under the other trust state.
    pub fn opposite(self) -> Self {
        Self::new(self.state.opposite(), self.kind)
    }
}

impl fmt::Display for ListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}s", self.state, self.kind)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct TrustedCharacterDto {
    pub character_id: i64,
    pub character_name: String,
    pub corporation_id: i64,
    pub corporation_name: String,
    pub added_by: String,
    pub date_added: NaiveDateTime,
    #[serde(default)]
    pub comment: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct TrustedCorporationDto {
    pub corporation_id: i64,
    pub corporation_name: String,
    pub alliance_id: Option<i64>,
    pub alliance_name: Option<String>,
    pub added_by: String,
    pub date_added: NaiveDateTime,
    #[serde(default)]
    pub comment: String,
}

/// A canonical trust-list record as returned by the remote authority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum TrustedEntityDto {
    Character(TrustedCharacterDto),
    Corporation(TrustedCorporationDto),
}

impl TrustedEntityDto {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Character(_) => EntityKind::Character,
            Self::Corporation(_) => EntityKind::Corporation,
        }
    }

    /// `character_id` for characters, `corporation_id` for corporations.
    pub fn primary_id(&self) -> i64 {
        match self {
            Self::Character(character) => character.character_id,
            Self::Corporation(corporation) => corporation.corporation_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Character(character) => &character.character_name,
            Self::Corporation(corporation) => &corporation.corporation_name,
        }
    }

    pub fn comment(&self) -> &str {
        match self {
            Self::Character(character) => &character.comment,
            Self::Corporation(corporation) => &corporation.comment,
        }
    }

    /// Returns a copy of this record carrying a different comment.
    pub fn with_comment(&self, comment: &str) -> Self {
        let mut entity = self.clone();
        match &mut entity {
            Self::Character(character) => character.comment = comment.to_string(),
            Self::Corporation(corporation) => corporation.comment = comment.to_string(),
        }
        entity
    }
}

impl From<TrustedCharacterDto> for TrustedEntityDto {
    fn from(character: TrustedCharacterDto) -> Self {
        Self::Character(character)
    }
}

impl From<TrustedCorporationDto> for TrustedEntityDto {
    fn from(corporation: TrustedCorporationDto) -> Self {
        Self::Corporation(corporation)
    }
}

/// Snapshot of all four trust lists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct TrustListsDto {
    #[serde(default)]
    pub trusted_characters: Vec<TrustedCharacterDto>,
    #[serde(default)]
    pub trusted_corporations: Vec<TrustedCorporationDto>,
    #[serde(default)]
    pub untrusted_characters: Vec<TrustedCharacterDto>,
    #[serde(default)]
    pub untrusted_corporations: Vec<TrustedCorporationDto>,
}

/// Request body for add & remove operations.
///
/// The identifier is always string-encoded, numeric IDs included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct IdentifierDto {
    pub identifier: String,
    /// Name recorded as `added_by` on newly added entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CommentDto {
    pub id: i64,
    pub comment: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ContactsDto {
    pub character_id: i64,
}
