//! Database model type aliases.

/// A character entry of either trust list, distinguished by its `trusted` column.
pub type TrustedCharacterModel = entity::trusted_character::Model;

/// A corporation entry of either trust list, distinguished by its `trusted` column.
pub type TrustedCorporationModel = entity::trusted_corporation::Model;
