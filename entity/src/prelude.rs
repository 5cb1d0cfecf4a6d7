pub use super::trusted_character::Entity as TrustedCharacter;
pub use super::trusted_corporation::Entity as TrustedCorporation;
