//! `SeaORM` entities for the persisted trust lists.

pub mod prelude;

pub mod trusted_character;
pub mod trusted_corporation;
