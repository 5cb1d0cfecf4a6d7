//! Conversions from stored trust-list rows to API records.

use crate::{
    model::trust::{TrustedCharacterDto, TrustedCorporationDto, TrustedEntityDto},
    server::model::db::{TrustedCharacterModel, TrustedCorporationModel},
};

impl From<TrustedCharacterModel> for TrustedCharacterDto {
    fn from(model: TrustedCharacterModel) -> Self {
        Self {
            character_id: model.character_id,
            character_name: model.character_name,
            corporation_id: model.corporation_id,
            corporation_name: model.corporation_name,
            added_by: model.added_by,
            date_added: model.date_added,
            comment: model.comment,
        }
    }
}

impl From<TrustedCorporationModel> for TrustedCorporationDto {
    fn from(model: TrustedCorporationModel) -> Self {
        Self {
            corporation_id: model.corporation_id,
            corporation_name: model.corporation_name,
            alliance_id: model.alliance_id,
            alliance_name: model.alliance_name,
            added_by: model.added_by,
            date_added: model.date_added,
            comment: model.comment,
        }
    }
}

impl From<TrustedCharacterModel> for TrustedEntityDto {
    fn from(model: TrustedCharacterModel) -> Self {
        Self::Character(model.into())
    }
}

impl From<TrustedCorporationModel> for TrustedEntityDto {
    fn from(model: TrustedCorporationModel) -> Self {
        Self::Corporation(model.into())
    }
}
