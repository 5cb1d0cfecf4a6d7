//! Trust-list rows inserted straight into the test database.

use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn trust(&self) -> TrustFixtures<'_> {
        TrustFixtures { setup: self }
    }
}

pub struct TrustFixtures<'a> {
    pub setup: &'a TestContext,
}

impl<'a> TrustFixtures<'a> {
    /// Insert a character named "Character {character_id}" into the trusted or untrusted list.
    pub async fn insert_trusted_character(
        &self,
        character_id: i64,
        corporation_id: i64,
        trusted: bool,
    ) -> Result<entity::trusted_character::Model, TestError> {
        Ok(
            entity::prelude::TrustedCharacter::insert(entity::trusted_character::ActiveModel {
                character_id: ActiveValue::Set(character_id),
                character_name: ActiveValue::Set(format!("Character {}", character_id)),
                corporation_id: ActiveValue::Set(corporation_id),
                corporation_name: ActiveValue::Set(format!("Corporation {}", corporation_id)),
                trusted: ActiveValue::Set(trusted),
                added_by: ActiveValue::Set("Fixture".to_string()),
                date_added: ActiveValue::Set(Utc::now().naive_utc()),
                comment: ActiveValue::Set(String::new()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a corporation named "Corporation {corporation_id}" into the trusted or untrusted
    /// list.
    pub async fn insert_trusted_corporation(
        &self,
        corporation_id: i64,
        alliance_id: Option<i64>,
        trusted: bool,
    ) -> Result<entity::trusted_corporation::Model, TestError> {
        Ok(entity::prelude::TrustedCorporation::insert(
            entity::trusted_corporation::ActiveModel {
                corporation_id: ActiveValue::Set(corporation_id),
                corporation_name: ActiveValue::Set(format!("Corporation {}", corporation_id)),
                alliance_id: ActiveValue::Set(alliance_id),
                alliance_name: ActiveValue::Set(
                    alliance_id.map(|id| format!("Alliance {}", id)),
                ),
                trusted: ActiveValue::Set(trusted),
                added_by: ActiveValue::Set("Fixture".to_string()),
                date_added: ActiveValue::Set(Utc::now().naive_utc()),
                comment: ActiveValue::Set(String::new()),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}
