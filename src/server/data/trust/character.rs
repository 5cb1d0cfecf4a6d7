use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::db::TrustedCharacterModel;

/// Data recorded for a character when it is added to a list.
pub struct NewTrustedCharacter {
    pub character_id: i64,
    pub character_name: String,
    pub corporation_id: i64,
    pub corporation_name: String,
    pub added_by: String,
}

pub struct TrustedCharacterRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TrustedCharacterRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Returns every character in the trusted or untrusted list in insertion order
    pub async fn get_all(&self, trusted: bool) -> Result<Vec<TrustedCharacterModel>, DbErr> {
        entity::prelude::TrustedCharacter::find()
            .filter(entity::trusted_character::Column::Trusted.eq(trusted))
            .order_by_asc(entity::trusted_character::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_by_character_id(
        &self,
        character_id: i64,
        trusted: bool,
    ) -> Result<Option<TrustedCharacterModel>, DbErr> {
        entity::prelude::TrustedCharacter::find()
            .filter(entity::trusted_character::Column::CharacterId.eq(character_id))
            .filter(entity::trusted_character::Column::Trusted.eq(trusted))
            .order_by_asc(entity::trusted_character::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        character: NewTrustedCharacter,
        trusted: bool,
    ) -> Result<TrustedCharacterModel, DbErr> {
        let character = entity::trusted_character::ActiveModel {
            character_id: ActiveValue::Set(character.character_id),
            character_name: ActiveValue::Set(character.character_name),
            corporation_id: ActiveValue::Set(character.corporation_id),
            corporation_name: ActiveValue::Set(character.corporation_name),
            trusted: ActiveValue::Set(trusted),
            added_by: ActiveValue::Set(character.added_by),
            date_added: ActiveValue::Set(Utc::now().naive_utc()),
            comment: ActiveValue::Set(String::new()),
            ..Default::default()
        };

        entity::prelude::TrustedCharacter::insert(character)
            .exec_with_returning(self.db)
            .await
    }

    /// Deletes every row for the character in the list, returning the number of rows removed
    pub async fn delete_by_character_id(
        &self,
        character_id: i64,
        trusted: bool,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::TrustedCharacter::delete_many()
            .filter(entity::trusted_character::Column::CharacterId.eq(character_id))
            .filter(entity::trusted_character::Column::Trusted.eq(trusted))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Sets the comment of the character in the list, returning the number of rows updated
    pub async fn update_comment(
        &self,
        character_id: i64,
        trusted: bool,
        comment: &str,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::TrustedCharacter::update_many()
            .col_expr(
                entity::trusted_character::Column::Comment,
                Expr::value(comment.to_string()),
            )
            .filter(entity::trusted_character::Column::CharacterId.eq(character_id))
            .filter(entity::trusted_character::Column::Trusted.eq(trusted))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
