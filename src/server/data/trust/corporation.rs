use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::db::TrustedCorporationModel;

/// Data recorded for a corporation when it is added to a list.
pub struct NewTrustedCorporation {
    pub corporation_id: i64,
    pub corporation_name: String,
    pub alliance_id: Option<i64>,
    pub alliance_name: Option<String>,
    pub added_by: String,
}

pub struct TrustedCorporationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TrustedCorporationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Returns every corporation in the trusted or untrusted list in insertion order
    pub async fn get_all(&self, trusted: bool) -> Result<Vec<TrustedCorporationModel>, DbErr> {
        entity::prelude::TrustedCorporation::find()
            .filter(entity::trusted_corporation::Column::Trusted.eq(trusted))
            .order_by_asc(entity::trusted_corporation::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_by_corporation_id(
        &self,
        corporation_id: i64,
        trusted: bool,
    ) -> Result<Option<TrustedCorporationModel>, DbErr> {
        entity::prelude::TrustedCorporation::find()
            .filter(entity::trusted_corporation::Column::CorporationId.eq(corporation_id))
            .filter(entity::trusted_corporation::Column::Trusted.eq(trusted))
            .order_by_asc(entity::trusted_corporation::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        corporation: NewTrustedCorporation,
        trusted: bool,
    ) -> Result<TrustedCorporationModel, DbErr> {
        let corporation = entity::trusted_corporation::ActiveModel {
            corporation_id: ActiveValue::Set(corporation.corporation_id),
            corporation_name: ActiveValue::Set(corporation.corporation_name),
            alliance_id: ActiveValue::Set(corporation.alliance_id),
            alliance_name: ActiveValue::Set(corporation.alliance_name),
            trusted: ActiveValue::Set(trusted),
            added_by: ActiveValue::Set(corporation.added_by),
            date_added: ActiveValue::Set(Utc::now().naive_utc()),
            comment: ActiveValue::Set(String::new()),
            ..Default::default()
        };

        entity::prelude::TrustedCorporation::insert(corporation)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn delete_by_corporation_id(
        &self,
        corporation_id: i64,
        trusted: bool,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::TrustedCorporation::delete_many()
            .filter(entity::trusted_corporation::Column::CorporationId.eq(corporation_id))
            .filter(entity::trusted_corporation::Column::Trusted.eq(trusted))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn update_comment(
        &self,
        corporation_id: i64,
        trusted: bool,
        comment: &str,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::TrustedCorporation::update_many()
            .col_expr(
                entity::trusted_corporation::Column::Comment,
                Expr::value(comment.to_string()),
            )
            .filter(entity::trusted_corporation::Column::CorporationId.eq(corporation_id))
            .filter(entity::trusted_corporation::Column::Trusted.eq(trusted))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
