use sea_orm_migration::{prelude::*, schema::*};

/// A corporation is held by at most one list.
static IDX_TRUSTED_CORPORATION_CORPORATION_ID: &str = "idx-trusted_corporation-corporation_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrustedCorporation::Table)
                    .if_not_exists()
                    .col(pk_auto(TrustedCorporation::Id))
                    .col(big_integer(TrustedCorporation::CorporationId))
                    .col(string(TrustedCorporation::CorporationName))
                    .col(big_integer_null(TrustedCorporation::AllianceId))
                    .col(string_null(TrustedCorporation::AllianceName))
                    .col(boolean(TrustedCorporation::Trusted))
                    .col(string(TrustedCorporation::AddedBy))
                    .col(date_time(TrustedCorporation::DateAdded))
                    .col(text(TrustedCorporation::Comment))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TRUSTED_CORPORATION_CORPORATION_ID)
                    .table(TrustedCorporation::Table)
                    .col(TrustedCorporation::CorporationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TRUSTED_CORPORATION_CORPORATION_ID)
                    .table(TrustedCorporation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TrustedCorporation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TrustedCorporation {
    Table,
    Id,
    CorporationId,
    CorporationName,
    AllianceId,
    AllianceName,
    Trusted,
    AddedBy,
    DateAdded,
    Comment,
}
