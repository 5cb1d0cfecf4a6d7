use sea_orm_migration::{prelude::*, schema::*};

/// A character is held by at most one list.
static IDX_TRUSTED_CHARACTER_CHARACTER_ID: &str = "idx-trusted_character-character_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrustedCharacter::Table)
                    .if_not_exists()
                    .col(pk_auto(TrustedCharacter::Id))
                    .col(big_integer(TrustedCharacter::CharacterId))
                    .col(string(TrustedCharacter::CharacterName))
                    .col(big_integer(TrustedCharacter::CorporationId))
                    .col(string(TrustedCharacter::CorporationName))
                    .col(boolean(TrustedCharacter::Trusted))
                    .col(string(TrustedCharacter::AddedBy))
                    .col(date_time(TrustedCharacter::DateAdded))
                    .col(text(TrustedCharacter::Comment))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TRUSTED_CHARACTER_CHARACTER_ID)
                    .table(TrustedCharacter::Table)
                    .col(TrustedCharacter::CharacterId)
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
                    .name(IDX_TRUSTED_CHARACTER_CHARACTER_ID)
                    .table(TrustedCharacter::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TrustedCharacter::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TrustedCharacter {
    Table,
    Id,
    CharacterId,
    CharacterName,
    CorporationId,
    CorporationName,
    Trusted,
    AddedBy,
    DateAdded,
    Comment,
}
