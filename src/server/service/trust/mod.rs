//! Trust-list membership: validation, conflict detection and persistence.

use dioxus_logger::tracing;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::{
        api::MessageDto,
        trust::{CommentDto, EntityKind, IdentifierDto, ListKey, TrustListsDto, TrustedEntityDto},
    },
    server::{
        data::trust::{
            character::{NewTrustedCharacter, TrustedCharacterRepository},
            corporation::{NewTrustedCorporation, TrustedCorporationRepository},
        },
        error::{trust::TrustError, Error},
        service::directory::DirectoryService,
    },
};

#[cfg(test)]
mod tests;

/// Recorded as `added_by` when a request does not name who added the entry.
pub static UNKNOWN_ADDED_BY: &str = "Unknown";

pub struct TrustService<'a> {
    db: &'a DatabaseConnection,
    directory: DirectoryService<'a>,
}

impl<'a> TrustService<'a> {
    /// Creates a new instance of [`TrustService`]
    pub fn new(db: &'a DatabaseConnection, directory: DirectoryService<'a>) -> Self {
        Self { db, directory }
    }

    /// Returns all four lists, each in the order entries were added
    pub async fn get_lists(&self) -> Result<TrustListsDto, Error> {
        let character_repo = TrustedCharacterRepository::new(self.db);
        let corporation_repo = TrustedCorporationRepository::new(self.db);

        Ok(TrustListsDto {
            trusted_characters: into_dtos(character_repo.get_all(true).await?),
            trusted_corporations: into_dtos(corporation_repo.get_all(true).await?),
            untrusted_characters: into_dtos(character_repo.get_all(false).await?),
            untrusted_corporations: into_dtos(corporation_repo.get_all(false).await?),
        })
    }

    /// Validates the identifier against ESI and adds the entity to the list
    ///
    /// Adding an entity the list already holds returns the stored record unchanged. The
    /// exclusivity check and the insert share one transaction, and the unique index on the
    /// entity ID turns a racing insert into a conflict.
    ///
    /// # Returns
    /// - `Ok(TrustedEntityDto)` - The stored record for the entity
    /// - `Err(TrustError::ResolutionFailed)` - Identifier is empty, not a positive ID, or an
    ///   unknown name
    /// - `Err(TrustError::Conflict)` - The entity is held by the opposite list
    /// - `Err(TrustError::RetrievalFailed)` - ESI lookup of the entity failed
    pub async fn add(
        &self,
        list: ListKey,
        request: IdentifierDto,
    ) -> Result<TrustedEntityDto, Error> {
        let identifier = request.identifier.trim();
        let entity_id = self.resolve(list.kind, identifier).await?;

        // Answer from the database before spending ESI requests on a known entity.
        if let Some(existing) = check_membership(self.db, list, entity_id).await? {
            return Ok(existing);
        }

        let added_by = request
            .added_by
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_ADDED_BY.to_string());

        let details = match list.kind {
            EntityKind::Character => NewEntity::Character(
                self.directory
                    .character_details(entity_id, added_by)
                    .await
                    .map_err(|e| retrieval_failed(identifier, e))?,
            ),
            EntityKind::Corporation => NewEntity::Corporation(
                self.directory
                    .corporation_details(entity_id, added_by)
                    .await
                    .map_err(|e| retrieval_failed(identifier, e))?,
            ),
        };

        let txn = self.db.begin().await?;

        if let Some(existing) = check_membership(&txn, list, entity_id).await? {
            txn.commit().await?;
            return Ok(existing);
        }

        let trusted = list.state.is_trusted();
        let created: Result<TrustedEntityDto, DbErr> = match details {
            NewEntity::Character(character) => TrustedCharacterRepository::new(&txn)
                .create(character, trusted)
                .await
                .map(TrustedEntityDto::from),
            NewEntity::Corporation(corporation) => TrustedCorporationRepository::new(&txn)
                .create(corporation, trusted)
                .await
                .map(TrustedEntityDto::from),
        };

        let entity = match created {
            Ok(entity) => {
                txn.commit().await?;
                entity
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                txn.rollback().await?;
                tracing::debug!("{} ID {} was added concurrently: {}", list.kind, entity_id, e);

                return match check_membership(self.db, list, entity_id).await? {
                    Some(existing) => Ok(existing),
                    None => Err(conflict(list).into()),
                };
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Added {} to {}", entity.name(), list);

        Ok(entity)
    }

    /// Removes every entry for the ID from the list
    ///
    /// Removing an ID the list does not hold still succeeds.
    pub async fn remove(&self, list: ListKey, request: IdentifierDto) -> Result<MessageDto, Error> {
        let identifier = request.identifier.trim();
        let entity_id = match identifier.parse::<i64>() {
            Ok(id) if id > 0 => id,
            _ => return Err(TrustError::InvalidRemovalId(identifier.to_string()).into()),
        };

        let trusted = list.state.is_trusted();
        let removed = match list.kind {
            EntityKind::Character => {
                TrustedCharacterRepository::new(self.db)
                    .delete_by_character_id(entity_id, trusted)
                    .await?
            }
            EntityKind::Corporation => {
                TrustedCorporationRepository::new(self.db)
                    .delete_by_corporation_id(entity_id, trusted)
                    .await?
            }
        };

        if removed == 0 {
            tracing::debug!("{} ID {} was not in {}", list.kind, entity_id, list);
        } else {
            tracing::info!("Removed {} ID {} from {}", list.kind, entity_id, list);
        }

        Ok(MessageDto::new(format!(
            "{} {} removed successfully",
            list.state.label(),
            list.kind
        )))
    }

    /// Replaces the comment on an entry
    ///
    /// # Returns
    /// - `Ok(MessageDto)` - The comment was stored
    /// - `Err(TrustError::EntryNotFound)` - The list does not hold the ID
    pub async fn update_comment(
        &self,
        list: ListKey,
        request: CommentDto,
    ) -> Result<MessageDto, Error> {
        let trusted = list.state.is_trusted();
        let updated = match list.kind {
            EntityKind::Character => {
                TrustedCharacterRepository::new(self.db)
                    .update_comment(request.id, trusted, &request.comment)
                    .await?
            }
            EntityKind::Corporation => {
                TrustedCorporationRepository::new(self.db)
                    .update_comment(request.id, trusted, &request.comment)
                    .await?
            }
        };

        if updated == 0 {
            return Err(TrustError::EntryNotFound.into());
        }

        Ok(MessageDto::new("Comment updated successfully"))
    }

    /// Positive numeric IDs are taken as is, anything else is looked up as a name
    async fn resolve(&self, kind: EntityKind, identifier: &str) -> Result<i64, Error> {
        let resolution_failed = || TrustError::ResolutionFailed(identifier.to_string());

        if identifier.is_empty() {
            return Err(resolution_failed().into());
        }

        if identifier.bytes().all(|b| b.is_ascii_digit()) {
            return match identifier.parse::<i64>() {
                Ok(id) if id > 0 => Ok(id),
                _ => Err(resolution_failed().into()),
            };
        }

        match self.directory.resolve_name(kind, identifier).await {
            Ok(Some(id)) => Ok(id),
            Ok(None) => Err(resolution_failed().into()),
            Err(e) => {
                tracing::warn!("Failed to resolve {} name \"{}\": {}", kind, identifier, e);

                Err(resolution_failed().into())
            }
        }
    }
}

/// Details fetched from ESI for an entity about to be stored.
enum NewEntity {
    Character(NewTrustedCharacter),
    Corporation(NewTrustedCorporation),
}

/// Conflict if the opposite list holds the entity, the stored record if `list` already does
async fn check_membership<C: ConnectionTrait>(
    db: &C,
    list: ListKey,
    entity_id: i64,
) -> Result<Option<TrustedEntityDto>, Error> {
    if find(db, list.opposite(), entity_id).await?.is_some() {
        return Err(conflict(list).into());
    }

    let existing = find(db, list, entity_id).await?;
    if existing.is_some() {
        tracing::debug!("{} ID {} is already in the {} list", list.kind, entity_id, list.state);
    }

    Ok(existing)
}

async fn find<C: ConnectionTrait>(
    db: &C,
    list: ListKey,
    entity_id: i64,
) -> Result<Option<TrustedEntityDto>, DbErr> {
    let trusted = list.state.is_trusted();
    let entity = match list.kind {
        EntityKind::Character => TrustedCharacterRepository::new(db)
            .find_by_character_id(entity_id, trusted)
            .await?
            .map(TrustedEntityDto::from),
        EntityKind::Corporation => TrustedCorporationRepository::new(db)
            .find_by_corporation_id(entity_id, trusted)
            .await?
            .map(TrustedEntityDto::from),
    };

    Ok(entity)
}

fn conflict(list: ListKey) -> TrustError {
    TrustError::Conflict {
        kind: list.kind,
        opposite: list.state.opposite(),
    }
}

fn into_dtos<M, D: From<M>>(models: Vec<M>) -> Vec<D> {
    models.into_iter().map(D::from).collect()
}

fn retrieval_failed(identifier: &str, error: Error) -> Error {
    tracing::error!("Entity data retrieval for \"{}\" failed: {}", identifier, error);

    TrustError::RetrievalFailed(identifier.to_string()).into()
}
