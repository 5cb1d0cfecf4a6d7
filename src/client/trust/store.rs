//! In-memory projection of the four trust lists.
//!
//! The store deduplicates within a single list only. Keeping an ID out of both the trusted and
//! untrusted list of the same kind is the reconciliation engine's job.

use thiserror::Error;

use crate::{
    client::trust::identifier::Identifier,
    model::trust::{EntityKind, ListKey, TrustListsDto, TrustedEntityDto},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{} with ID {id} already exists in the {list} list", .list.kind.label())]
    DuplicateEntity { list: ListKey, id: i64 },
    #[error("No entry matching {identifier} in the {list} list")]
    NotFound { list: ListKey, identifier: String },
    #[error("Cannot store a {entity_kind} in the {list} list")]
    KindMismatch { list: ListKey, entity_kind: EntityKind },
}

#[derive(Clone, Debug, Default)]
pub struct TrustStore {
    trusted_characters: Vec<TrustedEntityDto>,
    trusted_corporations: Vec<TrustedEntityDto>,
    untrusted_characters: Vec<TrustedEntityDto>,
    untrusted_corporations: Vec<TrustedEntityDto>,
}

impl TrustStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lists(lists: TrustListsDto) -> Self {
        fn wrap<T: Into<TrustedEntityDto>>(entries: Vec<T>) -> Vec<TrustedEntityDto> {
            entries.into_iter().map(Into::into).collect()
        }

        Self {
            trusted_characters: wrap(lists.trusted_characters),
            trusted_corporations: wrap(lists.trusted_corporations),
            untrusted_characters: wrap(lists.untrusted_characters),
            untrusted_corporations: wrap(lists.untrusted_corporations),
        }
    }

    /// Entries of a list in insertion (display) order.
    pub fn entries(&self, list: ListKey) -> &[TrustedEntityDto] {
        self.list(list)
    }

    pub fn len(&self, list: ListKey) -> usize {
        self.list(list).len()
    }

    pub fn is_empty(&self, list: ListKey) -> bool {
        self.list(list).is_empty()
    }

    pub fn contains(&self, list: ListKey, identifier: &Identifier) -> bool {
        self.list(list).iter().any(|entity| identifier.matches(entity))
    }

    pub fn contains_id(&self, list: ListKey, id: i64) -> bool {
        self.list(list).iter().any(|entity| entity.primary_id() == id)
    }

    pub fn get(&self, list: ListKey, id: i64) -> Option<&TrustedEntityDto> {
        self.list(list).iter().find(|entity| entity.primary_id() == id)
    }

    /// Finds the first entry an identifier refers to.
    pub fn find(&self, list: ListKey, identifier: &Identifier) -> Option<&TrustedEntityDto> {
        self.list(list).iter().find(|entity| identifier.matches(entity))
    }

    /// Appends an entity unless one with the same primary ID is already in the list.
    pub fn insert(&mut self, list: ListKey, entity: TrustedEntityDto) -> Result<(), StoreError> {
        if entity.kind() != list.kind {
            return Err(StoreError::KindMismatch {
                list,
                entity_kind: entity.kind(),
            });
        }

        let id = entity.primary_id();
        let entries = self.list_mut(list);
        if entries.iter().any(|existing| existing.primary_id() == id) {
            return Err(StoreError::DuplicateEntity { list, id });
        }

        entries.push(entity);
        Ok(())
    }

    /// Removes every entry whose primary ID equals the identifier.
    ///
    /// Name identifiers never match here; removal is keyed by ID only.
    pub fn remove_by_identifier(
        &mut self,
        list: ListKey,
        identifier: &Identifier,
    ) -> Result<Vec<TrustedEntityDto>, StoreError> {
        let not_found = || StoreError::NotFound {
            list,
            identifier: identifier.to_string(),
        };

        let Some(id) = identifier.as_id() else {
            return Err(not_found());
        };

        let entries = self.list_mut(list);
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(entries)
            .into_iter()
            .partition(|entity| entity.primary_id() == id);
        *entries = kept;

        if removed.is_empty() {
            return Err(not_found());
        }

        Ok(removed)
    }

    /// Replaces the entry with the same primary ID in place, keeping its position.
    pub fn replace(&mut self, list: ListKey, entity: TrustedEntityDto) -> Result<(), StoreError> {
        let id = entity.primary_id();
        match self
            .list_mut(list)
            .iter_mut()
            .find(|existing| existing.primary_id() == id)
        {
            Some(existing) => {
                *existing = entity;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                list,
                identifier: id.to_string(),
            }),
        }
    }

    fn list(&self, list: ListKey) -> &Vec<TrustedEntityDto> {
        match (list.state.is_trusted(), list.kind) {
            (true, EntityKind::Character) => &self.trusted_characters,
            (true, EntityKind::Corporation) => &self.trusted_corporations,
            (false, EntityKind::Character) => &self.untrusted_characters,
            (false, EntityKind::Corporation) => &self.untrusted_corporations,
        }
    }

    fn list_mut(&mut self, list: ListKey) -> &mut Vec<TrustedEntityDto> {
        match (list.state.is_trusted(), list.kind) {
            (true, EntityKind::Character) => &mut self.trusted_characters,
            (true, EntityKind::Corporation) => &mut self.trusted_corporations,
            (false, EntityKind::Character) => &mut self.untrusted_characters,
            (false, EntityKind::Corporation) => &mut self.untrusted_corporations,
        }
    }
}
