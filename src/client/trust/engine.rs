//! Reconciliation of trust-list membership with the remote authority.
//!
//! Every mutation follows the same protocol: validate locally, call the remote authority, and
//! only once it confirms update the [`TrustStore`] and recompute the affected views. There is no
//! optimistic insert; until a request resolves the store reflects the state before it.
//!
//! The engine is single-threaded. Operations take `&self` and may be polled concurrently on one
//! executor; store borrows never span an `.await`.

use std::cell::{Cell, Ref, RefCell};

use dioxus_logger::tracing;

use crate::{
    client::{
        error::{RemoteError, TrustError},
        presentation::{NoticeLevel, PresentationAdapter, ViewMode},
        registry::{Identity, IdentityRegistry},
        remote::RemoteAuthority,
        trust::{
            cascade::{is_character_trusted, CascadeNotifier},
            identifier::{Identifier, IdentifierError},
            pending::{PendingGuard, PendingKey, PendingOperations, RequestCounter, RequestGuard},
            store::{StoreError, TrustStore},
        },
    },
    model::trust::{CommentDto, EntityKind, IdentifierDto, ListKey, TrustState, TrustedEntityDto},
};

/// Result of a confirmed removal.
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    /// Entries dropped from the local store, empty if none were present locally.
    pub removed: Vec<TrustedEntityDto>,
    /// Outcome of re-enrolling the identifier as untrusted, set for removals from a trusted list.
    pub demotion: Option<Result<TrustedEntityDto, TrustError>>,
}

pub struct ReconciliationEngine<R, P, I> {
    remote: R,
    presentation: P,
    registry: I,
    operator: Option<String>,
    store: RefCell<TrustStore>,
    pending: PendingOperations,
    requests: RequestCounter,
    view_mode: Cell<ViewMode>,
}

impl<R, P, I> ReconciliationEngine<R, P, I>
where
    R: RemoteAuthority,
    P: PresentationAdapter,
    I: IdentityRegistry,
{
    pub fn new(remote: R, presentation: P, registry: I) -> Self {
        Self {
            remote,
            presentation,
            registry,
            operator: None,
            store: RefCell::new(TrustStore::new()),
            pending: PendingOperations::default(),
            requests: RequestCounter::default(),
            view_mode: Cell::new(ViewMode::default()),
        }
    }

    /// Seeds the store with lists that were delivered alongside the page.
    pub fn with_store(self, store: TrustStore) -> Self {
        *self.store.borrow_mut() = store;
        self
    }

    /// Name sent to the remote authority as `added_by` for new entries.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    pub fn store(&self) -> Ref<'_, TrustStore> {
        self.store.borrow()
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn registry(&self) -> &I {
        &self.registry
    }

    /// Number of remote requests currently in flight.
    pub fn active_requests(&self) -> usize {
        self.requests.active()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode.get()
    }

    /// Whether an add or remove for this list and token is awaiting the remote authority.
    pub fn is_pending(&self, state: TrustState, kind: EntityKind, token: &str) -> bool {
        Identifier::resolve(token)
            .map(|identifier| {
                self.pending
                    .is_pending(ListKey::new(state, kind), &identifier)
            })
            .unwrap_or(false)
    }

    pub fn is_character_trusted(&self, character: &Identity) -> bool {
        is_character_trusted(&self.store.borrow(), character)
    }

    /// Replaces the store with the remote authority's lists, drops rows for entries that are
    /// gone and redraws everything.
    pub async fn load(&self) -> Result<(), TrustError> {
        let lists = {
            let _request = self.begin_request();
            self.remote.fetch_lists().await
        };

        let lists = lists.map_err(|e| {
            tracing::error!("Failed to load trust lists: {}", e);
            self.presentation
                .notify(NoticeLevel::Error, &format!("Failed to load trust lists. {}", e));
            TrustError::from(e)
        })?;

        let fresh = TrustStore::from_lists(lists);
        let stale = std::mem::replace(&mut *self.store.borrow_mut(), fresh);
        {
            let store = self.store.borrow();
            for list in ListKey::ALL {
                for entity in stale.entries(list) {
                    if !store.contains_id(list, entity.primary_id()) {
                        self.presentation.remove_row(list, entity.primary_id());
                    }
                }
            }
        }
        self.render_all();

        Ok(())
    }

    /// Renders every stored row, recomputes every tile and applies the current view mode.
    pub fn render_all(&self) {
        {
            let store = self.store.borrow();
            for list in ListKey::ALL {
                for entity in store.entries(list) {
                    self.presentation.render_row(list, entity);
                }
            }
            self.cascade().refresh_all(&store);
        }

        self.presentation.set_view_mode(self.view_mode.get());
    }

    /// Switches between the trusted and untrusted view.
    pub fn toggle_view(&self) -> ViewMode {
        let mode = self.view_mode.get().toggled();
        self.view_mode.set(mode);
        tracing::debug!("Switching to {:?} view", mode);
        self.presentation.set_view_mode(mode);
        mode
    }

    /// Adds an entity to a trust list.
    ///
    /// Rejected without a remote call when the token is invalid, when the opposite list already
    /// holds the identifier, or when an add or remove of the identifier is in flight for either
    /// list of this kind.
    pub async fn add(
        &self,
        state: TrustState,
        kind: EntityKind,
        token: &str,
    ) -> Result<TrustedEntityDto, TrustError> {
        let list = ListKey::new(state, kind);
        let identifier = self.resolve(kind, token)?;

        let opposite = list.opposite();
        if self.store.borrow().contains(opposite, &identifier) {
            return Err(self.conflict(kind, opposite.state, &identifier));
        }

        let _pending = self.begin_add_pending(list, &identifier)?;

        tracing::debug!("Adding {} {} with identifier: {}", state, kind, identifier);

        let request = IdentifierDto {
            identifier: identifier.to_string(),
            added_by: self.operator.clone(),
        };

        let response = {
            let _request = self.begin_request();
            self.remote.add(list, &request).await
        };

        let entity = response.map_err(|e| self.remote_failure("add", kind, e))?;

        // The canonical ID may differ from what the user typed, e.g. a name that resolved to an
        // entity listed under another name.
        if self.store.borrow().contains_id(opposite, entity.primary_id()) {
            return Err(self.conflict(kind, opposite.state, &identifier));
        }

        self.apply_addition(list, &entity)?;

        Ok(entity)
    }

    /// Removes an entity from a trust list by numeric ID.
    ///
    /// Removing from a trusted list re-adds the identifier as untrusted once the removal is
    /// confirmed, so a known entity never ends up in neither list.
    pub async fn remove(
        &self,
        state: TrustState,
        kind: EntityKind,
        token: &str,
    ) -> Result<Removal, TrustError> {
        let list = ListKey::new(state, kind);
        let identifier = self.resolve(kind, token)?;

        if identifier.as_id().is_none() {
            let error = IdentifierError::NotAnId(identifier.to_string());
            self.presentation.notify(NoticeLevel::Error, &error.to_string());
            return Err(error.into());
        }

        // Held until the demotion below resolves so the busy flag never drops in between.
        let _request;
        let removed = {
            let _pending = self.begin_pending(list, &identifier)?;

            tracing::debug!("Removing {} {} with identifier: {}", state, kind, identifier);

            let request = IdentifierDto {
                identifier: identifier.to_string(),
                added_by: None,
            };

            _request = self.begin_request();
            self.remote
                .remove(list, &request)
                .await
                .map_err(|e| self.remote_failure("remove", kind, e))?;

            self.apply_removal(list, &identifier)
        };

        let demotion = if state.is_trusted() {
            tracing::debug!(
                "Re-adding {} {} as untrusted after removal from trusted",
                kind,
                identifier
            );
            Some(
                self.add(TrustState::Untrusted, kind, &identifier.to_string())
                    .await,
            )
        } else {
            None
        };

        Ok(Removal { removed, demotion })
    }

    /// Asks the user to confirm, then removes. Returns `Ok(None)` when the user declines.
    pub async fn confirm_and_remove(
        &self,
        state: TrustState,
        kind: EntityKind,
        token: &str,
    ) -> Result<Option<Removal>, TrustError> {
        let identifier = self.resolve(kind, token)?;

        let name = self
            .store
            .borrow()
            .find(ListKey::new(state, kind), &identifier)
            .map(|entity| entity.name().to_string())
            .unwrap_or_else(|| identifier.to_string());

        let prompt = format!(
            "Are you sure you want to remove {} from the {} list?",
            name, state
        );
        if !self.presentation.confirm(&prompt).await {
            tracing::debug!("Removal of {} {} {} declined", state, kind, identifier);
            return Ok(None);
        }

        self.remove(state, kind, token).await.map(Some)
    }

    /// Tile click: promotes a character shown as untrusted to the trusted list.
    ///
    /// Ignored while any request is in flight or when the character already displays as trusted.
    pub async fn promote_character(
        &self,
        character_id: i64,
    ) -> Result<Option<TrustedEntityDto>, TrustError> {
        if self.requests.active() > 0 {
            tracing::debug!(
                "Ignoring promotion of character ID {}, a request is in progress",
                character_id
            );
            return Ok(None);
        }

        let Some(character) = self.registry.find_character(character_id) else {
            tracing::warn!("Character with ID {} not found", character_id);
            return Ok(None);
        };

        if self.is_character_trusted(&character) {
            tracing::debug!(
                "Ignoring promotion of character ID {}, already trusted",
                character_id
            );
            return Ok(None);
        }

        self.add(
            TrustState::Trusted,
            EntityKind::Character,
            &character_id.to_string(),
        )
        .await
        .map(Some)
    }

    /// Updates the comment on a list entry.
    ///
    /// Returns the updated local entry, or `None` if the entry is not in the local store.
    pub async fn update_comment(
        &self,
        list: ListKey,
        id: i64,
        comment: &str,
    ) -> Result<Option<TrustedEntityDto>, TrustError> {
        let identifier = Identifier::from_id(id).map_err(|e| {
            self.presentation.notify(NoticeLevel::Error, &e.to_string());
            TrustError::from(e)
        })?;

        let request = CommentDto {
            id,
            comment: comment.to_string(),
        };

        let response = {
            let _request = self.begin_request();
            self.remote.update_comment(list, &request).await
        };

        response.map_err(|e| {
            tracing::error!("Failed to update comment for {} {}: {}", list, id, e);
            self.presentation
                .notify(NoticeLevel::Error, &format!("Failed to update comment. {}", e));
            TrustError::from(e)
        })?;

        let updated = self
            .store
            .borrow()
            .find(list, &identifier)
            .map(|entity| entity.with_comment(comment));

        let Some(updated) = updated else {
            tracing::warn!(
                "{}",
                StoreError::NotFound {
                    list,
                    identifier: identifier.to_string()
                }
            );
            return Ok(None);
        };

        if let Err(e) = self.store.borrow_mut().replace(list, updated.clone()) {
            tracing::warn!("{}", e);
            return Ok(None);
        }

        self.presentation.render_row(list, &updated);

        Ok(Some(updated))
    }

    pub(crate) fn begin_request(&self) -> RequestGuard<'_, P> {
        self.requests.begin(&self.presentation)
    }

    fn begin_pending(
        &self,
        list: ListKey,
        identifier: &Identifier,
    ) -> Result<PendingGuard<'_>, TrustError> {
        self.pending
            .try_begin(PendingKey::new(list, identifier))
            .ok_or_else(|| {
                let error = TrustError::InFlight {
                    state: list.state,
                    kind: list.kind,
                    identifier: identifier.to_string(),
                };
                tracing::warn!("{}", error);
                self.presentation.notify(NoticeLevel::Warning, &error.to_string());
                error
            })
    }

    /// Claims `list` for an add, refusing while the opposite list has the identifier pending.
    ///
    /// Both checks run before the first `.await`, so two adds polled together cannot both pass.
    fn begin_add_pending(
        &self,
        list: ListKey,
        identifier: &Identifier,
    ) -> Result<PendingGuard<'_>, TrustError> {
        let opposite = list.opposite();
        if self.pending.is_pending(opposite, identifier) {
            let error = TrustError::InFlight {
                state: opposite.state,
                kind: opposite.kind,
                identifier: identifier.to_string(),
            };
            tracing::warn!("{}", error);
            self.presentation.notify(NoticeLevel::Warning, &error.to_string());
            return Err(error);
        }

        self.begin_pending(list, identifier)
    }

    fn cascade(&self) -> CascadeNotifier<'_, I, P> {
        CascadeNotifier::new(&self.registry, &self.presentation)
    }

    fn resolve(&self, kind: EntityKind, token: &str) -> Result<Identifier, TrustError> {
        Identifier::resolve(token).map_err(|e| {
            let message = match e {
                IdentifierError::Empty => format!("{} needs a name or id.", kind.label()),
                ref other => other.to_string(),
            };
            tracing::warn!("Rejected {} identifier {:?}: {}", kind, token, e);
            self.presentation.notify(NoticeLevel::Error, &message);
            TrustError::from(e)
        })
    }

    fn conflict(&self, kind: EntityKind, opposite: TrustState, identifier: &Identifier) -> TrustError {
        let error = TrustError::Conflict { kind, opposite };
        tracing::warn!(
            "{} with identifier {} is already in the {} list",
            kind.label(),
            identifier,
            opposite
        );
        self.presentation.notify(NoticeLevel::Warning, &error.to_string());
        error
    }

    fn remote_failure(&self, action: &str, kind: EntityKind, error: RemoteError) -> TrustError {
        tracing::error!("Error during {} of {}: {}", action, kind, error);
        self.presentation.notify(
            NoticeLevel::Error,
            &format!("Failed to {} {}. {}", action, kind, error),
        );
        TrustError::from(error)
    }

    fn apply_addition(&self, list: ListKey, entity: &TrustedEntityDto) -> Result<(), TrustError> {
        let inserted = self.store.borrow_mut().insert(list, entity.clone());

        match inserted {
            Ok(()) => {
                tracing::debug!(
                    "Added {} with ID {} to {} list",
                    list.kind,
                    entity.primary_id(),
                    list.state
                );
                self.presentation.render_row(list, entity);
                self.presentation.notify(
                    NoticeLevel::Success,
                    &format!("Added {} to {} list.", entity.name(), list.state.label()),
                );
                self.presentation.set_view_mode(self.view_mode.get());
            }
            Err(e @ StoreError::DuplicateEntity { .. }) => {
                tracing::warn!("{}", e);
                self.presentation.notify(
                    NoticeLevel::Warning,
                    &format!(
                        "{} already exists in the {} list.",
                        list.kind.label(),
                        list.state.label()
                    ),
                );
            }
            Err(e) => {
                tracing::error!("Discarding add response for {}: {}", list, e);
                let error = TrustError::KindMismatch {
                    expected: list.kind,
                    returned: entity.kind(),
                };
                self.presentation.notify(NoticeLevel::Error, &error.to_string());
                return Err(error);
            }
        }

        self.cascade()
            .on_entity_changed(&self.store.borrow(), list.kind, entity.primary_id());

        Ok(())
    }

    fn apply_removal(&self, list: ListKey, identifier: &Identifier) -> Vec<TrustedEntityDto> {
        let removed = self.store.borrow_mut().remove_by_identifier(list, identifier);

        let removed = match removed {
            Ok(removed) => {
                for entity in &removed {
                    self.presentation.remove_row(list, entity.primary_id());
                    self.presentation.notify(
                        NoticeLevel::Success,
                        &format!("Removed {} from {} list.", entity.name(), list.state.label()),
                    );
                }
                self.presentation.set_view_mode(self.view_mode.get());
                removed
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.presentation.notify(NoticeLevel::Warning, &e.to_string());
                Vec::new()
            }
        };

        if let Some(id) = identifier.as_id() {
            self.cascade()
                .on_entity_changed(&self.store.borrow(), list.kind, id);
        }

        removed
    }
}
