//! Bookkeeping for outstanding remote requests.

use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
};

use crate::{
    client::{presentation::PresentationAdapter, trust::identifier::Identifier},
    model::trust::ListKey,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PendingKey {
    list: ListKey,
    identifier: String,
}

impl PendingKey {
    pub(crate) fn new(list: ListKey, identifier: &Identifier) -> Self {
        Self {
            list,
            identifier: identifier.normalized(),
        }
    }
}

/// Operations currently awaiting the remote authority, keyed by list and identifier.
#[derive(Debug, Default)]
pub(crate) struct PendingOperations {
    keys: RefCell<HashSet<PendingKey>>,
}

impl PendingOperations {
    /// Registers an operation, or returns `None` if the same key is already pending.
    pub(crate) fn try_begin(&self, key: PendingKey) -> Option<PendingGuard<'_>> {
        if !self.keys.borrow_mut().insert(key.clone()) {
            return None;
        }

        Some(PendingGuard { operations: self, key })
    }

    pub(crate) fn is_pending(&self, list: ListKey, identifier: &Identifier) -> bool {
        self.keys
            .borrow()
            .contains(&PendingKey::new(list, identifier))
    }
}

pub(crate) struct PendingGuard<'a> {
    operations: &'a PendingOperations,
    key: PendingKey,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.operations.keys.borrow_mut().remove(&self.key);
    }
}

/// Counts requests in flight across all operations.
#[derive(Debug, Default)]
pub(crate) struct RequestCounter {
    active: Cell<usize>,
}

impl RequestCounter {
    pub(crate) fn active(&self) -> usize {
        self.active.get()
    }

    /// Counts a request until the guard drops, raising the busy flag on the first one.
    pub(crate) fn begin<'a, P: PresentationAdapter>(
        &'a self,
        presentation: &'a P,
    ) -> RequestGuard<'a, P> {
        let active = self.active.get();
        self.active.set(active + 1);
        if active == 0 {
            presentation.set_busy(true);
        }

        RequestGuard {
            counter: self,
            presentation,
        }
    }
}

pub(crate) struct RequestGuard<'a, P: PresentationAdapter> {
    counter: &'a RequestCounter,
    presentation: &'a P,
}

impl<P: PresentationAdapter> Drop for RequestGuard<'_, P> {
    fn drop(&mut self) {
        let active = self.counter.active.get().saturating_sub(1);
        self.counter.active.set(active);
        if active == 0 {
            self.presentation.set_busy(false);
        }
    }
}
