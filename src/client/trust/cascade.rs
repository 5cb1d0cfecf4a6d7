//! Display-trust derivation for character tiles.
//!
//! A character is shown as trusted when it is listed as a trusted character itself or when its
//! corporation is a trusted corporation. The derivation only reads the trust store.

use dioxus_logger::tracing;

use crate::{
    client::{
        presentation::PresentationAdapter,
        registry::{Identity, IdentityRegistry},
        trust::store::TrustStore,
    },
    model::trust::{EntityKind, ListKey},
};

/// Display trust of a character: its own ID is trusted or its corporation is trusted.
pub fn is_character_trusted(store: &TrustStore, character: &Identity) -> bool {
    store.contains_id(ListKey::TRUSTED_CHARACTERS, character.character_id)
        || store.contains_id(ListKey::TRUSTED_CORPORATIONS, character.corporation_id)
}

/// Tile recompute emitted for a single character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileUpdate {
    pub character_id: i64,
    pub trusted: bool,
}

pub struct CascadeNotifier<'a, I, P> {
    registry: &'a I,
    presentation: &'a P,
}

impl<'a, I: IdentityRegistry, P: PresentationAdapter> CascadeNotifier<'a, I, P> {
    pub fn new(registry: &'a I, presentation: &'a P) -> Self {
        Self {
            registry,
            presentation,
        }
    }

    /// Recomputes every tile affected by a change to the entity with `primary_id`.
    ///
    /// A character change touches that character's tile only, a corporation change fans out to
    /// every known member of the corporation.
    pub fn on_entity_changed(
        &self,
        store: &TrustStore,
        kind: EntityKind,
        primary_id: i64,
    ) -> Vec<TileUpdate> {
        let affected = match kind {
            EntityKind::Character => match self.registry.find_character(primary_id) {
                Some(character) => vec![character],
                None => {
                    tracing::debug!(
                        "Character with ID {} is not a known identity, no tile to update",
                        primary_id
                    );
                    Vec::new()
                }
            },
            EntityKind::Corporation => self.registry.find_characters_by_corporation(primary_id),
        };

        self.apply(store, affected)
    }

    /// Recomputes the tile of every known character.
    pub fn refresh_all(&self, store: &TrustStore) -> Vec<TileUpdate> {
        self.apply(store, self.registry.characters())
    }

    fn apply(&self, store: &TrustStore, characters: Vec<Identity>) -> Vec<TileUpdate> {
        characters
            .iter()
            .map(|character| {
                let trusted = is_character_trusted(store, character);
                self.presentation
                    .set_tile_trust(character.character_id, trusted);

                tracing::debug!(
                    "Updated trust status for character ID {}: {}",
                    character.character_id,
                    if trusted { "trusted" } else { "untrusted" }
                );

                TileUpdate {
                    character_id: character.character_id,
                    trusted,
                }
            })
            .collect()
    }
}
