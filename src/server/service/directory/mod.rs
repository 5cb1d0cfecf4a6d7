//! Entity lookups against EVE Online's ESI.
//!
//! Every lookup runs inside a [`RetryContext`] so a transient ESI failure part way through a
//! multi-request lookup only repeats the requests that have not succeeded yet.

use std::time::Duration;

use dioxus_logger::tracing;
use eve_esi::model::{alliance::Alliance, character::Character, corporation::Corporation};
use serde::Deserialize;

use crate::{
    model::trust::EntityKind,
    server::{
        data::trust::{character::NewTrustedCharacter, corporation::NewTrustedCorporation},
        error::Error,
        service::retry::RetryContext,
    },
};

#[cfg(test)]
mod tests;

#[derive(Clone, Default)]
struct CharacterLookupCache {
    character: Option<Character>,
    corporation: Option<Corporation>,
}

#[derive(Clone, Default)]
struct CorporationLookupCache {
    corporation: Option<Corporation>,
    alliance: Option<Alliance>,
}

#[derive(Clone, Debug, Deserialize)]
struct UniverseName {
    id: i64,
    name: String,
}

/// Response of `POST /universe/ids/`; categories without a match are omitted.
#[derive(Clone, Debug, Default, Deserialize)]
struct UniverseIds {
    #[serde(default)]
    characters: Vec<UniverseName>,
    #[serde(default)]
    corporations: Vec<UniverseName>,
}

impl UniverseIds {
    /// ID of the first entry of `kind` whose name matches `name` ignoring case
    fn find(&self, kind: EntityKind, name: &str) -> Option<i64> {
        let entries = match kind {
            EntityKind::Character => &self.characters,
            EntityKind::Corporation => &self.corporations,
        };

        entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| entry.id)
    }
}

pub struct DirectoryService<'a> {
    esi_client: &'a eve_esi::Client,
    http_client: &'a reqwest::Client,
    esi_url: &'a str,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl<'a> DirectoryService<'a> {
    /// Creates a new instance of [`DirectoryService`]
    pub fn new(
        esi_client: &'a eve_esi::Client,
        http_client: &'a reqwest::Client,
        esi_url: &'a str,
    ) -> Self {
        Self {
            esi_client,
            http_client,
            esi_url: esi_url.trim_end_matches('/'),
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }

    /// Override the retry policy used for every lookup
    pub fn with_retry(mut self, max_attempts: u32, initial_backoff: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.initial_backoff = initial_backoff;
        self
    }

    fn retry_context<T: Clone + Default>(&self) -> RetryContext<T> {
        RetryContext::with_backoff(self.max_attempts, self.initial_backoff)
    }

    /// Resolves an exact entity name to its ID
    ///
    /// # Returns
    /// - `Ok(Some(id))` - ESI knows an entity of `kind` with that name
    /// - `Ok(None)` - No entity of `kind` matches the name
    /// - `Err(Error)` - ESI could not be reached or answered with an unexpected error
    pub async fn resolve_name(&self, kind: EntityKind, name: &str) -> Result<Option<i64>, Error> {
        let mut ctx: RetryContext<()> = self.retry_context();

        let http_client = self.http_client.clone();
        let url = format!("{}/universe/ids/", self.esi_url);
        let names = vec![name.to_string()];

        let description = format!("{} name lookup of \"{}\"", kind, name);
        let ids = ctx
            .execute_with_retry(&description, |_| {
                let http_client = http_client.clone();
                let url = url.clone();
                let names = names.clone();

                Box::pin(async move {
                    let response = http_client.post(&url).json(&names).send().await?;

                    if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Ok(UniverseIds::default());
                    }

                    let ids = response.error_for_status()?.json::<UniverseIds>().await?;

                    Ok(ids)
                })
            })
            .await?;

        let id = ids.find(kind, name);
        if id.is_none() {
            tracing::debug!("No {} named \"{}\" found on ESI", kind, name);
        }

        Ok(id)
    }

    /// Fetches a character and the name of its corporation
    pub async fn character_details(
        &self,
        character_id: i64,
        added_by: String,
    ) -> Result<NewTrustedCharacter, Error> {
        let mut ctx: RetryContext<CharacterLookupCache> = self.retry_context();

        let esi_client = self.esi_client.clone();

        let description = format!("lookup of character ID {}", character_id);
        let (character, corporation) = ctx
            .execute_with_retry(&description, |cache| {
                let esi_client = esi_client.clone();

                Box::pin(async move {
                    let character = match &cache.character {
                        Some(character) => character.clone(),
                        None => {
                            let character = esi_client
                                .character()
                                .get_character_public_information(character_id)
                                .await?;
                            cache.character = Some(character.clone());
                            character
                        }
                    };

                    let corporation = match &cache.corporation {
                        Some(corporation) => corporation.clone(),
                        None => {
                            let corporation = esi_client
                                .corporation()
                                .get_corporation_information(character.corporation_id)
                                .await?;
                            cache.corporation = Some(corporation.clone());
                            corporation
                        }
                    };

                    Ok((character, corporation))
                })
            })
            .await?;

        Ok(NewTrustedCharacter {
            character_id,
            character_name: character.name,
            corporation_id: character.corporation_id,
            corporation_name: corporation.name,
            added_by,
        })
    }

    /// Fetches a corporation and, when it is in one, the name of its alliance
    pub async fn corporation_details(
        &self,
        corporation_id: i64,
        added_by: String,
    ) -> Result<NewTrustedCorporation, Error> {
        let mut ctx: RetryContext<CorporationLookupCache> = self.retry_context();

        let esi_client = self.esi_client.clone();

        let description = format!("lookup of corporation ID {}", corporation_id);
        let (corporation, alliance) = ctx
            .execute_with_retry(&description, |cache| {
                let esi_client = esi_client.clone();

                Box::pin(async move {
                    let corporation = match &cache.corporation {
                        Some(corporation) => corporation.clone(),
                        None => {
                            let corporation = esi_client
                                .corporation()
                                .get_corporation_information(corporation_id)
                                .await?;
                            cache.corporation = Some(corporation.clone());
                            corporation
                        }
                    };

                    let alliance = match (corporation.alliance_id, &cache.alliance) {
                        (None, _) => None,
                        (Some(_), Some(alliance)) => Some(alliance.clone()),
                        (Some(alliance_id), None) => {
                            let alliance = esi_client
                                .alliance()
                                .get_alliance_information(alliance_id)
                                .await?;
                            cache.alliance = Some(alliance.clone());
                            Some(alliance)
                        }
                    };

                    Ok((corporation, alliance))
                })
            })
            .await?;

        Ok(NewTrustedCorporation {
            corporation_id,
            corporation_name: corporation.name,
            alliance_id: corporation.alliance_id,
            alliance_name: alliance.map(|alliance| alliance.name),
            added_by,
        })
    }
}
