//! Writes the trust lists into a character's in-game contacts.
//!
//! Trusted characters and corporations are added as contacts, untrusted ones are removed. ESI
//! caps the IDs per request, so the IDs are sent in batches. A [`RetryContext`] counts the
//! batches already written so a retry resumes after the last one ESI accepted.

use std::time::Duration;

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    model::api::MessageDto,
    server::{
        data::trust::{
            character::TrustedCharacterRepository, corporation::TrustedCorporationRepository,
        },
        error::{contacts::ContactsError, Error},
        service::retry::RetryContext,
    },
};

#[cfg(test)]
mod tests;

/// Most contact IDs ESI accepts in one `POST /characters/{id}/contacts/`.
pub const ADD_BATCH_SIZE: usize = 100;
/// Most contact IDs ESI accepts in one `DELETE /characters/{id}/contacts/`.
pub const DELETE_BATCH_SIZE: usize = 20;
/// Standing given to every added contact.
pub static CONTACT_STANDING: &str = "5.0";

pub struct ContactsService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    esi_url: &'a str,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl<'a> ContactsService<'a> {
    /// Creates a new instance of [`ContactsService`]
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        esi_url: &'a str,
    ) -> Self {
        Self {
            db,
            http_client,
            esi_url: esi_url.trim_end_matches('/'),
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }

    /// Override the retry policy used for every batch
    pub fn with_retry(mut self, max_attempts: u32, initial_backoff: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.initial_backoff = initial_backoff;
        self
    }

    /// Adds every trusted character and corporation to the character's contacts
    ///
    /// # Returns
    /// - `Ok(MessageDto)` - Every batch was written, or there was nothing to write
    /// - `Err(ContactsError::InvalidCharacterId)` - The character ID is not positive
    /// - `Err(ContactsError::EsiRejected)` - ESI refused a batch
    pub async fn add_contacts(
        &self,
        character_id: i64,
        access_token: &str,
    ) -> Result<MessageDto, Error> {
        validate_character_id(character_id)?;

        let contact_ids = self.contact_ids(true).await?;
        if contact_ids.is_empty() {
            return Ok(MessageDto::new("No contacts to add"));
        }

        let url = self.contacts_url(character_id);
        let http_client = self.http_client.clone();
        let access_token = access_token.to_string();
        let batches = into_batches(&contact_ids, ADD_BATCH_SIZE);

        let mut ctx: RetryContext<usize> = self.retry_context();
        let description = format!("contacts add for character ID {}", character_id);
        ctx.execute_with_retry(&description, |written| {
            let http_client = http_client.clone();
            let url = url.clone();
            let access_token = access_token.clone();
            let batches = batches.clone();

            Box::pin(async move {
                while let Some(batch) = batches.get(*written) {
                    http_client
                        .post(&url)
                        .query(&[("standing", CONTACT_STANDING)])
                        .bearer_auth(&access_token)
                        .json(batch)
                        .send()
                        .await?
                        .error_for_status()?;
                    *written += 1;
                }

                Ok(())
            })
        })
        .await
        .map_err(|e| esi_rejected("adding", e))?;

        tracing::info!(
            "Added {} contacts for character ID {}",
            contact_ids.len(),
            character_id
        );

        Ok(MessageDto::new("Contacts added successfully"))
    }

    /// Removes every untrusted character and corporation from the character's contacts
    ///
    /// # Returns
    /// - `Ok(MessageDto)` - Every batch was removed, or there was nothing to remove
    /// - `Err(ContactsError::InvalidCharacterId)` - The character ID is not positive
    /// - `Err(ContactsError::EsiRejected)` - ESI refused a batch
    pub async fn delete_contacts(
        &self,
        character_id: i64,
        access_token: &str,
    ) -> Result<MessageDto, Error> {
        validate_character_id(character_id)?;

        let contact_ids = self.contact_ids(false).await?;
        if contact_ids.is_empty() {
            return Ok(MessageDto::new("No contacts to delete"));
        }

        let url = self.contacts_url(character_id);
        let http_client = self.http_client.clone();
        let access_token = access_token.to_string();
        let batches = into_batches(&contact_ids, DELETE_BATCH_SIZE);

        let mut ctx: RetryContext<usize> = self.retry_context();
        let description = format!("contacts delete for character ID {}", character_id);
        ctx.execute_with_retry(&description, |deleted| {
            let http_client = http_client.clone();
            let url = url.clone();
            let access_token = access_token.clone();
            let batches = batches.clone();

            Box::pin(async move {
                while let Some(batch) = batches.get(*deleted) {
                    let query: Vec<(&str, i64)> =
                        batch.iter().map(|id| ("contact_ids", *id)).collect();

                    http_client
                        .delete(&url)
                        .query(&query)
                        .bearer_auth(&access_token)
                        .send()
                        .await?
                        .error_for_status()?;
                    *deleted += 1;
                }

                Ok(())
            })
        })
        .await
        .map_err(|e| esi_rejected("deleting", e))?;

        tracing::info!(
            "Deleted {} contacts for character ID {}",
            contact_ids.len(),
            character_id
        );

        Ok(MessageDto::new("Contacts deleted successfully"))
    }

    fn retry_context<T: Clone + Default>(&self) -> RetryContext<T> {
        RetryContext::with_backoff(self.max_attempts, self.initial_backoff)
    }

    fn contacts_url(&self, character_id: i64) -> String {
        format!("{}/characters/{}/contacts/", self.esi_url, character_id)
    }

    /// Character IDs followed by corporation IDs of one trust state, in insertion order
    async fn contact_ids(&self, trusted: bool) -> Result<Vec<i64>, Error> {
        let characters = TrustedCharacterRepository::new(self.db)
            .get_all(trusted)
            .await?;
        let corporations = TrustedCorporationRepository::new(self.db)
            .get_all(trusted)
            .await?;

        Ok(characters
            .into_iter()
            .map(|character| character.character_id)
            .chain(corporations.into_iter().map(|corporation| corporation.corporation_id))
            .collect())
    }
}

fn validate_character_id(character_id: i64) -> Result<(), ContactsError> {
    if character_id <= 0 {
        return Err(ContactsError::InvalidCharacterId(character_id));
    }

    Ok(())
}

fn into_batches(ids: &[i64], size: usize) -> Vec<Vec<i64>> {
    ids.chunks(size).map(<[i64]>::to_vec).collect()
}

/// Status errors from ESI become [`ContactsError::EsiRejected`], anything else passes through
fn esi_rejected(action: &'static str, error: Error) -> Error {
    match &error {
        Error::ReqwestError(e) => match e.status() {
            Some(status) => ContactsError::EsiRejected {
                action,
                status: status.as_u16(),
            }
            .into(),
            None => error,
        },
        _ => error,
    }
}
