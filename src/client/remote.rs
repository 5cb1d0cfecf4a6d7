//! The remote authority: the backend that validates and persists trust-list membership.

use std::{collections::HashMap, future::Future};

use dioxus_logger::tracing;
use reqwest::{header::CONTENT_TYPE, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    client::error::RemoteError,
    model::{
        api::{ErrorDto, MessageDto},
        trust::{
            CommentDto, ContactsDto, IdentifierDto, ListKey, TrustListsDto, TrustedEntityDto,
        },
    },
};

/// Message used when a failed response carries no usable body.
pub static FALLBACK_ERROR_MESSAGE: &str = "An error occurred.";

pub trait RemoteAuthority {
    fn fetch_lists(&self) -> impl Future<Output = Result<TrustListsDto, RemoteError>>;

    /// Validates the identifier, persists membership and returns the canonical record.
    fn add(
        &self,
        list: ListKey,
        request: &IdentifierDto,
    ) -> impl Future<Output = Result<TrustedEntityDto, RemoteError>>;

    fn remove(
        &self,
        list: ListKey,
        request: &IdentifierDto,
    ) -> impl Future<Output = Result<MessageDto, RemoteError>>;

    fn update_comment(
        &self,
        list: ListKey,
        request: &CommentDto,
    ) -> impl Future<Output = Result<MessageDto, RemoteError>>;

    /// Writes every trusted entity as a contact of the character.
    fn add_contacts(
        &self,
        request: &ContactsDto,
    ) -> impl Future<Output = Result<MessageDto, RemoteError>>;

    /// Removes every untrusted entity from the character's contacts.
    fn delete_contacts(
        &self,
        request: &ContactsDto,
    ) -> impl Future<Output = Result<MessageDto, RemoteError>>;
}

/// Which trust-list operation an endpoint performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrustAction {
    Add,
    Remove,
    Comment,
}

impl TrustAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Comment => "comment",
        }
    }
}

/// Path of the endpoint for a list and action, e.g. `/api/trust/trusted/character/add`.
pub fn trust_endpoint(list: ListKey, action: TrustAction) -> String {
    format!("/api/trust/{}/{}/{}", list.state, list.kind, action.as_str())
}

/// [`RemoteAuthority`] over the server's HTTP API.
///
/// Contact writes act on a character's in-game contacts, so they carry that character's ESI
/// access token, registered with [`HttpRemoteAuthority::with_access_token`].
#[derive(Clone, Debug)]
pub struct HttpRemoteAuthority {
    client: reqwest::Client,
    base_url: String,
    access_tokens: HashMap<i64, String>,
}

impl HttpRemoteAuthority {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            access_tokens: HashMap::new(),
        }
    }

    /// Registers the ESI access token sent with contact writes for `character_id`.
    pub fn with_access_token(mut self, character_id: i64, access_token: impl Into<String>) -> Self {
        self.access_tokens.insert(character_id, access_token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        tracing::debug!("Sending POST {}", path);

        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        parse_response(response).await
    }

    async fn post_contacts(
        &self,
        path: &str,
        request: &ContactsDto,
    ) -> Result<MessageDto, RemoteError> {
        tracing::debug!("Sending POST {} for character ID {}", path, request.character_id);

        let mut builder = self.client.post(self.url(path)).json(request);
        match self.access_tokens.get(&request.character_id) {
            Some(token) => builder = builder.bearer_auth(token),
            None => tracing::warn!(
                "No access token registered for character ID {}",
                request.character_id
            ),
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        parse_response(response).await
    }
}

impl RemoteAuthority for HttpRemoteAuthority {
    async fn fetch_lists(&self) -> Result<TrustListsDto, RemoteError> {
        let response = self
            .client
            .get(self.url("/api/trust"))
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        parse_response(response).await
    }

    async fn add(
        &self,
        list: ListKey,
        request: &IdentifierDto,
    ) -> Result<TrustedEntityDto, RemoteError> {
        let entity: TrustedEntityDto = self
            .post(&trust_endpoint(list, TrustAction::Add), request)
            .await?;

        if entity.kind() != list.kind {
            return Err(RemoteError::Decode(format!(
                "expected a {} record but received a {} record",
                list.kind,
                entity.kind()
            )));
        }

        Ok(entity)
    }

    async fn remove(&self, list: ListKey, request: &IdentifierDto) -> Result<MessageDto, RemoteError> {
        self.post(&trust_endpoint(list, TrustAction::Remove), request)
            .await
    }

    async fn update_comment(
        &self,
        list: ListKey,
        request: &CommentDto,
    ) -> Result<MessageDto, RemoteError> {
        let path = trust_endpoint(list, TrustAction::Comment);
        tracing::debug!("Sending PUT {}", path);

        let response = self
            .client
            .put(self.url(&path))
            .json(request)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        parse_response(response).await
    }

    async fn add_contacts(&self, request: &ContactsDto) -> Result<MessageDto, RemoteError> {
        self.post_contacts("/api/contacts/add", request).await
    }

    async fn delete_contacts(&self, request: &ContactsDto) -> Result<MessageDto, RemoteError> {
        self.post_contacts("/api/contacts/delete", request).await
    }
}

/// Decodes a success body, or extracts the error message from a failed response.
///
/// JSON error bodies contribute their `error` field, anything else contributes its text.
async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()));
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));

    let message = if is_json {
        response.json::<ErrorDto>().await.ok().map(|dto| dto.error)
    } else {
        response.text().await.ok()
    };

    let message = message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

    tracing::debug!("Request failed with status {}: {}", status, message);

    Err(RemoteError::Rejected {
        status: status.as_u16(),
        message,
    })
}
