//! In-memory doubles for the remote authority and presentation adapter.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    client::{
        error::RemoteError,
        presentation::{NoticeLevel, PresentationAdapter, ViewMode},
        registry::{Identity, StaticIdentityRegistry},
        remote::RemoteAuthority,
        trust::{engine::ReconciliationEngine, store::TrustStore},
    },
    model::{
        api::MessageDto,
        trust::{
            CommentDto, ContactsDto, IdentifierDto, ListKey, TrustListsDto, TrustedCharacterDto,
            TrustedCorporationDto, TrustedEntityDto,
        },
    },
};

pub type TestEngine = ReconciliationEngine<FakeRemote, RecordingPresentation, StaticIdentityRegistry>;

pub fn date_added() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn character(character_id: i64, name: &str, corporation_id: i64) -> TrustedEntityDto {
    character_dto(character_id, name, corporation_id).into()
}

pub fn corporation(corporation_id: i64, name: &str) -> TrustedEntityDto {
    corporation_dto(corporation_id, name).into()
}

pub fn character_dto(character_id: i64, name: &str, corporation_id: i64) -> TrustedCharacterDto {
    TrustedCharacterDto {
        character_id,
        character_name: name.to_string(),
        corporation_id,
        corporation_name: format!("Corporation {}", corporation_id),
        added_by: "Operator".to_string(),
        date_added: date_added(),
        comment: String::new(),
    }
}

pub fn corporation_dto(corporation_id: i64, name: &str) -> TrustedCorporationDto {
    TrustedCorporationDto {
        corporation_id,
        corporation_name: name.to_string(),
        alliance_id: None,
        alliance_name: None,
        added_by: "Operator".to_string(),
        date_added: date_added(),
        comment: String::new(),
    }
}

pub fn identity(character_id: i64, corporation_id: i64) -> Identity {
    Identity {
        character_id,
        character_name: format!("Character {}", character_id),
        corporation_id,
    }
}

/// Builds a store from `(list, entity)` pairs.
pub fn store_with(entries: Vec<(ListKey, TrustedEntityDto)>) -> TrustStore {
    let mut store = TrustStore::new();
    for (list, entity) in entries {
        store.insert(list, entity).unwrap();
    }
    store
}

/// Engine over a remote that knows `directory` and a registry of `identities`.
pub fn engine(directory: Vec<TrustedEntityDto>, identities: Vec<Identity>) -> TestEngine {
    ReconciliationEngine::new(
        FakeRemote::new(directory),
        RecordingPresentation::default(),
        StaticIdentityRegistry::new(identities),
    )
}

/// Remote authority resolving identifiers against a fixed directory of entities.
///
/// Every call yields once before answering so concurrently polled operations interleave.
#[derive(Default)]
pub struct FakeRemote {
    directory: Vec<TrustedEntityDto>,
    lists: TrustListsDto,
    calls: RefCell<Vec<String>>,
    failures: RefCell<HashMap<&'static str, RemoteError>>,
    add_answer: RefCell<Option<TrustedEntityDto>>,
}

impl FakeRemote {
    pub fn new(directory: Vec<TrustedEntityDto>) -> Self {
        Self {
            directory,
            ..Default::default()
        }
    }

    pub fn with_lists(mut self, lists: TrustListsDto) -> Self {
        self.lists = lists;
        self
    }

    /// Makes every later call of `operation` fail with `error`.
    pub fn fail(&self, operation: &'static str, error: RemoteError) {
        self.failures.borrow_mut().insert(operation, error);
    }

    /// Makes every later add answer with `entity` regardless of the list it targets.
    pub fn answer_add_with(&self, entity: TrustedEntityDto) {
        *self.add_answer.borrow_mut() = Some(entity);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    async fn record(&self, operation: &'static str, call: String) -> Result<(), RemoteError> {
        self.calls.borrow_mut().push(call);
        tokio::task::yield_now().await;

        match self.failures.borrow().get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

pub fn rejected(status: u16, message: &str) -> RemoteError {
    RemoteError::Rejected {
        status,
        message: message.to_string(),
    }
}

impl RemoteAuthority for FakeRemote {
    async fn fetch_lists(&self) -> Result<TrustListsDto, RemoteError> {
        self.record("fetch_lists", "fetch_lists".to_string()).await?;
        Ok(self.lists.clone())
    }

    async fn add(
        &self,
        list: ListKey,
        request: &IdentifierDto,
    ) -> Result<TrustedEntityDto, RemoteError> {
        self.record("add", format!("add {} {}", list, request.identifier))
            .await?;

        if let Some(entity) = self.add_answer.borrow().clone() {
            return Ok(entity);
        }

        let token = request.identifier.trim();
        self.directory
            .iter()
            .filter(|entity| entity.kind() == list.kind)
            .find(|entity| {
                entity.primary_id().to_string() == token
                    || entity.name().eq_ignore_ascii_case(token)
            })
            .cloned()
            .ok_or_else(|| rejected(400, &format!("Identifier resolution failed: {}", token)))
    }

    async fn remove(&self, list: ListKey, request: &IdentifierDto) -> Result<MessageDto, RemoteError> {
        self.record("remove", format!("remove {} {}", list, request.identifier))
            .await?;
        Ok(MessageDto::new("Entry removed"))
    }

    async fn update_comment(
        &self,
        list: ListKey,
        request: &CommentDto,
    ) -> Result<MessageDto, RemoteError> {
        self.record("comment", format!("comment {} {}", list, request.id))
            .await?;
        Ok(MessageDto::new("Comment updated"))
    }

    async fn add_contacts(&self, request: &ContactsDto) -> Result<MessageDto, RemoteError> {
        self.record("add_contacts", format!("add_contacts {}", request.character_id))
            .await?;
        Ok(MessageDto::new("Contacts added"))
    }

    async fn delete_contacts(&self, request: &ContactsDto) -> Result<MessageDto, RemoteError> {
        self.record(
            "delete_contacts",
            format!("delete_contacts {}", request.character_id),
        )
        .await?;
        Ok(MessageDto::new("Contacts deleted"))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    RenderRow(ListKey, i64),
    RemoveRow(ListKey, i64),
    Tile(i64, bool),
    Notice(NoticeLevel, String),
    Confirm(String),
    View(ViewMode),
    Busy(bool),
}

/// Presentation adapter recording every instruction it receives.
pub struct RecordingPresentation {
    events: RefCell<Vec<Event>>,
    confirm_answer: Cell<bool>,
}

impl Default for RecordingPresentation {
    fn default() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
        }
    }
}

impl RecordingPresentation {
    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Notice(level, message) => Some((*level, message.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn last_notice(&self) -> Option<(NoticeLevel, String)> {
        self.notices().pop()
    }

    /// Latest display trust set for a character tile.
    pub fn tile(&self, character_id: i64) -> Option<bool> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::Tile(id, trusted) if *id == character_id => Some(*trusted),
                _ => None,
            })
    }

    pub fn busy_transitions(&self) -> Vec<bool> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Busy(busy) => Some(*busy),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl PresentationAdapter for RecordingPresentation {
    fn render_row(&self, list: ListKey, entity: &TrustedEntityDto) {
        self.push(Event::RenderRow(list, entity.primary_id()));
    }

    fn remove_row(&self, list: ListKey, primary_id: i64) {
        self.push(Event::RemoveRow(list, primary_id));
    }

    fn set_tile_trust(&self, character_id: i64, trusted: bool) {
        self.push(Event::Tile(character_id, trusted));
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        self.push(Event::Notice(level, message.to_string()));
    }

    async fn confirm(&self, prompt: &str) -> bool {
        self.push(Event::Confirm(prompt.to_string()));
        self.confirm_answer.get()
    }

    fn set_view_mode(&self, mode: ViewMode) {
        self.push(Event::View(mode));
    }

    fn set_busy(&self, busy: bool) {
        self.push(Event::Busy(busy));
    }
}
