use crate::{
    db::DbPool,
    domain::{
        client::{Client, ClientFlagUpdate, NewClient, UpdateClient},
        error_log::ErrorLogRecord,
        event::{EventChanges, NewTimelineEvent, TimelineEvent},
        general_info::{GeneralInfo, UpsertGeneralInfo},
        types::{ClientId, EventId, PublicId},
    },
    repository::errors::RepositoryResult,
};

pub mod client;
pub mod error_log;
pub mod errors;
pub mod event;
pub mod general_info;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Listing filter for the staff dashboard. Archived clients are excluded
/// unless explicitly requested.
#[derive(Debug, Clone, Default)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub include_archived: bool,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn get_client_by_public_id(&self, public_id: PublicId) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, client_id: ClientId, updates: &UpdateClient)
    -> RepositoryResult<Client>;
    fn set_client_flags(
        &self,
        client_id: ClientId,
        flags: &ClientFlagUpdate,
    ) -> RepositoryResult<Client>;
}

pub trait EventReader {
    fn get_event_by_id(&self, id: EventId) -> RepositoryResult<Option<TimelineEvent>>;
    /// Events for one client, ordered by position with unordered rows last.
    fn list_events(&self, client_id: ClientId) -> RepositoryResult<Vec<TimelineEvent>>;
}

pub trait EventWriter {
    fn create_event(&self, new_event: &NewTimelineEvent) -> RepositoryResult<TimelineEvent>;
    fn update_event(&self, id: EventId, changes: &EventChanges) -> RepositoryResult<TimelineEvent>;
    /// Writes one position value per event id; returns the number updated.
    fn set_event_positions(&self, positions: &[(EventId, i32)]) -> RepositoryResult<usize>;
    fn delete_event(&self, id: EventId) -> RepositoryResult<()>;
}

pub trait GeneralInfoReader {
    fn get_general_info(&self, client_id: ClientId) -> RepositoryResult<Option<GeneralInfo>>;
}

pub trait GeneralInfoWriter {
    fn upsert_general_info(
        &self,
        client_id: ClientId,
        info: &UpsertGeneralInfo,
    ) -> RepositoryResult<GeneralInfo>;
}

pub trait ErrorLogReader {
    fn list_error_log(&self) -> RepositoryResult<Vec<ErrorLogRecord>>;
}

pub trait ErrorLogWriter {
    /// Appends an entry and prunes the log to its retained capacity.
    fn record_error(&self, context: &str, message: &str) -> RepositoryResult<()>;
}

/// Diesel/SQLite implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<crate::db::DbConnection> {
        Ok(self.pool.get()?)
    }
}
