//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, ClientFlagUpdate, NewClient, UpdateClient};
use crate::domain::error_log::ErrorLogRecord;
use crate::domain::event::{EventChanges, NewTimelineEvent, TimelineEvent};
use crate::domain::general_info::{GeneralInfo, UpsertGeneralInfo};
use crate::domain::types::{ClientId, EventId, PublicId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientListQuery, ClientReader, ClientWriter, ErrorLogReader, ErrorLogWriter, EventReader,
    EventWriter, GeneralInfoReader, GeneralInfoWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn get_client_by_public_id(&self, public_id: PublicId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(
            &self,
            client_id: ClientId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client>;
        fn set_client_flags(
            &self,
            client_id: ClientId,
            flags: &ClientFlagUpdate,
        ) -> RepositoryResult<Client>;
    }

    impl EventReader for Repository {
        fn get_event_by_id(&self, id: EventId) -> RepositoryResult<Option<TimelineEvent>>;
        fn list_events(&self, client_id: ClientId) -> RepositoryResult<Vec<TimelineEvent>>;
    }

    impl EventWriter for Repository {
        fn create_event(&self, new_event: &NewTimelineEvent) -> RepositoryResult<TimelineEvent>;
        fn update_event(&self, id: EventId, changes: &EventChanges) -> RepositoryResult<TimelineEvent>;
        fn set_event_positions(&self, positions: &[(EventId, i32)]) -> RepositoryResult<usize>;
        fn delete_event(&self, id: EventId) -> RepositoryResult<()>;
    }

    impl GeneralInfoReader for Repository {
        fn get_general_info(&self, client_id: ClientId) -> RepositoryResult<Option<GeneralInfo>>;
    }

    impl GeneralInfoWriter for Repository {
        fn upsert_general_info(
            &self,
            client_id: ClientId,
            info: &UpsertGeneralInfo,
        ) -> RepositoryResult<GeneralInfo>;
    }

    impl ErrorLogReader for Repository {
        fn list_error_log(&self) -> RepositoryResult<Vec<ErrorLogRecord>>;
    }

    impl ErrorLogWriter for Repository {
        fn record_error(&self, context: &str, message: &str) -> RepositoryResult<()>;
    }
}
