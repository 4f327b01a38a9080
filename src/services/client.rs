//! Staff-facing client record operations.

use chrono::NaiveDateTime;

use crate::domain::client::{Client, ClientFlagUpdate, NewClient, UpdateClient};
use crate::domain::types::{ClientId, PublicId};
use crate::repository::{
    ClientListQuery, ClientReader, ClientWriter, ErrorLogWriter, EventWriter,
};
use crate::services::{ServiceError, ServiceResult, timeline};

/// Creates a client record and seeds its timeline with the default wedding
/// sequence. A store failure is appended to the rolling error log before it
/// is surfaced, so staff can inspect recent failures.
pub fn create_client<R>(repo: &R, new_client: &NewClient) -> ServiceResult<Client>
where
    R: ClientWriter + EventWriter + ErrorLogWriter,
{
    let client = match repo.create_client(new_client) {
        Ok(client) => client,
        Err(err) => {
            if let Err(log_err) = repo.record_error("create_client", &err.to_string()) {
                log::warn!("Failed to record client creation error: {log_err}");
            }
            return Err(err.into());
        }
    };

    let client_id = ClientId::new(client.id)?;
    if let Err(err) = timeline::seed_timeline(repo, client_id) {
        if let Err(log_err) = repo.record_error("seed_timeline", &err.to_string()) {
            log::warn!("Failed to record timeline seeding error: {log_err}");
        }
        return Err(err);
    }
    Ok(client)
}

pub fn get_client<R: ClientReader>(repo: &R, id: ClientId) -> ServiceResult<Client> {
    repo.get_client_by_id(id)?.ok_or(ServiceError::NotFound)
}

pub fn get_client_by_public_id<R: ClientReader>(
    repo: &R,
    public_id: PublicId,
) -> ServiceResult<Client> {
    repo.get_client_by_public_id(public_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn update_client<R: ClientWriter>(
    repo: &R,
    id: ClientId,
    updates: &UpdateClient,
) -> ServiceResult<Client> {
    Ok(repo.update_client(id, updates)?)
}

pub fn list_clients<R: ClientReader>(
    repo: &R,
    query: ClientListQuery,
) -> ServiceResult<(usize, Vec<Client>)> {
    Ok(repo.list_clients(query)?)
}

/// Soft-deletes (or restores) a client.
pub fn set_archived<R: ClientWriter>(
    repo: &R,
    id: ClientId,
    archived: bool,
) -> ServiceResult<Client> {
    let flags = ClientFlagUpdate {
        archived: Some(archived),
        ..Default::default()
    };
    Ok(repo.set_client_flags(id, &flags)?)
}

/// Records the service agreement signature. An empty signer name is rejected.
pub fn sign_agreement<R: ClientWriter>(
    repo: &R,
    id: ClientId,
    signer: &str,
    signed_at: NaiveDateTime,
) -> ServiceResult<Client> {
    let signer = signer.trim();
    if signer.is_empty() {
        return Err(ServiceError::ValidationError(
            "signature cannot be empty".to_string(),
        ));
    }
    let flags = ClientFlagUpdate {
        signature: Some(signer.to_string()),
        signature_date: Some(signed_at),
        ..Default::default()
    };
    Ok(repo.set_client_flags(id, &flags)?)
}

pub fn complete_onboarding<R: ClientWriter>(repo: &R, id: ClientId) -> ServiceResult<Client> {
    let flags = ClientFlagUpdate {
        onboarding_completed: Some(true),
        ..Default::default()
    };
    Ok(repo.set_client_flags(id, &flags)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::details::EventDetails;
    use crate::domain::event::{TimelineEvent, catalog};
    use crate::domain::types::Money;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use chrono::Utc;

    fn stored_client() -> Client {
        let now = Utc::now().naive_utc();
        Client {
            id: 1,
            public_id: PublicId::new(),
            event_type: "Wedding".into(),
            event_name: None,
            client_name: "Jamie".into(),
            fiance_name: None,
            client_email: None,
            client_phone: None,
            client_address: None,
            event_date: None,
            venue_name: None,
            venue_address: None,
            services: None,
            deposit_amount: Money::zero(),
            total_balance: Money::zero(),
            signature: None,
            signature_date: None,
            deposit_paid: false,
            balance_paid: false,
            payment_intent_id: None,
            onboarding_completed: false,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn minimal_new_client() -> NewClient {
        NewClient::new(
            "Wedding".into(),
            None,
            "Jamie".into(),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            Money::zero(),
            Money::zero(),
        )
        .unwrap()
    }

    #[test]
    fn a_new_client_gets_the_default_timeline() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().returning(|_| Ok(stored_client()));
        repo.expect_create_event()
            .times(catalog().len())
            .returning(|new_event| {
                Ok(TimelineEvent {
                    id: 1,
                    client_id: new_event.client_id,
                    kind: new_event.kind.clone(),
                    name: new_event.name.clone(),
                    time: None,
                    position: new_event.position,
                    details: EventDetails::empty(&new_event.kind),
                    created_at: Utc::now().naive_utc(),
                })
            });

        let created = create_client(&repo, &minimal_new_client()).unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn empty_signature_is_rejected_before_the_store_is_touched() {
        let repo = MockRepository::new();
        let result = sign_agreement(
            &repo,
            ClientId::new(1).unwrap(),
            "   ",
            Utc::now().naive_utc(),
        );
        assert!(matches!(result, Err(ServiceError::ValidationError(_))));
    }

    #[test]
    fn failed_creation_lands_in_the_error_log() {
        let mut repo = MockRepository::new();
        repo.expect_create_client()
            .returning(|_| Err(RepositoryError::DatabaseError("disk I/O error".into())));
        repo.expect_record_error()
            .withf(|context, message| context == "create_client" && message.contains("disk I/O"))
            .times(1)
            .returning(|_, _| Ok(()));

        assert!(create_client(&repo, &minimal_new_client()).is_err());
    }
}
