use chrono::NaiveDate;
use serde_json::json;

use encore_crm::domain::client::{ClientFlagUpdate, NewClient, UpdateClient};
use encore_crm::domain::details::{DetailBody, SongRef};
use encore_crm::domain::event::{EventChanges, EventKind, NewTimelineEvent, template_for};
use encore_crm::domain::general_info::UpsertGeneralInfo;
use encore_crm::domain::types::{ClientId, EventId, Money};
use encore_crm::repository::{
    ClientListQuery, ClientReader, ClientWriter, DieselRepository, ErrorLogReader, ErrorLogWriter,
    EventReader, EventWriter, GeneralInfoReader, GeneralInfoWriter,
};

mod common;

fn new_client(name: &str, deposit: i64, total: i64) -> NewClient {
    NewClient::new(
        "Wedding".into(),
        None,
        name.into(),
        None,
        Some(format!("{}@example.com", name.to_lowercase())),
        None,
        None,
        NaiveDate::from_ymd_opt(2026, 9, 12),
        Some("The Barn".into()),
        None,
        None,
        Money::new(deposit).unwrap(),
        Money::new(total).unwrap(),
    )
    .unwrap()
}

#[test]
fn client_repository_crud() {
    let test_db = common::TestDb::new("client_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo.create_client(&new_client("Alice", 50_000, 150_000)).unwrap();
    assert_eq!(created.client_name, "Alice");
    assert!(!created.deposit_paid);

    let by_id = repo
        .get_client_by_id(ClientId::new(created.id).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(by_id.public_id, created.public_id);

    let by_public_id = repo
        .get_client_by_public_id(created.public_id)
        .unwrap()
        .unwrap();
    assert_eq!(by_public_id.id, created.id);

    let updates = UpdateClient::new(
        "Wedding".into(),
        Some("Alice & Bob".into()),
        "Alice".into(),
        Some("Bob".into()),
        Some("alice@example.com".into()),
        None,
        None,
        NaiveDate::from_ymd_opt(2026, 10, 3),
        Some("The Barn".into()),
        None,
        Some("DJ + MC".into()),
        Money::new(60_000).unwrap(),
        Money::new(180_000).unwrap(),
        true,
    )
    .unwrap();
    let updated = repo
        .update_client(ClientId::new(created.id).unwrap(), &updates)
        .unwrap();
    assert_eq!(updated.fiance_name.as_deref(), Some("Bob"));
    assert!(updated.onboarding_completed);
    assert_eq!(updated.total_balance, Money::new(180_000).unwrap());
}

#[test]
fn listing_excludes_archived_unless_asked() {
    let test_db = common::TestDb::new("listing_excludes_archived.db");
    let repo = DieselRepository::new(test_db.pool());

    let keep = repo.create_client(&new_client("Keep", 0, 0)).unwrap();
    let archive = repo.create_client(&new_client("Archive", 0, 0)).unwrap();
    repo.set_client_flags(
        ClientId::new(archive.id).unwrap(),
        &ClientFlagUpdate {
            archived: Some(true),
            ..Default::default()
        },
    )
    .unwrap();

    let (total, clients) = repo.list_clients(ClientListQuery::new()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(clients[0].id, keep.id);

    let (total_all, _) = repo
        .list_clients(ClientListQuery::new().include_archived())
        .unwrap();
    assert_eq!(total_all, 2);
}

#[test]
fn search_matches_name_email_and_venue() {
    let test_db = common::TestDb::new("search_matches.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_client(&new_client("Alice", 0, 0)).unwrap();
    repo.create_client(&new_client("Bob", 0, 0)).unwrap();

    let (total, clients) = repo
        .list_clients(ClientListQuery::new().search("alice@"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(clients[0].client_name, "Alice");

    let (venue_total, _) = repo
        .list_clients(ClientListQuery::new().search("Barn"))
        .unwrap();
    assert_eq!(venue_total, 2);
}

#[test]
fn listing_orders_by_event_date_and_paginates() {
    let test_db = common::TestDb::new("listing_pagination.db");
    let repo = DieselRepository::new(test_db.pool());

    for (name, month) in [("Late", 11), ("Early", 3), ("Mid", 7)] {
        let mut payload = new_client(name, 0, 0);
        payload.event_date = NaiveDate::from_ymd_opt(2026, month, 1);
        repo.create_client(&payload).unwrap();
    }

    let (total, page_one) = repo
        .list_clients(ClientListQuery::new().paginate(1, 2))
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(page_one.len(), 2);
    assert_eq!(page_one[0].client_name, "Early");
    assert_eq!(page_one[1].client_name, "Mid");

    let (_, page_two) = repo
        .list_clients(ClientListQuery::new().paginate(2, 2))
        .unwrap();
    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0].client_name, "Late");
}

#[test]
fn flag_updates_touch_only_present_fields() {
    let test_db = common::TestDb::new("flag_updates.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo.create_client(&new_client("Alice", 50_000, 150_000)).unwrap();
    let id = ClientId::new(created.id).unwrap();

    let signed = repo
        .set_client_flags(
            id,
            &ClientFlagUpdate {
                signature: Some("Alice".into()),
                signature_date: Some(chrono::Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(signed.is_signed());
    assert!(!signed.deposit_paid);

    let paid = repo
        .set_client_flags(
            id,
            &ClientFlagUpdate {
                deposit_paid: Some(true),
                payment_intent_id: Some("pi_123".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(paid.is_signed());
    assert!(paid.deposit_paid);
    assert_eq!(paid.payment_intent_id.as_deref(), Some("pi_123"));
}

fn client_with_events(repo: &DieselRepository, kinds: &[EventKind]) -> (ClientId, Vec<i32>) {
    let client = repo.create_client(&new_client("Timeline", 0, 0)).unwrap();
    let client_id = ClientId::new(client.id).unwrap();
    let mut ids = Vec::new();
    for (i, kind) in kinds.iter().enumerate() {
        let mut new_event = match template_for(kind) {
            Some(template) => NewTimelineEvent::from_template(client.id, template),
            None => NewTimelineEvent::blank(client.id, None),
        };
        new_event.position = Some(i as i32);
        ids.push(repo.create_event(&new_event).unwrap().id);
    }
    (client_id, ids)
}

#[test]
fn events_list_in_position_order_with_unordered_last() {
    let test_db = common::TestDb::new("events_position_order.db");
    let repo = DieselRepository::new(test_db.pool());

    let (client_id, ids) = client_with_events(
        &repo,
        &[EventKind::Ceremony, EventKind::Dinner, EventKind::Toasts],
    );
    // Drop the first event's position entirely.
    repo.set_event_positions(&[
        (EventId::new(ids[1]).unwrap(), 0),
        (EventId::new(ids[2]).unwrap(), 1),
    ])
    .unwrap();
    let mut conn = test_db.pool().get().unwrap();
    {
        use diesel::prelude::*;
        use encore_crm::schema::events;
        diesel::update(events::table.find(ids[0]))
            .set(events::position.eq(None::<i32>))
            .execute(&mut conn)
            .unwrap();
    }

    let events = repo.list_events(client_id).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].id, ids[1]);
    assert_eq!(events[1].id, ids[2]);
    assert_eq!(events[2].id, ids[0]);
    assert_eq!(events[2].position, None);
}

#[test]
fn reorder_persists_a_dense_permutation() {
    let test_db = common::TestDb::new("reorder_permutation.db");
    let repo = DieselRepository::new(test_db.pool());

    let (client_id, ids) = client_with_events(
        &repo,
        &[
            EventKind::Ceremony,
            EventKind::CocktailHour,
            EventKind::Dinner,
            EventKind::Toasts,
        ],
    );

    let updated = repo
        .set_event_positions(&[
            (EventId::new(ids[3]).unwrap(), 0),
            (EventId::new(ids[0]).unwrap(), 1),
            (EventId::new(ids[2]).unwrap(), 2),
            (EventId::new(ids[1]).unwrap(), 3),
        ])
        .unwrap();
    assert_eq!(updated, 4);

    let events = repo.list_events(client_id).unwrap();
    let positions: Vec<i32> = events.iter().filter_map(|e| e.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
    assert_eq!(events[0].id, ids[3]);
    assert_eq!(events[3].id, ids[1]);
}

#[test]
fn event_details_round_trip_through_storage() {
    let test_db = common::TestDb::new("event_details_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());

    let (_, ids) = client_with_events(&repo, &[EventKind::Toasts]);
    let event_id = EventId::new(ids[0]).unwrap();
    let event = repo.get_event_by_id(event_id).unwrap().unwrap();

    let details = event.details.merge(
        &event.kind,
        json!({"startTime": "18:30", "toastGivers": "Best man; maid of honor"})
            .as_object()
            .unwrap()
            .clone(),
    );
    repo.update_event(
        event_id,
        &EventChanges {
            name: None,
            time: Some(Some("6:30 PM".into())),
            details: Some(details),
        },
    )
    .unwrap();

    let reloaded = repo.get_event_by_id(event_id).unwrap().unwrap();
    assert_eq!(reloaded.time.as_deref(), Some("6:30 PM"));
    assert_eq!(reloaded.details.start_time.as_deref(), Some("18:30"));
    match &reloaded.details.body {
        DetailBody::Toasts(t) => {
            assert_eq!(t.toast_givers.as_deref(), Some("Best man; maid of honor"));
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn legacy_song_shapes_are_normalized_on_load() {
    let test_db = common::TestDb::new("legacy_song_shapes.db");
    let repo = DieselRepository::new(test_db.pool());

    let (_, ids) = client_with_events(&repo, &[EventKind::CakeCutting]);
    let event_id = EventId::new(ids[0]).unwrap();

    // Write a legacy blob directly, bypassing the typed layer.
    {
        use diesel::prelude::*;
        use encore_crm::schema::events;
        let mut conn = test_db.pool().get().unwrap();
        diesel::update(events::table.find(ids[0]))
            .set(events::details.eq(json!({"cakeSong": "How Sweet It Is"}).to_string()))
            .execute(&mut conn)
            .unwrap();
    }

    let event = repo.get_event_by_id(event_id).unwrap().unwrap();
    match &event.details.body {
        DetailBody::CakeCutting(d) => {
            assert_eq!(
                d.cake_song.items(),
                &[SongRef::Search {
                    track_name: "How Sweet It Is".into(),
                    artist_name: None,
                    artwork_url: None,
                    preview_url: None,
                }]
            );
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn deleting_a_client_cascades_to_its_rows() {
    let test_db = common::TestDb::new("delete_cascades.db");
    let repo = DieselRepository::new(test_db.pool());

    let (client_id, ids) = client_with_events(&repo, &[EventKind::Ceremony]);
    repo.upsert_general_info(
        client_id,
        &UpsertGeneralInfo::new(Some("The Barn".into()), None, false, None, None, None, None),
    )
    .unwrap();

    {
        use diesel::prelude::*;
        use encore_crm::schema::clients;
        let mut conn = test_db.pool().get().unwrap();
        diesel::delete(clients::table.find(client_id.get()))
            .execute(&mut conn)
            .unwrap();
    }

    assert!(
        repo.get_event_by_id(EventId::new(ids[0]).unwrap())
            .unwrap()
            .is_none()
    );
    assert!(repo.get_general_info(client_id).unwrap().is_none());
}

#[test]
fn general_info_upsert_keeps_one_row() {
    let test_db = common::TestDb::new("general_info_upsert.db");
    let repo = DieselRepository::new(test_db.pool());

    let client = repo.create_client(&new_client("Info", 0, 0)).unwrap();
    let client_id = ClientId::new(client.id).unwrap();

    let first = repo
        .upsert_general_info(
            client_id,
            &UpsertGeneralInfo::new(
                Some("The Barn".into()),
                None,
                true,
                Some("Chapel".into()),
                None,
                None,
                None,
            ),
        )
        .unwrap();
    assert_eq!(first.ceremony_venue_name.as_deref(), Some("Chapel"));

    let second = repo
        .upsert_general_info(
            client_id,
            &UpsertGeneralInfo::new(
                Some("The Barn".into()),
                Some("1 Barn Rd".into()),
                false,
                Some("Chapel".into()),
                None,
                Some("Sam".into()),
                None,
            ),
        )
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.ceremony_venue_name, None);
    assert_eq!(second.planner_name.as_deref(), Some("Sam"));
    assert!(repo.get_general_info(client_id).unwrap().is_some());
}

#[test]
fn error_log_never_exceeds_its_capacity() {
    let test_db = common::TestDb::new("error_log_capacity.db");
    let repo = DieselRepository::new(test_db.pool());

    for i in 0..8 {
        repo.record_error("create_client", &format!("failure {i}"))
            .unwrap();
    }

    let entries = repo.list_error_log().unwrap();
    assert_eq!(entries.len(), 5);
    // Newest first; the oldest three were pruned.
    assert_eq!(entries[0].message, "failure 7");
    assert_eq!(entries[4].message, "failure 3");
}
