use chrono::Utc;
use serde_json::json;

use encore_crm::domain::client::NewClient;
use encore_crm::domain::event::{EventKind, NewTimelineEvent, catalog};
use encore_crm::domain::general_info::UpsertGeneralInfo;
use encore_crm::domain::stage::PipelineStage;
use encore_crm::domain::types::{ClientId, EventId, Money};
use encore_crm::repository::DieselRepository;
use encore_crm::services::{client, general_info, pipeline, timeline};

mod common;

fn seed_client(repo: &DieselRepository, name: &str) -> ClientId {
    let new_client = NewClient::new(
        "Wedding".into(),
        None,
        name.into(),
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
    .unwrap();
    let created = client::create_client(repo, &new_client).unwrap();
    ClientId::new(created.id).unwrap()
}

#[test]
fn creating_a_client_seeds_the_catalog_in_order() {
    let test_db = common::TestDb::new("seeded_timeline.db");
    let repo = DieselRepository::new(test_db.pool());
    let client_id = seed_client(&repo, "Seeded");

    let events = timeline::list_timeline(&repo, client_id).unwrap();
    assert_eq!(events.len(), catalog().len());
    for (i, (event, template)) in events.iter().zip(catalog()).enumerate() {
        assert_eq!(event.kind, template.kind);
        assert_eq!(event.name, template.default_name);
        assert_eq!(event.position, Some(i as i32));
    }
    assert_eq!(events.last().unwrap().kind, EventKind::EndOfWedding);
}

#[test]
fn added_event_stays_ahead_of_the_end_of_wedding_pin() {
    let test_db = common::TestDb::new("added_event_pin.db");
    let repo = DieselRepository::new(test_db.pool());
    let client_id = seed_client(&repo, "Pinned");

    let created = timeline::add_event(
        &repo,
        client_id,
        NewTimelineEvent::blank(client_id.get(), Some("Sparkler Exit".into())),
    )
    .unwrap();
    assert_eq!(created.name, "Sparkler Exit");

    let events = timeline::list_timeline(&repo, client_id).unwrap();
    assert_eq!(events.len(), catalog().len() + 1);
    assert_eq!(events[events.len() - 2].id, created.id);
    assert_eq!(events.last().unwrap().kind, EventKind::EndOfWedding);
    let positions: Vec<i32> = events.iter().filter_map(|e| e.position).collect();
    assert_eq!(positions, (0..events.len() as i32).collect::<Vec<_>>());
}

#[test]
fn reorder_round_trips_through_the_store() {
    let test_db = common::TestDb::new("reorder_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());
    let client_id = seed_client(&repo, "Reordered");

    let seeded = timeline::list_timeline(&repo, client_id).unwrap();
    let mut ids: Vec<EventId> = seeded
        .iter()
        .map(|e| EventId::new(e.id).unwrap())
        .collect();
    ids.reverse();

    timeline::reorder(&repo, client_id, &ids).unwrap();

    let events = timeline::list_timeline(&repo, client_id).unwrap();
    assert_eq!(events.first().unwrap().kind, EventKind::EndOfWedding);
    assert_eq!(events.last().unwrap().kind, EventKind::Ceremony);
    let positions: Vec<i32> = events.iter().filter_map(|e| e.position).collect();
    assert_eq!(positions, (0..events.len() as i32).collect::<Vec<_>>());
}

#[test]
fn detail_edit_persists_time_and_survives_reload() {
    let test_db = common::TestDb::new("detail_edit_persists.db");
    let repo = DieselRepository::new(test_db.pool());
    let client_id = seed_client(&repo, "Detailed");

    let seeded = timeline::list_timeline(&repo, client_id).unwrap();
    let toasts = seeded
        .iter()
        .find(|e| e.kind == EventKind::Toasts)
        .unwrap();
    let event_id = EventId::new(toasts.id).unwrap();

    let patch = json!({"startTime": "19:00", "toastGivers": "Best man"})
        .as_object()
        .unwrap()
        .clone();
    let updated = timeline::set_event_details(&repo, event_id, patch).unwrap();
    assert_eq!(updated.time.as_deref(), Some("7:00 PM"));
    assert_eq!(updated.position, toasts.position);

    let reloaded = timeline::get_event(&repo, event_id).unwrap();
    assert_eq!(reloaded.details.start_time.as_deref(), Some("19:00"));
    assert_eq!(reloaded.time.as_deref(), Some("7:00 PM"));
}

#[test]
fn signing_and_onboarding_move_the_client_through_the_pipeline() {
    let test_db = common::TestDb::new("pipeline_flow.db");
    let repo = DieselRepository::new(test_db.pool());
    let client_id = seed_client(&repo, "Pipeline");
    let today = Utc::now().date_naive();

    let fresh = client::get_client(&repo, client_id).unwrap();
    assert_eq!(pipeline::classify(&fresh, today), PipelineStage::AwaitingSignature);

    let signed = client::sign_agreement(&repo, client_id, "Jamie Rivera", Utc::now().naive_utc())
        .unwrap();
    assert_eq!(pipeline::classify(&signed, today), PipelineStage::AwaitingDeposit);
    assert!(signed.signature_date.is_some());

    let onboarded = client::complete_onboarding(&repo, client_id).unwrap();
    assert!(onboarded.onboarding_completed);

    let archived = client::set_archived(&repo, client_id, true).unwrap();
    assert_eq!(pipeline::classify(&archived, today), PipelineStage::Archive);
}

#[test]
fn planning_progress_counts_info_and_timed_events() {
    let test_db = common::TestDb::new("planning_progress.db");
    let repo = DieselRepository::new(test_db.pool());
    let client_id = seed_client(&repo, "Progress");

    general_info::save_general_info(
        &repo,
        client_id,
        &UpsertGeneralInfo::new(
            Some("The Barn".into()),
            Some("1 Barn Rd".into()),
            false,
            None,
            None,
            Some("Sam".into()),
            Some("sam@example.com".into()),
        ),
    )
    .unwrap();

    let seeded = timeline::list_timeline(&repo, client_id).unwrap();
    let ceremony = seeded
        .iter()
        .find(|e| e.kind == EventKind::Ceremony)
        .unwrap();
    timeline::set_event_details(
        &repo,
        EventId::new(ceremony.id).unwrap(),
        json!({"startTime": "16:00"}).as_object().unwrap().clone(),
    )
    .unwrap();

    let info = general_info::get_general_info(&repo, client_id).unwrap();
    let events = timeline::list_timeline(&repo, client_id).unwrap();
    // 4 info items done, 1 of the 17 seeded events timed: 5 of 21.
    assert_eq!(pipeline::planning_progress(info.as_ref(), &events), 23);
}
