//! Timeline mutations: seeding, adding, reordering, renaming and detail
//! edits. Every mutation persists immediately; positions are kept dense.

use serde_json::{Map, Value};

use crate::domain::details::{DetailBody, format_display_time};
use crate::domain::event::{
    EventChanges, EventKind, NewTimelineEvent, TimelineEvent, catalog,
};
use crate::domain::types::{ClientId, EventId};
use crate::repository::{EventReader, EventWriter};
use crate::services::{ServiceError, ServiceResult};

/// Creates the default wedding sequence for a fresh client. Runs as part of
/// client creation; new records always start with the full catalog.
pub fn seed_timeline<R: EventWriter>(
    repo: &R,
    client_id: ClientId,
) -> ServiceResult<Vec<TimelineEvent>> {
    let mut created = Vec::new();
    for template in catalog() {
        let mut new_event = NewTimelineEvent::from_template(client_id.get(), template);
        new_event.position = Some(created.len() as i32);
        created.push(repo.create_event(&new_event)?);
    }
    Ok(created)
}

/// Adds an event to the client's timeline. The new card lands at the end,
/// except that a pinned end-of-wedding card always stays last.
pub fn add_event<R>(
    repo: &R,
    client_id: ClientId,
    mut new_event: NewTimelineEvent,
) -> ServiceResult<TimelineEvent>
where
    R: EventReader + EventWriter,
{
    new_event.client_id = client_id.get();
    let created = repo.create_event(&new_event)?;

    let mut events = repo.list_events(client_id)?;
    // Place the new card before end-of-wedding, then renumber densely.
    events.retain(|e| e.id != created.id);
    let pin = events
        .iter()
        .position(|e| e.kind == EventKind::EndOfWedding)
        .unwrap_or(events.len());
    events.insert(pin, created.clone());

    let positions: Vec<(EventId, i32)> = events
        .iter()
        .enumerate()
        .filter_map(|(i, e)| Some((EventId::new(e.id).ok()?, i as i32)))
        .collect();
    repo.set_event_positions(&positions)?;

    repo.get_event_by_id(EventId::new(created.id)?)?
        .ok_or(ServiceError::NotFound)
}

/// Rewrites positions to match the given on-screen sequence. Unknown ids are
/// skipped; the remaining events get dense positions `0..n-1`.
pub fn reorder<R>(repo: &R, client_id: ClientId, ids: &[EventId]) -> ServiceResult<usize>
where
    R: EventReader + EventWriter,
{
    let events = repo.list_events(client_id)?;
    let positions: Vec<(EventId, i32)> = ids
        .iter()
        .filter(|id| events.iter().any(|e| e.id == id.get()))
        .enumerate()
        .map(|(i, id)| (*id, i as i32))
        .collect();
    Ok(repo.set_event_positions(&positions)?)
}

/// Renames an event. A name that trims to empty keeps the old one; the
/// operation is a silent no-op in that case.
pub fn rename_event<R>(repo: &R, id: EventId, name: &str) -> ServiceResult<TimelineEvent>
where
    R: EventReader + EventWriter,
{
    let name = name.trim();
    if name.is_empty() {
        return repo.get_event_by_id(id)?.ok_or(ServiceError::NotFound);
    }
    let changes = EventChanges {
        name: Some(name.to_string()),
        ..Default::default()
    };
    Ok(repo.update_event(id, &changes)?)
}

pub fn delete_event<R: EventWriter>(repo: &R, id: EventId) -> ServiceResult<()> {
    Ok(repo.delete_event(id)?)
}

/// Applies a detail patch. The display time is recomputed from the merged
/// `startTime`, a chosen special-dance type renames the card, and the
/// position is left untouched.
pub fn set_event_details<R>(
    repo: &R,
    id: EventId,
    patch: Map<String, Value>,
) -> ServiceResult<TimelineEvent>
where
    R: EventReader + EventWriter,
{
    let event = repo.get_event_by_id(id)?.ok_or(ServiceError::NotFound)?;
    let merged = event.details.merge(&event.kind, patch);

    let time = merged
        .start_time
        .as_deref()
        .map(format_display_time);

    let name = match &merged.body {
        DetailBody::SpecialDance(d) => d.display_name(),
        _ => None,
    };

    let changes = EventChanges {
        name,
        time: Some(time),
        details: Some(merged),
    };
    Ok(repo.update_event(id, &changes)?)
}

/// Convenience lookup used by route handlers.
pub fn get_event<R: EventReader>(repo: &R, id: EventId) -> ServiceResult<TimelineEvent> {
    repo.get_event_by_id(id)?.ok_or(ServiceError::NotFound)
}

pub fn list_timeline<R: EventReader>(
    repo: &R,
    client_id: ClientId,
) -> ServiceResult<Vec<TimelineEvent>> {
    Ok(repo.list_events(client_id)?)
}
