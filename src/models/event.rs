use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::details::EventDetails;
use crate::domain::event::{
    EventKind, NewTimelineEvent as DomainNewEvent, TimelineEvent as DomainEvent,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::events)]
/// Diesel model for [`crate::domain::event::TimelineEvent`]. The detail bag
/// is stored as a JSON text column and normalized on load.
pub struct TimelineEvent {
    pub id: i32,
    pub client_id: i32,
    pub kind: String,
    pub name: String,
    pub time: Option<String>,
    pub position: Option<i32>,
    pub details: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::events)]
/// Insertable form of [`TimelineEvent`].
pub struct NewTimelineEvent {
    pub client_id: i32,
    pub kind: String,
    pub name: String,
    pub time: Option<String>,
    pub position: Option<i32>,
    pub details: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::events)]
/// Changeset for rename/detail edits; `None` fields stay untouched.
pub struct UpdateTimelineEvent {
    pub name: Option<String>,
    pub time: Option<Option<String>>,
    pub details: Option<String>,
}

impl From<TimelineEvent> for DomainEvent {
    fn from(event: TimelineEvent) -> Self {
        let kind = EventKind::from(event.kind.as_str());
        // Unreadable blobs degrade to an empty bag rather than failing the load.
        let raw: Value = serde_json::from_str(&event.details).unwrap_or(Value::Null);
        let details = EventDetails::from_value(&kind, raw);
        Self {
            id: event.id,
            client_id: event.client_id,
            kind,
            name: event.name,
            time: event.time,
            position: event.position,
            details,
            created_at: event.created_at,
        }
    }
}

impl From<&DomainNewEvent> for NewTimelineEvent {
    fn from(event: &DomainNewEvent) -> Self {
        Self {
            client_id: event.client_id,
            kind: event.kind.to_string(),
            name: event.name.clone(),
            time: event.time.clone(),
            position: event.position,
            details: event.details.to_value().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::details::DetailBody;
    use chrono::Utc;

    #[test]
    fn corrupt_details_blob_degrades_to_empty_bag() {
        let event = TimelineEvent {
            id: 1,
            client_id: 1,
            kind: "toasts".into(),
            name: "Toasts".into(),
            time: None,
            position: Some(0),
            details: "{not json".into(),
            created_at: Utc::now().naive_utc(),
        };
        let domain: DomainEvent = event.into();
        assert!(matches!(domain.details.body, DetailBody::Toasts(_)));
    }

    #[test]
    fn legacy_song_shapes_are_normalized_on_load() {
        let event = TimelineEvent {
            id: 2,
            client_id: 1,
            kind: "cake-cutting".into(),
            name: "Cake Cutting".into(),
            time: None,
            position: None,
            details: r#"{"cakeSong": "Sugar"}"#.into(),
            created_at: Utc::now().naive_utc(),
        };
        let domain: DomainEvent = event.into();
        match &domain.details.body {
            DetailBody::CakeCutting(d) => assert_eq!(d.cake_song.items().len(), 1),
            other => panic!("unexpected body: {other:?}"),
        }
    }
}
