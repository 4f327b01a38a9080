//! Timeline page payload: the ordered cards, their form schemas and the
//! planning progress figure.

use serde::Serialize;
use serde_json::Value;

use crate::domain::event::TimelineEvent;
use crate::domain::general_info::GeneralInfo;
use crate::forms::event::{FieldDescriptor, schema_for};
use crate::services::pipeline::planning_progress;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: i32,
    pub kind: String,
    pub name: String,
    pub time: Option<String>,
    pub position: Option<i32>,
    pub details: Value,
    pub schema: &'static [FieldDescriptor],
}

impl From<&TimelineEvent> for EventView {
    fn from(event: &TimelineEvent) -> Self {
        Self {
            id: event.id,
            kind: event.kind.to_string(),
            name: event.name.clone(),
            time: event.time.clone(),
            position: event.position,
            details: event.details.to_value(),
            schema: schema_for(&event.kind),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePage {
    pub events: Vec<EventView>,
    pub general_info: Option<GeneralInfo>,
    /// Planning progress percentage, 0 to 100.
    pub progress: u8,
}

impl TimelinePage {
    pub fn build(events: &[TimelineEvent], general_info: Option<GeneralInfo>) -> Self {
        let progress = planning_progress(general_info.as_ref(), events);
        Self {
            events: events.iter().map(EventView::from).collect(),
            general_info,
            progress,
        }
    }
}
