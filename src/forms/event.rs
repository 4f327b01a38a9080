//! Timeline event input forms plus the per-kind field descriptor table the
//! front end renders detail forms from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::event::{EventKind, NewTimelineEvent, template_for};
use crate::forms::{FormError, sanitize_patch, sanitize_text};

/// Body for adding a timeline event. A catalog `kind` creates a template
/// card; no kind (or an unknown one) creates a blank custom card.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEventForm {
    pub kind: Option<String>,
    pub name: Option<String>,
}

impl AddEventForm {
    /// Builds the creation payload; `client_id` is filled in by the service.
    pub fn into_new_event(self) -> NewTimelineEvent {
        let name = self.name.map(|n| sanitize_text(&n));
        match self
            .kind
            .as_deref()
            .map(EventKind::from)
            .as_ref()
            .and_then(template_for)
        {
            Some(template) => NewTimelineEvent::from_template(0, template),
            None => NewTimelineEvent::blank(0, name),
        }
    }
}

/// Body for renaming an event.
#[derive(Deserialize)]
pub struct RenameEventForm {
    pub name: String,
}

impl RenameEventForm {
    pub fn sanitized_name(&self) -> String {
        sanitize_text(&self.name)
    }
}

/// Raw key/value detail patch. Values are sanitized before they reach the
/// domain merge; a non-object body is rejected.
pub struct DetailPatchForm(pub Map<String, Value>);

impl TryFrom<Value> for DetailPatchForm {
    type Error = FormError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(DetailPatchForm(sanitize_patch(map))),
            _ => Err(FormError::Invalid(
                "detail patch must be a JSON object".to_string(),
            )),
        }
    }
}

/// Widget kinds the form renderer understands.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Widget {
    Text,
    TextArea,
    Time,
    Select,
    Song,
    LineDances,
    Toggle,
}

/// Shows a field only when another field holds a specific value.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct VisibleWhen {
    pub field: &'static str,
    pub equals: &'static str,
}

/// One row of the detail form: storage key, display label, widget and an
/// optional visibility condition.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibleWhen>,
}

const fn field(id: &'static str, label: &'static str, widget: Widget) -> FieldDescriptor {
    FieldDescriptor {
        id,
        label,
        widget,
        visible_when: None,
    }
}

const fn field_when(
    id: &'static str,
    label: &'static str,
    widget: Widget,
    when: &'static str,
    equals: &'static str,
) -> FieldDescriptor {
    FieldDescriptor {
        id,
        label,
        widget,
        visible_when: Some(VisibleWhen {
            field: when,
            equals,
        }),
    }
}

const START_TIME: FieldDescriptor = field("startTime", "Start Time", Widget::Time);

const CEREMONY: &[FieldDescriptor] = &[
    START_TIME,
    field("location", "Location", Widget::Text),
    field("arrivalMusicStyle", "Arrival Music Style", Widget::Text),
    field("processionalSong", "Processional Song", Widget::Song),
    field("brideEntrance", "Bride Entrance", Widget::Song),
    field("recessionalSong", "Recessional Song", Widget::Song),
    field("hasSpecialActivity", "Special Activity?", Widget::Select),
    field_when(
        "specialActivityType",
        "Special Activity",
        Widget::Text,
        "hasSpecialActivity",
        "yes",
    ),
    field_when(
        "specialActivitySong",
        "Song for the Activity?",
        Widget::Select,
        "hasSpecialActivity",
        "yes",
    ),
    field_when(
        "specialActivitySongTitle",
        "Special Activity Song",
        Widget::Text,
        "specialActivitySong",
        "yes",
    ),
];

const COCKTAIL_HOUR: &[FieldDescriptor] = &[
    START_TIME,
    field("location", "Location", Widget::Text),
    field("musicStyle", "Music Style", Widget::Text),
    field("playlist", "Music", Widget::Song),
];

const INTROS: &[FieldDescriptor] = &[
    START_TIME,
    field("introduceParty", "Introduce the Wedding Party?", Widget::Select),
    field_when("introSong", "Intro Song", Widget::Song, "introduceParty", "yes"),
    field_when(
        "weddingParty",
        "Wedding Party",
        Widget::TextArea,
        "introduceParty",
        "yes",
    ),
];

const DANCE: &[FieldDescriptor] = &[
    START_TIME,
    field("songChoice", "Song Choice", Widget::Song),
    field("durationChoice", "Play the Whole Song?", Widget::Select),
    field_when("startAt", "Start At", Widget::Text, "durationChoice", "partial"),
    field_when("endAt", "End At", Widget::Text, "durationChoice", "partial"),
];

const SPECIAL_DANCE: &[FieldDescriptor] = &[
    START_TIME,
    field("danceType", "Dance Type", Widget::Select),
    field_when(
        "otherDanceType",
        "Other Dance Type",
        Widget::Text,
        "danceType",
        "other",
    ),
    field("songChoice", "Song Choice", Widget::Song),
];

const GIVEN_BY: &[FieldDescriptor] = &[START_TIME, field("givenBy", "Given By", Widget::Text)];

const TOASTS: &[FieldDescriptor] = &[
    START_TIME,
    field("toastGivers", "Toast Givers", Widget::TextArea),
];

const CAKE_CUTTING: &[FieldDescriptor] =
    &[START_TIME, field("cakeSong", "Cake Song", Widget::Song)];

const PHOTO_DASH: &[FieldDescriptor] = &[
    START_TIME,
    field("photoDashSong", "Photo Dash Song", Widget::Song),
    field("photoDashStyle", "Style", Widget::Select),
    field_when(
        "photoDashOtherText",
        "Other Style",
        Widget::Text,
        "photoDashStyle",
        "other",
    ),
];

const DINNER: &[FieldDescriptor] = &[
    START_TIME,
    field("dinnerStyle", "Dinner Style", Widget::Select),
    field_when(
        "buffetRelease",
        "Buffet Release",
        Widget::Text,
        "dinnerStyle",
        "buffet",
    ),
];

const OPEN_DANCING: &[FieldDescriptor] = &[
    START_TIME,
    field("mustPlay", "Must Play", Widget::Song),
    field("playIfPossible", "Play If Possible", Widget::Song),
    field("doNotPlay", "Do Not Play", Widget::Song),
    field("lineDances", "Line Dances", Widget::LineDances),
    field("lineDanceOtherEnabled", "Other Line Dances?", Widget::Toggle),
    field_when(
        "lineDanceOtherDetails",
        "Other Line Dances",
        Widget::TextArea,
        "lineDanceOtherEnabled",
        "true",
    ),
];

const GRAND_EXIT: &[FieldDescriptor] =
    &[START_TIME, field("exitStyle", "Exit Style", Widget::Text)];

const CUSTOM: &[FieldDescriptor] = &[
    START_TIME,
    field("songChoice", "Song Choice", Widget::Song),
    field("otherDetails", "Details", Widget::TextArea),
];

const END_OF_WEDDING: &[FieldDescriptor] = &[field("endTime", "End Time", Widget::Time)];

/// The detail form rows for an event kind, in render order.
pub fn schema_for(kind: &EventKind) -> &'static [FieldDescriptor] {
    match kind {
        EventKind::Ceremony => CEREMONY,
        EventKind::CocktailHour => COCKTAIL_HOUR,
        EventKind::Intros => INTROS,
        EventKind::FirstDance | EventKind::PrivateLastDance | EventKind::LastGroupDance => DANCE,
        EventKind::SpecialDance1 | EventKind::SpecialDance2 => SPECIAL_DANCE,
        EventKind::Blessing | EventKind::Welcome => GIVEN_BY,
        EventKind::Toasts => TOASTS,
        EventKind::CakeCutting => CAKE_CUTTING,
        EventKind::PhotoDash => PHOTO_DASH,
        EventKind::Dinner => DINNER,
        EventKind::OpenDancing => OPEN_DANCING,
        EventKind::GrandExit => GRAND_EXIT,
        EventKind::EndOfWedding => END_OF_WEDDING,
        EventKind::Custom(_) => CUSTOM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::catalog;
    use serde_json::json;

    #[test]
    fn every_catalog_kind_has_a_schema() {
        for template in catalog() {
            assert!(!schema_for(&template.kind).is_empty());
        }
    }

    #[test]
    fn conditional_fields_reference_fields_in_the_same_schema() {
        for template in catalog() {
            let schema = schema_for(&template.kind);
            for descriptor in schema {
                if let Some(when) = descriptor.visible_when {
                    assert!(
                        schema.iter().any(|d| d.id == when.field),
                        "{} refers to missing field {}",
                        descriptor.id,
                        when.field
                    );
                }
            }
        }
    }

    #[test]
    fn end_of_wedding_has_only_an_end_time() {
        let schema = schema_for(&EventKind::EndOfWedding);
        assert_eq!(schema.len(), 1);
        assert_eq!(schema[0].id, "endTime");
    }

    #[test]
    fn unknown_kind_creates_a_blank_custom_card() {
        let form = AddEventForm {
            kind: Some("sparkler-sendoff".into()),
            name: Some("Sparkler Sendoff".into()),
        };
        let new_event = form.into_new_event();
        assert!(matches!(new_event.kind, EventKind::Custom(_)));
        assert_eq!(new_event.name, "Sparkler Sendoff");
    }

    #[test]
    fn non_object_patch_is_rejected() {
        assert!(DetailPatchForm::try_from(json!(["not", "an", "object"])).is_err());
        assert!(DetailPatchForm::try_from(json!({"startTime": "19:00"})).is_ok());
    }
}
