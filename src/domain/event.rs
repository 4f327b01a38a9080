use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::details::EventDetails;

/// The closed set of timeline event kinds, plus a catch-all for custom cards.
/// The string forms match the stored wire names ("cocktail-hour", ...).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Ceremony,
    CocktailHour,
    Intros,
    Blessing,
    Welcome,
    Toasts,
    FirstDance,
    Dinner,
    SpecialDance1,
    SpecialDance2,
    CakeCutting,
    PhotoDash,
    OpenDancing,
    PrivateLastDance,
    LastGroupDance,
    GrandExit,
    EndOfWedding,
    Custom(String),
}

impl Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventKind::Ceremony => "ceremony",
            EventKind::CocktailHour => "cocktail-hour",
            EventKind::Intros => "intros",
            EventKind::Blessing => "blessing",
            EventKind::Welcome => "welcome",
            EventKind::Toasts => "toasts",
            EventKind::FirstDance => "first-dance",
            EventKind::Dinner => "dinner",
            EventKind::SpecialDance1 => "special-dance-1",
            EventKind::SpecialDance2 => "special-dance-2",
            EventKind::CakeCutting => "cake-cutting",
            EventKind::PhotoDash => "photo-dash",
            EventKind::OpenDancing => "open-dancing",
            EventKind::PrivateLastDance => "private-last-dance",
            EventKind::LastGroupDance => "last-group-dance",
            EventKind::GrandExit => "grand-exit",
            EventKind::EndOfWedding => "end-of-wedding",
            EventKind::Custom(s) => s.as_str(),
        };
        write!(f, "{s}")
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s {
            "ceremony" => EventKind::Ceremony,
            "cocktail-hour" => EventKind::CocktailHour,
            "intros" => EventKind::Intros,
            "blessing" => EventKind::Blessing,
            "welcome" => EventKind::Welcome,
            "toasts" => EventKind::Toasts,
            "first-dance" => EventKind::FirstDance,
            "dinner" => EventKind::Dinner,
            "special-dance-1" => EventKind::SpecialDance1,
            "special-dance-2" => EventKind::SpecialDance2,
            "cake-cutting" => EventKind::CakeCutting,
            "photo-dash" => EventKind::PhotoDash,
            "open-dancing" => EventKind::OpenDancing,
            "private-last-dance" => EventKind::PrivateLastDance,
            "last-group-dance" => EventKind::LastGroupDance,
            "grand-exit" => EventKind::GrandExit,
            "end-of-wedding" => EventKind::EndOfWedding,
            _ => EventKind::Custom(s.to_string()),
        }
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.to_string()
    }
}

/// One card on a client's timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEvent {
    pub id: i32,
    pub client_id: i32,
    pub kind: EventKind,
    /// Editable display label.
    pub name: String,
    /// Derived display string, e.g. "7:00 PM".
    pub time: Option<String>,
    /// Zero-based position in the timeline; `None` sorts last.
    pub position: Option<i32>,
    pub details: EventDetails,
    pub created_at: NaiveDateTime,
}

impl TimelineEvent {
    /// A card counts toward planning progress once it has a display time.
    pub fn is_planned(&self) -> bool {
        self.time.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

#[derive(Clone, Debug)]
pub struct NewTimelineEvent {
    pub client_id: i32,
    pub kind: EventKind,
    pub name: String,
    pub time: Option<String>,
    pub position: Option<i32>,
    pub details: EventDetails,
}

impl NewTimelineEvent {
    /// Event created from a catalog template, details empty.
    pub fn from_template(client_id: i32, template: &EventTemplate) -> Self {
        Self {
            client_id,
            kind: template.kind.clone(),
            name: template.default_name.to_string(),
            time: None,
            position: None,
            details: EventDetails::empty(&template.kind),
        }
    }

    /// Blank custom card.
    pub fn blank(client_id: i32, name: Option<String>) -> Self {
        let kind = EventKind::Custom("custom".to_string());
        Self {
            client_id,
            kind: kind.clone(),
            name: name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Custom Event".to_string()),
            time: None,
            position: None,
            details: EventDetails::empty(&kind),
        }
    }
}

/// Field-level changes applied by rename and detail edits. `None` leaves the
/// stored value untouched; `time` uses a nested option so it can be cleared.
#[derive(Clone, Debug, Default)]
pub struct EventChanges {
    pub name: Option<String>,
    pub time: Option<Option<String>>,
    pub details: Option<EventDetails>,
}

/// Static catalog entry used to seed timelines and drive detail forms.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EventTemplate {
    pub kind: EventKind,
    pub default_name: &'static str,
}

/// The full template catalog in the default wedding sequence.
pub const fn catalog() -> &'static [EventTemplate] {
    const CATALOG: &[EventTemplate] = &[
        EventTemplate {
            kind: EventKind::Ceremony,
            default_name: "Ceremony",
        },
        EventTemplate {
            kind: EventKind::CocktailHour,
            default_name: "Cocktail Hour",
        },
        EventTemplate {
            kind: EventKind::Intros,
            default_name: "Introductions",
        },
        EventTemplate {
            kind: EventKind::Blessing,
            default_name: "Blessing",
        },
        EventTemplate {
            kind: EventKind::Welcome,
            default_name: "Welcome",
        },
        EventTemplate {
            kind: EventKind::FirstDance,
            default_name: "First Dance",
        },
        EventTemplate {
            kind: EventKind::Dinner,
            default_name: "Dinner",
        },
        EventTemplate {
            kind: EventKind::Toasts,
            default_name: "Toasts",
        },
        EventTemplate {
            kind: EventKind::SpecialDance1,
            default_name: "Special Dance",
        },
        EventTemplate {
            kind: EventKind::SpecialDance2,
            default_name: "Special Dance",
        },
        EventTemplate {
            kind: EventKind::CakeCutting,
            default_name: "Cake Cutting",
        },
        EventTemplate {
            kind: EventKind::PhotoDash,
            default_name: "Photo Dash",
        },
        EventTemplate {
            kind: EventKind::OpenDancing,
            default_name: "Open Dancing",
        },
        EventTemplate {
            kind: EventKind::PrivateLastDance,
            default_name: "Private Last Dance",
        },
        EventTemplate {
            kind: EventKind::LastGroupDance,
            default_name: "Last Group Dance",
        },
        EventTemplate {
            kind: EventKind::GrandExit,
            default_name: "Grand Exit",
        },
        EventTemplate {
            kind: EventKind::EndOfWedding,
            default_name: "End of Wedding",
        },
    ];
    CATALOG
}

/// Looks up the template for a kind, if it is a catalog kind.
pub fn template_for(kind: &EventKind) -> Option<&'static EventTemplate> {
    catalog().iter().find(|t| &t.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_wire_name() {
        for template in catalog() {
            let wire = template.kind.to_string();
            assert_eq!(EventKind::from(wire.as_str()), template.kind);
        }
    }

    #[test]
    fn unknown_kind_becomes_custom() {
        let kind = EventKind::from("sparkler-sendoff");
        assert_eq!(kind, EventKind::Custom("sparkler-sendoff".to_string()));
        assert_eq!(kind.to_string(), "sparkler-sendoff");
    }

    #[test]
    fn catalog_ends_with_end_of_wedding() {
        let last = catalog().last().unwrap();
        assert_eq!(last.kind, EventKind::EndOfWedding);
    }

    #[test]
    fn blank_event_defaults_its_name() {
        let event = NewTimelineEvent::blank(1, Some("  ".into()));
        assert_eq!(event.name, "Custom Event");
        let named = NewTimelineEvent::blank(1, Some("Sparkler Exit".into()));
        assert_eq!(named.name, "Sparkler Exit");
    }
}
