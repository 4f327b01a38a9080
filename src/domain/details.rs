//! Per-event-type detail bags.
//!
//! The original data lived as loosely-typed key/value blobs. Here every event
//! kind gets a concrete struct, with a flattened `extra` map as the escape
//! hatch for unknown/legacy keys so old records keep loading. Ambiguous song
//! shapes are normalized on deserialize and never propagate further.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::event::EventKind;

/// Maximum number of individual song entries a single field may hold.
pub const MAX_SONG_ITEMS: usize = 5;

/// The ten line dances offered on the open-dancing form.
pub const LINE_DANCES: [&str; 10] = [
    "Cha Cha Slide",
    "Cupid Shuffle",
    "Electric Slide",
    "Wobble",
    "Macarena",
    "YMCA",
    "Cotton Eyed Joe",
    "Chicken Dance",
    "Hokey Pokey",
    "Conga Line",
];

/// A single song reference: either a hit from the lookup service or a pasted
/// link.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SongRef {
    #[serde(rename_all = "camelCase")]
    Search {
        track_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        artist_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        artwork_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preview_url: Option<String>,
    },
    Link { url: String },
}

impl SongRef {
    /// Normalizes any historical shape (bare string, untagged object) into
    /// the two-variant form. Returns `None` for shapes carrying no content.
    pub fn normalize(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else if s.starts_with("http://") || s.starts_with("https://") {
                    Some(SongRef::Link { url: s.to_string() })
                } else {
                    Some(SongRef::Search {
                        track_name: s.to_string(),
                        artist_name: None,
                        artwork_url: None,
                        preview_url: None,
                    })
                }
            }
            Value::Object(map) => {
                let str_field = |keys: &[&str]| -> Option<String> {
                    keys.iter()
                        .filter_map(|k| map.get(*k))
                        .filter_map(Value::as_str)
                        .map(str::trim)
                        .find(|s| !s.is_empty())
                        .map(str::to_string)
                };
                let tag = str_field(&["type"]);
                let url = str_field(&["url"]);
                let track = str_field(&["trackName", "name", "title"]);
                match (tag.as_deref(), url, track) {
                    (Some("link"), Some(url), _) | (None, Some(url), None) => {
                        Some(SongRef::Link { url })
                    }
                    (_, _, Some(track_name)) => Some(SongRef::Search {
                        track_name,
                        artist_name: str_field(&["artistName", "artist"]),
                        artwork_url: str_field(&["artworkUrl", "artwork"]),
                        preview_url: str_field(&["previewUrl", "preview"]),
                    }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Short human-readable label used by the document exporter.
    pub fn label(&self) -> String {
        match self {
            SongRef::Search {
                track_name,
                artist_name,
                ..
            } => match artist_name {
                Some(artist) => format!("{track_name} — {artist}"),
                None => track_name.clone(),
            },
            SongRef::Link { url } => url.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for SongRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        SongRef::normalize(&value)
            .ok_or_else(|| serde::de::Error::custom("unrecognized song reference shape"))
    }
}

/// A song slot on a detail form: either a list of up to [`MAX_SONG_ITEMS`]
/// individual references, or a single playlist URL. The two modes are
/// mutually exclusive; setting one clears the other.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SongField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    playlist_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    items: Vec<SongRef>,
}

impl SongField {
    pub fn playlist_url(&self) -> Option<&str> {
        self.playlist_url.as_deref()
    }

    pub fn items(&self) -> &[SongRef] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.playlist_url.is_none() && self.items.is_empty()
    }

    /// Switches the field into playlist mode, dropping any individual items.
    /// Passing an empty/blank URL clears playlist mode instead.
    pub fn set_playlist(&mut self, url: Option<String>) {
        let url = url.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        if url.is_some() {
            self.items.clear();
        }
        self.playlist_url = url;
    }

    /// Appends a song reference, leaving playlist mode if it was active.
    /// Items beyond the per-field maximum are rejected.
    pub fn push_item(&mut self, song: SongRef) -> bool {
        self.playlist_url = None;
        if self.items.len() >= MAX_SONG_ITEMS {
            return false;
        }
        self.items.push(song);
        true
    }

    /// Accepts any historical shape and enforces mode exclusivity.
    fn from_json(value: &Value) -> Self {
        let mut field = SongField::default();
        match value {
            Value::Array(values) => {
                for v in values {
                    if let Some(song) = SongRef::normalize(v) {
                        field.push_item(song);
                    }
                }
            }
            Value::Object(map) => {
                for v in map
                    .get("items")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default()
                {
                    if let Some(song) = SongRef::normalize(v) {
                        field.push_item(song);
                    }
                }
                let playlist = map
                    .get("playlistUrl")
                    .or_else(|| map.get("playlist"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                if playlist.is_some() {
                    field.set_playlist(playlist);
                }
            }
            other => {
                if let Some(song) = SongRef::normalize(other) {
                    field.push_item(song);
                }
            }
        }
        field
    }
}

impl<'de> Deserialize<'de> for SongField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(SongField::from_json(&value))
    }
}

/// Tri-state choice for a line dance.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineDanceChoice {
    Must,
    #[default]
    Maybe,
    No,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CeremonyDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_music_style: Option<String>,
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub processional_song: SongField,
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub bride_entrance: SongField,
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub recessional_song: SongField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_special_activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_activity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_activity_song: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_activity_song_title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CocktailHourDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_style: Option<String>,
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub playlist: SongField,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntrosDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduce_party: Option<String>,
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub intro_song: SongField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wedding_party: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shared by first-dance, private-last-dance and last-group-dance.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DanceDetails {
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub song_choice: SongField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_choice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDanceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dance_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_dance_type: Option<String>,
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub song_choice: SongField,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpecialDanceDetails {
    /// Display name the event is renamed to when a dance type is chosen.
    pub fn display_name(&self) -> Option<String> {
        match self.dance_type.as_deref()? {
            "father-daughter" => Some("Father Daughter Dance".to_string()),
            "mother-son" => Some("Mother Son Dance".to_string()),
            "other" => self
                .other_dance_type
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| format!("{s} Dance")),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GivenByDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_by: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToastsDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toast_givers: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CakeCuttingDetails {
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub cake_song: SongField,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDashDetails {
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub photo_dash_song: SongField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_dash_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_dash_other_text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DinnerDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffet_release: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenDancingDetails {
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub must_play: SongField,
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub play_if_possible: SongField,
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub do_not_play: SongField,
    /// Keyed by the names in [`LINE_DANCES`].
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub line_dances: BTreeMap<String, LineDanceChoice>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub line_dance_other_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_dance_other_details: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrandExitDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_style: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomDetails {
    #[serde(default, skip_serializing_if = "SongField::is_empty")]
    pub song_choice: SongField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_details: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndOfWeddingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The per-kind body of a detail bag.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailBody {
    Ceremony(CeremonyDetails),
    CocktailHour(CocktailHourDetails),
    Intros(IntrosDetails),
    Dance(DanceDetails),
    SpecialDance(SpecialDanceDetails),
    GivenBy(GivenByDetails),
    Toasts(ToastsDetails),
    CakeCutting(CakeCuttingDetails),
    PhotoDash(PhotoDashDetails),
    Dinner(DinnerDetails),
    OpenDancing(OpenDancingDetails),
    GrandExit(GrandExitDetails),
    Custom(CustomDetails),
    EndOfWedding(EndOfWeddingDetails),
}

/// A fully-typed detail bag: the per-kind body plus the shared `startTime`
/// key every event may carry.
#[derive(Clone, Debug, PartialEq)]
pub struct EventDetails {
    pub start_time: Option<String>,
    pub body: DetailBody,
}

fn parse_body<T>(value: Value) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    serde_json::from_value(value).unwrap_or_default()
}

impl EventDetails {
    /// Empty detail bag for the given kind.
    pub fn empty(kind: &EventKind) -> Self {
        Self::from_value(kind, Value::Object(Map::new()))
    }

    /// Parses a stored detail blob, normalizing legacy shapes. This is the
    /// only place ambiguous JSON is allowed to exist; everything past it is
    /// typed.
    pub fn from_value(kind: &EventKind, value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let start_time = map
            .remove("startTime")
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let rest = Value::Object(map);

        let body = match kind {
            EventKind::Ceremony => DetailBody::Ceremony(parse_body(rest)),
            EventKind::CocktailHour => DetailBody::CocktailHour(parse_body(rest)),
            EventKind::Intros => DetailBody::Intros(parse_body(rest)),
            EventKind::FirstDance | EventKind::PrivateLastDance | EventKind::LastGroupDance => {
                DetailBody::Dance(parse_body(rest))
            }
            EventKind::SpecialDance1 | EventKind::SpecialDance2 => {
                DetailBody::SpecialDance(parse_body(rest))
            }
            EventKind::Blessing | EventKind::Welcome => DetailBody::GivenBy(parse_body(rest)),
            EventKind::Toasts => DetailBody::Toasts(parse_body(rest)),
            EventKind::CakeCutting => DetailBody::CakeCutting(parse_body(rest)),
            EventKind::PhotoDash => DetailBody::PhotoDash(parse_body(rest)),
            EventKind::Dinner => DetailBody::Dinner(parse_body(rest)),
            EventKind::OpenDancing => DetailBody::OpenDancing(parse_body(rest)),
            EventKind::GrandExit => DetailBody::GrandExit(parse_body(rest)),
            EventKind::EndOfWedding => DetailBody::EndOfWedding(parse_body(rest)),
            EventKind::Custom(_) => DetailBody::Custom(parse_body(rest)),
        };

        Self { start_time, body }
    }

    /// Serializes back to the storage shape.
    pub fn to_value(&self) -> Value {
        let body = match &self.body {
            DetailBody::Ceremony(d) => serde_json::to_value(d),
            DetailBody::CocktailHour(d) => serde_json::to_value(d),
            DetailBody::Intros(d) => serde_json::to_value(d),
            DetailBody::Dance(d) => serde_json::to_value(d),
            DetailBody::SpecialDance(d) => serde_json::to_value(d),
            DetailBody::GivenBy(d) => serde_json::to_value(d),
            DetailBody::Toasts(d) => serde_json::to_value(d),
            DetailBody::CakeCutting(d) => serde_json::to_value(d),
            DetailBody::PhotoDash(d) => serde_json::to_value(d),
            DetailBody::Dinner(d) => serde_json::to_value(d),
            DetailBody::OpenDancing(d) => serde_json::to_value(d),
            DetailBody::GrandExit(d) => serde_json::to_value(d),
            DetailBody::Custom(d) => serde_json::to_value(d),
            DetailBody::EndOfWedding(d) => serde_json::to_value(d),
        };
        let mut map = match body {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        if let Some(start_time) = &self.start_time {
            map.insert("startTime".to_string(), Value::String(start_time.clone()));
        }
        Value::Object(map)
    }

    /// Merges a key/value patch into the bag, re-parsing through the typed
    /// schema. Keys set to `null` in the patch are removed.
    pub fn merge(&self, kind: &EventKind, patch: Map<String, Value>) -> Self {
        let mut map = match self.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in patch {
            if value.is_null() {
                map.remove(&key);
            } else {
                map.insert(key, value);
            }
        }
        Self::from_value(kind, Value::Object(map))
    }
}

/// Formats a 24h "HH:MM" string as a 12h display time ("19:00" → "7:00 PM").
/// Unparseable input is returned unchanged.
pub fn format_display_time(raw: &str) -> String {
    match NaiveTime::parse_from_str(raw.trim(), "%H:%M") {
        Ok(time) => time.format("%-I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}
