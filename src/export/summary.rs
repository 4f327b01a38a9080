//! Human-readable detail summaries for the exported timeline.
//!
//! Mirrors the per-kind field table driving the detail forms: only populated
//! fields are rendered, conditional fields honor their visibility rules, and
//! anything unrecognized falls back to a label-cased generic line.

use serde_json::{Map, Value};

use crate::domain::details::{
    DetailBody, EventDetails, LineDanceChoice, SongField,
};

/// One rendered line: label and value.
pub type SummaryLine = (String, String);

/// Converts a camelCase storage key to a display label
/// ("photoDashOtherText" → "Photo Dash Other Text").
pub fn label_case(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else {
            if c.is_uppercase() {
                label.push(' ');
            }
            label.push(c);
        }
    }
    label
}

fn song_value(field: &SongField) -> Option<String> {
    if let Some(url) = field.playlist_url() {
        return Some(format!("Playlist: {url}"));
    }
    if field.items().is_empty() {
        return None;
    }
    Some(
        field
            .items()
            .iter()
            .map(|song| song.label())
            .collect::<Vec<_>>()
            .join("; "),
    )
}

fn push_text(lines: &mut Vec<SummaryLine>, label: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        lines.push((label.to_string(), value.to_string()));
    }
}

fn push_song(lines: &mut Vec<SummaryLine>, label: &str, field: &SongField) {
    if let Some(value) = song_value(field) {
        lines.push((label.to_string(), value));
    }
}

fn generic_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().filter_map(generic_value).collect();
            (!rendered.is_empty()).then(|| rendered.join("; "))
        }
        Value::Object(_) | Value::Null => None,
    }
}

fn push_extra(lines: &mut Vec<SummaryLine>, extra: &Map<String, Value>) {
    for (key, value) in extra {
        if let Some(rendered) = generic_value(value) {
            lines.push((label_case(key), rendered));
        }
    }
}

fn is_yes(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| v.eq_ignore_ascii_case("yes"))
}

/// Renders the populated, visible fields of a detail bag in form order.
pub fn summarize(details: &EventDetails) -> Vec<SummaryLine> {
    let mut lines = Vec::new();

    match &details.body {
        DetailBody::Ceremony(d) => {
            push_text(&mut lines, "Location", &d.location);
            push_text(&mut lines, "Arrival Music Style", &d.arrival_music_style);
            push_song(&mut lines, "Processional Song", &d.processional_song);
            push_song(&mut lines, "Bride Entrance", &d.bride_entrance);
            push_song(&mut lines, "Recessional Song", &d.recessional_song);
            if is_yes(&d.has_special_activity) {
                push_text(&mut lines, "Special Activity", &d.special_activity_type);
                if is_yes(&d.special_activity_song) {
                    push_text(
                        &mut lines,
                        "Special Activity Song",
                        &d.special_activity_song_title,
                    );
                }
            }
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::CocktailHour(d) => {
            push_text(&mut lines, "Location", &d.location);
            push_text(&mut lines, "Music Style", &d.music_style);
            push_song(&mut lines, "Music", &d.playlist);
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::Intros(d) => {
            if is_yes(&d.introduce_party) {
                push_song(&mut lines, "Intro Song", &d.intro_song);
                push_text(&mut lines, "Wedding Party", &d.wedding_party);
            }
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::Dance(d) => {
            push_song(&mut lines, "Song Choice", &d.song_choice);
            if d.duration_choice.as_deref() == Some("partial") {
                push_text(&mut lines, "Start At", &d.start_at);
                push_text(&mut lines, "End At", &d.end_at);
            }
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::SpecialDance(d) => {
            push_text(&mut lines, "Dance Type", &d.dance_type);
            if d.dance_type.as_deref() == Some("other") {
                push_text(&mut lines, "Other Dance Type", &d.other_dance_type);
            }
            push_song(&mut lines, "Song Choice", &d.song_choice);
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::GivenBy(d) => {
            push_text(&mut lines, "Given By", &d.given_by);
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::Toasts(d) => {
            push_text(&mut lines, "Toast Givers", &d.toast_givers);
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::CakeCutting(d) => {
            push_song(&mut lines, "Cake Song", &d.cake_song);
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::PhotoDash(d) => {
            push_song(&mut lines, "Photo Dash Song", &d.photo_dash_song);
            push_text(&mut lines, "Style", &d.photo_dash_style);
            if d.photo_dash_style.as_deref() == Some("other") {
                push_text(&mut lines, "Other Style", &d.photo_dash_other_text);
            }
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::Dinner(d) => {
            push_text(&mut lines, "Dinner Style", &d.dinner_style);
            if d.dinner_style.as_deref() == Some("buffet") {
                push_text(&mut lines, "Buffet Release", &d.buffet_release);
            }
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::OpenDancing(d) => {
            push_song(&mut lines, "Must Play", &d.must_play);
            push_song(&mut lines, "Play If Possible", &d.play_if_possible);
            push_song(&mut lines, "Do Not Play", &d.do_not_play);
            let mut must = Vec::new();
            let mut skip = Vec::new();
            for (dance, choice) in &d.line_dances {
                match choice {
                    LineDanceChoice::Must => must.push(dance.as_str()),
                    LineDanceChoice::No => skip.push(dance.as_str()),
                    LineDanceChoice::Maybe => {}
                }
            }
            if !must.is_empty() {
                lines.push(("Line Dances".to_string(), must.join("; ")));
            }
            if !skip.is_empty() {
                lines.push(("Skip Line Dances".to_string(), skip.join("; ")));
            }
            if d.line_dance_other_enabled {
                push_text(&mut lines, "Other Line Dances", &d.line_dance_other_details);
            }
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::GrandExit(d) => {
            push_text(&mut lines, "Exit Style", &d.exit_style);
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::Custom(d) => {
            push_song(&mut lines, "Song Choice", &d.song_choice);
            push_text(&mut lines, "Details", &d.other_details);
            push_extra(&mut lines, &d.extra);
        }
        DetailBody::EndOfWedding(d) => {
            push_text(&mut lines, "End Time", &d.end_time);
            push_extra(&mut lines, &d.extra);
        }
    }

    lines
}
