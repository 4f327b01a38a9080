//! Top-to-bottom layout of a client timeline onto a [`DocumentCanvas`].

use crate::domain::client::Client;
use crate::domain::event::TimelineEvent;
use crate::domain::general_info::GeneralInfo;
use crate::export::canvas::{
    DocumentCanvas, MARGIN_MM, PAGE_WIDTH_MM, PRINTABLE_HEIGHT_MM, TextStyle,
};
use crate::export::summary::summarize;

const LINE_MM: f32 = 6.0;
const HEADING_MM: f32 = 8.0;
const BLOCK_GAP_MM: f32 = 4.0;
const LOGO_HEIGHT_MM: f32 = 25.0;

/// Everything the exporter needs for one document.
#[derive(Debug)]
pub struct ExportBundle {
    pub client: Client,
    pub events: Vec<TimelineEvent>,
    pub general_info: Option<GeneralInfo>,
}

struct Block {
    heading: String,
    lines: Vec<String>,
}

impl Block {
    fn height(&self) -> f32 {
        HEADING_MM + self.lines.len() as f32 * LINE_MM + BLOCK_GAP_MM
    }
}

/// Cursor that opens a new page whenever the next block would overflow the
/// printable height.
struct Cursor {
    y_mm: f32,
}

impl Cursor {
    fn new() -> Self {
        Self { y_mm: MARGIN_MM }
    }

    fn ensure_room(&mut self, canvas: &mut dyn DocumentCanvas, height_mm: f32) {
        if self.y_mm + height_mm > MARGIN_MM + PRINTABLE_HEIGHT_MM {
            canvas.new_page();
            self.y_mm = MARGIN_MM;
        }
    }

    fn advance(&mut self, height_mm: f32) {
        self.y_mm += height_mm;
    }
}

fn event_heading(event: &TimelineEvent) -> String {
    match event.time.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(time) => format!("{time} — {}", event.name),
        None => event.name.clone(),
    }
}

fn header_lines(client: &Client, info: Option<&GeneralInfo>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(date) = client.event_date {
        lines.push(date.format("%B %-d, %Y").to_string());
    }
    let venue_name = info
        .and_then(|i| i.venue_name.as_deref())
        .or(client.venue_name.as_deref());
    let venue_address = info
        .and_then(|i| i.venue_address.as_deref())
        .or(client.venue_address.as_deref());
    match (venue_name, venue_address) {
        (Some(name), Some(address)) => lines.push(format!("{name}, {address}")),
        (Some(name), None) => lines.push(name.to_string()),
        (None, Some(address)) => lines.push(address.to_string()),
        (None, None) => {}
    }
    if let Some(info) = info {
        if info.different_ceremony_venue {
            match (
                info.ceremony_venue_name.as_deref(),
                info.ceremony_venue_address.as_deref(),
            ) {
                (Some(name), Some(address)) => {
                    lines.push(format!("Ceremony: {name}, {address}"));
                }
                (Some(name), None) => lines.push(format!("Ceremony: {name}")),
                _ => {}
            }
        }
        if let Some(planner) = info.planner_name.as_deref() {
            lines.push(format!("Planner: {planner}"));
        }
    }
    lines
}

fn title(client: &Client) -> String {
    if let Some(event_name) = client.event_name.as_deref().filter(|s| !s.trim().is_empty()) {
        return event_name.to_string();
    }
    match client.fiance_name.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(fiance) => format!("{} & {fiance}", client.client_name),
        None => client.client_name.clone(),
    }
}

/// Renders the bundle onto the canvas. Events are drawn in ascending
/// position, unordered events last, ties kept stable. The logo is optional;
/// a missing asset never fails the export.
pub fn render_timeline(
    canvas: &mut dyn DocumentCanvas,
    bundle: &ExportBundle,
    logo: Option<&[u8]>,
) {
    let mut cursor = Cursor::new();

    if let Some(logo) = logo {
        let logo_width = 50.0;
        canvas.draw_image(
            (PAGE_WIDTH_MM - logo_width) / 2.0,
            cursor.y_mm,
            logo_width,
            LOGO_HEIGHT_MM,
            logo,
        );
        cursor.advance(LOGO_HEIGHT_MM + BLOCK_GAP_MM);
    }

    canvas.draw_text(MARGIN_MM, cursor.y_mm, &title(&bundle.client), TextStyle::TITLE);
    cursor.advance(HEADING_MM + 2.0);

    for line in header_lines(&bundle.client, bundle.general_info.as_ref()) {
        canvas.draw_text(MARGIN_MM, cursor.y_mm, &line, TextStyle::BODY);
        cursor.advance(LINE_MM);
    }

    canvas.draw_rect(MARGIN_MM, cursor.y_mm, PAGE_WIDTH_MM - 2.0 * MARGIN_MM, 0.5);
    cursor.advance(BLOCK_GAP_MM);

    let mut events: Vec<&TimelineEvent> = bundle.events.iter().collect();
    events.sort_by_key(|e| e.position.map_or(i64::MAX, i64::from));

    for event in events {
        let block = Block {
            heading: event_heading(event),
            lines: summarize(&event.details)
                .into_iter()
                .map(|(label, value)| format!("{label}: {value}"))
                .collect(),
        };

        cursor.ensure_room(canvas, block.height());

        canvas.draw_text(MARGIN_MM, cursor.y_mm, &block.heading, TextStyle::HEADING);
        cursor.advance(HEADING_MM);
        for line in &block.lines {
            canvas.draw_text(MARGIN_MM + 5.0, cursor.y_mm, line, TextStyle::BODY);
            cursor.advance(LINE_MM);
        }
        cursor.advance(BLOCK_GAP_MM);
    }
}
