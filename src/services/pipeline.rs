//! Pipeline stage classification and planning progress.

use chrono::NaiveDate;

use crate::domain::client::Client;
use crate::domain::event::TimelineEvent;
use crate::domain::general_info::GeneralInfo;
use crate::domain::stage::PipelineStage;

/// First-match-wins stage classification. `today` is passed in so the
/// function stays pure; the comparison is date-only.
pub fn classify(client: &Client, today: NaiveDate) -> PipelineStage {
    if client.archived {
        return PipelineStage::Archive;
    }
    if client.event_date.is_some_and(|date| date < today) {
        return PipelineStage::Completed;
    }
    match (client.is_signed(), client.deposit_paid) {
        (true, true) => PipelineStage::Booked,
        (true, false) => PipelineStage::AwaitingDeposit,
        (false, _) => PipelineStage::AwaitingSignature,
    }
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Percentage of completed checklist items: four general-info fields (six
/// when the ceremony has its own venue) plus one item per timeline event.
/// An event counts once it has a display time. The four fixed items are in
/// the total even when no info row has been saved yet, so progress never
/// jumps when an empty row appears.
pub fn planning_progress(info: Option<&GeneralInfo>, events: &[TimelineEvent]) -> u8 {
    let mut total = 4usize;
    let mut done = 0usize;

    if let Some(info) = info {
        done += usize::from(filled(&info.venue_name));
        done += usize::from(filled(&info.venue_address));
        done += usize::from(filled(&info.planner_name));
        done += usize::from(filled(&info.planner_email));
        if info.different_ceremony_venue {
            total += 2;
            done += usize::from(filled(&info.ceremony_venue_name));
            done += usize::from(filled(&info.ceremony_venue_address));
        }
    }

    total += events.len();
    done += events.iter().filter(|e| e.is_planned()).count();

    ((done * 100) / total) as u8
}
