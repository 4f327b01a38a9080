use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Venue and planner details; at most one row per client, upserted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeneralInfo {
    pub id: i32,
    pub client_id: i32,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub different_ceremony_venue: bool,
    pub ceremony_venue_name: Option<String>,
    pub ceremony_venue_address: Option<String>,
    pub planner_name: Option<String>,
    pub planner_email: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Upsert payload. Ceremony venue fields are only meaningful when
/// `different_ceremony_venue` is set; [`UpsertGeneralInfo::new`] clears them
/// otherwise so stale values never linger.
#[derive(Clone, Debug, Deserialize)]
pub struct UpsertGeneralInfo {
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub different_ceremony_venue: bool,
    pub ceremony_venue_name: Option<String>,
    pub ceremony_venue_address: Option<String>,
    pub planner_name: Option<String>,
    pub planner_email: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl UpsertGeneralInfo {
    pub fn new(
        venue_name: Option<String>,
        venue_address: Option<String>,
        different_ceremony_venue: bool,
        ceremony_venue_name: Option<String>,
        ceremony_venue_address: Option<String>,
        planner_name: Option<String>,
        planner_email: Option<String>,
    ) -> Self {
        let (ceremony_venue_name, ceremony_venue_address) = if different_ceremony_venue {
            (trimmed(ceremony_venue_name), trimmed(ceremony_venue_address))
        } else {
            (None, None)
        };
        Self {
            venue_name: trimmed(venue_name),
            venue_address: trimmed(venue_address),
            different_ceremony_venue,
            ceremony_venue_name,
            ceremony_venue_address,
            planner_name: trimmed(planner_name),
            planner_email: trimmed(planner_email).map(|s| s.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceremony_fields_cleared_when_same_venue() {
        let info = UpsertGeneralInfo::new(
            Some("The Barn".into()),
            None,
            false,
            Some("Chapel".into()),
            Some("1 Chapel Rd".into()),
            None,
            None,
        );
        assert_eq!(info.ceremony_venue_name, None);
        assert_eq!(info.ceremony_venue_address, None);
    }

    #[test]
    fn ceremony_fields_kept_when_flag_set() {
        let info = UpsertGeneralInfo::new(
            Some("The Barn".into()),
            None,
            true,
            Some("Chapel".into()),
            None,
            None,
            Some(" Planner@Example.com ".into()),
        );
        assert_eq!(info.ceremony_venue_name.as_deref(), Some("Chapel"));
        assert_eq!(info.planner_email.as_deref(), Some("planner@example.com"));
    }
}
