use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::general_info::{
    GeneralInfo as DomainGeneralInfo, UpsertGeneralInfo as DomainUpsertGeneralInfo,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::general_info)]
/// Diesel model for [`crate::domain::general_info::GeneralInfo`].
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::general_info)]
pub struct NewGeneralInfo<'a> {
    pub client_id: i32,
    pub venue_name: Option<&'a str>,
    pub venue_address: Option<&'a str>,
    pub different_ceremony_venue: bool,
    pub ceremony_venue_name: Option<&'a str>,
    pub ceremony_venue_address: Option<&'a str>,
    pub planner_name: Option<&'a str>,
    pub planner_email: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::general_info)]
#[diesel(treat_none_as_null = true)]
/// Full-row update: the upsert always carries every field, so `None` means
/// "clear the column" here.
pub struct UpdateGeneralInfo<'a> {
    pub venue_name: Option<&'a str>,
    pub venue_address: Option<&'a str>,
    pub different_ceremony_venue: bool,
    pub ceremony_venue_name: Option<&'a str>,
    pub ceremony_venue_address: Option<&'a str>,
    pub planner_name: Option<&'a str>,
    pub planner_email: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<GeneralInfo> for DomainGeneralInfo {
    fn from(info: GeneralInfo) -> Self {
        Self {
            id: info.id,
            client_id: info.client_id,
            venue_name: info.venue_name,
            venue_address: info.venue_address,
            different_ceremony_venue: info.different_ceremony_venue,
            ceremony_venue_name: info.ceremony_venue_name,
            ceremony_venue_address: info.ceremony_venue_address,
            planner_name: info.planner_name,
            planner_email: info.planner_email,
            updated_at: info.updated_at,
        }
    }
}

impl<'a> NewGeneralInfo<'a> {
    pub fn from_domain(client_id: i32, info: &'a DomainUpsertGeneralInfo) -> Self {
        Self {
            client_id,
            venue_name: info.venue_name.as_deref(),
            venue_address: info.venue_address.as_deref(),
            different_ceremony_venue: info.different_ceremony_venue,
            ceremony_venue_name: info.ceremony_venue_name.as_deref(),
            ceremony_venue_address: info.ceremony_venue_address.as_deref(),
            planner_name: info.planner_name.as_deref(),
            planner_email: info.planner_email.as_deref(),
        }
    }
}

impl<'a> UpdateGeneralInfo<'a> {
    pub fn from_domain(info: &'a DomainUpsertGeneralInfo, now: NaiveDateTime) -> Self {
        Self {
            venue_name: info.venue_name.as_deref(),
            venue_address: info.venue_address.as_deref(),
            different_ceremony_venue: info.different_ceremony_venue,
            ceremony_venue_name: info.ceremony_venue_name.as_deref(),
            ceremony_venue_address: info.ceremony_venue_address.as_deref(),
            planner_name: info.planner_name.as_deref(),
            planner_email: info.planner_email.as_deref(),
            updated_at: now,
        }
    }
}
