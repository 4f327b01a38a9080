use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{Money, PhoneNumber};
use crate::forms::FormError;

/// Payload for creating a client record.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddClientForm {
    #[validate(length(min = 1))]
    pub event_type: String,
    pub event_name: Option<String>,
    #[validate(length(min = 1))]
    pub client_name: String,
    pub fiance_name: Option<String>,
    #[validate(email)]
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub services: Option<String>,
    /// Minor units (cents).
    #[serde(default)]
    pub deposit_amount: i64,
    #[serde(default)]
    pub total_balance: i64,
}

fn normalized_phone(phone: Option<&str>) -> Result<Option<String>, FormError> {
    match phone.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Ok(Some(PhoneNumber::new(raw)?.into_inner())),
        None => Ok(None),
    }
}

impl TryFrom<&AddClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: &AddClientForm) -> Result<Self, Self::Error> {
        Ok(NewClient::new(
            form.event_type.clone(),
            form.event_name.clone(),
            form.client_name.clone(),
            form.fiance_name.clone(),
            form.client_email.clone(),
            normalized_phone(form.client_phone.as_deref())?,
            form.client_address.clone(),
            form.event_date,
            form.venue_name.clone(),
            form.venue_address.clone(),
            form.services.clone(),
            Money::new(form.deposit_amount)?,
            Money::new(form.total_balance)?,
        )?)
    }
}

/// Full-record client update.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveClientForm {
    #[validate(length(min = 1))]
    pub event_type: String,
    pub event_name: Option<String>,
    #[validate(length(min = 1))]
    pub client_name: String,
    pub fiance_name: Option<String>,
    #[validate(email)]
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub services: Option<String>,
    #[serde(default)]
    pub deposit_amount: i64,
    #[serde(default)]
    pub total_balance: i64,
    #[serde(default)]
    pub onboarding_completed: bool,
}

impl TryFrom<&SaveClientForm> for UpdateClient {
    type Error = FormError;

    fn try_from(form: &SaveClientForm) -> Result<Self, Self::Error> {
        Ok(UpdateClient::new(
            form.event_type.clone(),
            form.event_name.clone(),
            form.client_name.clone(),
            form.fiance_name.clone(),
            form.client_email.clone(),
            normalized_phone(form.client_phone.as_deref())?,
            form.client_address.clone(),
            form.event_date,
            form.venue_name.clone(),
            form.venue_address.clone(),
            form.services.clone(),
            Money::new(form.deposit_amount)?,
            Money::new(form.total_balance)?,
            form.onboarding_completed,
        )?)
    }
}

/// Body for the archive toggle.
#[derive(Deserialize)]
pub struct ArchiveForm {
    #[serde(default = "default_archived")]
    pub archived: bool,
}

fn default_archived() -> bool {
    true
}

/// Body for recording the service agreement signature.
#[derive(Deserialize, Validate)]
pub struct SignForm {
    #[validate(length(min = 1))]
    pub signature: String,
}
