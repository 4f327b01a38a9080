use serde::Deserialize;
use validator::Validate;

use crate::domain::general_info::UpsertGeneralInfo;

/// Body for saving the client's general information page.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneralInfoForm {
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    #[serde(default)]
    pub different_ceremony_venue: bool,
    pub ceremony_venue_name: Option<String>,
    pub ceremony_venue_address: Option<String>,
    pub planner_name: Option<String>,
    #[validate(email)]
    pub planner_email: Option<String>,
}

impl From<GeneralInfoForm> for UpsertGeneralInfo {
    fn from(form: GeneralInfoForm) -> Self {
        UpsertGeneralInfo::new(
            form.venue_name,
            form.venue_address,
            form.different_ceremony_venue,
            form.ceremony_venue_name,
            form.ceremony_venue_address,
            form.planner_name,
            form.planner_email,
        )
    }
}
