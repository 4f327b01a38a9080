//! Venue and planner details, upserted as one row per client.

use crate::domain::general_info::{GeneralInfo, UpsertGeneralInfo};
use crate::domain::types::ClientId;
use crate::repository::{GeneralInfoReader, GeneralInfoWriter};
use crate::services::ServiceResult;

pub fn get_general_info<R: GeneralInfoReader>(
    repo: &R,
    client_id: ClientId,
) -> ServiceResult<Option<GeneralInfo>> {
    Ok(repo.get_general_info(client_id)?)
}

pub fn save_general_info<R: GeneralInfoWriter>(
    repo: &R,
    client_id: ClientId,
    info: &UpsertGeneralInfo,
) -> ServiceResult<GeneralInfo> {
    Ok(repo.upsert_general_info(client_id, info)?)
}
