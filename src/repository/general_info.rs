use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::general_info::{GeneralInfo, UpsertGeneralInfo},
    domain::types::ClientId,
    repository::{DieselRepository, GeneralInfoReader, GeneralInfoWriter},
    repository::errors::RepositoryResult,
};

impl GeneralInfoReader for DieselRepository {
    fn get_general_info(&self, client_id: ClientId) -> RepositoryResult<Option<GeneralInfo>> {
        use crate::models::general_info::GeneralInfo as DbGeneralInfo;
        use crate::schema::general_info;

        let mut conn = self.conn()?;
        let info = general_info::table
            .filter(general_info::client_id.eq(client_id.get()))
            .first::<DbGeneralInfo>(&mut conn)
            .optional()?;

        Ok(info.map(Into::into))
    }
}

impl GeneralInfoWriter for DieselRepository {
    fn upsert_general_info(
        &self,
        client_id: ClientId,
        info: &UpsertGeneralInfo,
    ) -> RepositoryResult<GeneralInfo> {
        use crate::models::general_info::{
            GeneralInfo as DbGeneralInfo, NewGeneralInfo, UpdateGeneralInfo,
        };
        use crate::schema::general_info;

        let mut conn = self.conn()?;
        let existing: Option<DbGeneralInfo> = general_info::table
            .filter(general_info::client_id.eq(client_id.get()))
            .first::<DbGeneralInfo>(&mut conn)
            .optional()?;

        let row = match existing {
            Some(row) => {
                let changes = UpdateGeneralInfo::from_domain(info, Utc::now().naive_utc());
                diesel::update(general_info::table.find(row.id))
                    .set(&changes)
                    .get_result::<DbGeneralInfo>(&mut conn)?
            }
            None => {
                let insertable = NewGeneralInfo::from_domain(client_id.get(), info);
                diesel::insert_into(general_info::table)
                    .values(&insertable)
                    .get_result::<DbGeneralInfo>(&mut conn)?
            }
        };

        Ok(row.into())
    }
}
