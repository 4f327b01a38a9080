use diesel::prelude::*;

use crate::{
    domain::error_log::{ERROR_LOG_CAPACITY, ErrorLogRecord},
    repository::{DieselRepository, ErrorLogReader, ErrorLogWriter},
    repository::errors::RepositoryResult,
};

impl ErrorLogReader for DieselRepository {
    fn list_error_log(&self) -> RepositoryResult<Vec<ErrorLogRecord>> {
        use crate::models::error_log::ErrorLogEntry;
        use crate::schema::error_log;

        let mut conn = self.conn()?;
        let entries = error_log::table
            .order(error_log::id.desc())
            .limit(ERROR_LOG_CAPACITY as i64)
            .load::<ErrorLogEntry>(&mut conn)?;

        Ok(entries.into_iter().map(Into::into).collect())
    }
}

impl ErrorLogWriter for DieselRepository {
    fn record_error(&self, context: &str, message: &str) -> RepositoryResult<()> {
        use crate::models::error_log::NewErrorLogEntry;
        use crate::schema::error_log;

        let mut conn = self.conn()?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(error_log::table)
                .values(&NewErrorLogEntry { context, message })
                .execute(conn)?;

            // Keep only the most recent entries.
            let keep: Vec<i32> = error_log::table
                .select(error_log::id)
                .order(error_log::id.desc())
                .limit(ERROR_LOG_CAPACITY as i64)
                .load(conn)?;
            diesel::delete(error_log::table.filter(error_log::id.ne_all(keep))).execute(conn)?;

            Ok(())
        })
        .map_err(Into::into)
    }
}
