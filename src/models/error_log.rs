use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::error_log)]
/// One entry in the rolling store-failure log.
pub struct ErrorLogEntry {
    pub id: i32,
    pub context: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::error_log)]
pub struct NewErrorLogEntry<'a> {
    pub context: &'a str,
    pub message: &'a str,
}

impl From<ErrorLogEntry> for crate::domain::error_log::ErrorLogRecord {
    fn from(entry: ErrorLogEntry) -> Self {
        Self {
            id: entry.id,
            context: entry.context,
            message: entry.message,
            created_at: entry.created_at,
        }
    }
}
