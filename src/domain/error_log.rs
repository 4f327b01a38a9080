use chrono::NaiveDateTime;
use serde::Serialize;

/// Only the five most recent store failures are retained.
pub const ERROR_LOG_CAPACITY: usize = 5;

/// A recorded store failure, kept for post-refresh diagnosis.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ErrorLogRecord {
    pub id: i32,
    /// Which flow failed, e.g. "create_client".
    pub context: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}
