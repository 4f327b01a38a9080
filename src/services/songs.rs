//! Song search proxy with a bounded result count.

use crate::gateways::{SongLookup, TrackHit};
use crate::services::{ServiceError, ServiceResult};

/// Hard cap on search hits returned to the form.
pub const MAX_SEARCH_RESULTS: usize = 10;

pub fn search_songs<L>(lookup: &L, query: &str) -> ServiceResult<Vec<TrackHit>>
where
    L: SongLookup + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Err(ServiceError::ValidationError(
            "search query cannot be empty".to_string(),
        ));
    }
    lookup
        .search(query, MAX_SEARCH_RESULTS)
        .map_err(|err| ServiceError::Internal(format!("song lookup failed: {err}")))
}
