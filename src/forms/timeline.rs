use serde::Deserialize;

use crate::domain::types::EventId;
use crate::forms::FormError;

/// Body for the reorder intent: every event id in on-screen sequence.
#[derive(Deserialize)]
pub struct ReorderForm {
    pub ids: Vec<i32>,
}

impl ReorderForm {
    /// Converts the raw ids, rejecting non-positive values outright.
    pub fn event_ids(&self) -> Result<Vec<EventId>, FormError> {
        self.ids
            .iter()
            .map(|id| EventId::new(*id).map_err(FormError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_ids_are_rejected() {
        let form = ReorderForm { ids: vec![3, 0, 1] };
        assert!(form.event_ids().is_err());
        let form = ReorderForm { ids: vec![3, 2, 1] };
        assert_eq!(form.event_ids().unwrap().len(), 3);
    }
}
