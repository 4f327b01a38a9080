//! The pipeline board: every client grouped under its classified stage.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::stage::PipelineStage;
use crate::services::pipeline::classify;

#[derive(Debug, Serialize)]
pub struct PipelineColumn {
    pub stage: PipelineStage,
    pub clients: Vec<Client>,
}

#[derive(Debug, Serialize)]
pub struct PipelineBoard {
    pub columns: Vec<PipelineColumn>,
}

impl PipelineBoard {
    /// Groups clients into dashboard columns, preserving list order within
    /// each column.
    pub fn build(clients: Vec<Client>, today: NaiveDate) -> Self {
        let mut by_stage: HashMap<PipelineStage, Vec<Client>> = HashMap::new();
        for client in clients {
            by_stage
                .entry(classify(&client, today))
                .or_default()
                .push(client);
        }
        let columns = PipelineStage::ALL
            .iter()
            .map(|stage| PipelineColumn {
                stage: *stage,
                clients: by_stage.remove(stage).unwrap_or_default(),
            })
            .collect();
        Self { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Money, PublicId};
    use chrono::Utc;

    fn client(name: &str) -> Client {
        let now = Utc::now().naive_utc();
        Client {
            id: 1,
            public_id: PublicId::new(),
            event_type: "Wedding".into(),
            event_name: None,
            client_name: name.into(),
            fiance_name: None,
            client_email: None,
            client_phone: None,
            client_address: None,
            event_date: None,
            venue_name: None,
            venue_address: None,
            services: None,
            deposit_amount: Money::zero(),
            total_balance: Money::zero(),
            signature: None,
            signature_date: None,
            deposit_paid: false,
            balance_paid: false,
            payment_intent_id: None,
            onboarding_completed: false,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn every_stage_gets_a_column_even_when_empty() {
        let mut signed = client("Signed");
        signed.signature = Some("Signed".into());
        let board = PipelineBoard::build(
            vec![client("Fresh"), signed],
            NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        );
        assert_eq!(board.columns.len(), PipelineStage::ALL.len());
        let signatures = &board.columns[0];
        assert_eq!(signatures.stage, PipelineStage::AwaitingSignature);
        assert_eq!(signatures.clients.len(), 1);
        let deposits = &board.columns[1];
        assert_eq!(deposits.stage, PipelineStage::AwaitingDeposit);
        assert_eq!(deposits.clients[0].client_name, "Signed");
    }
}
