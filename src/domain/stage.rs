use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Sales pipeline stage derived from stored client flags.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStage {
    Archive,
    Completed,
    Booked,
    AwaitingDeposit,
    AwaitingSignature,
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PipelineStage::Archive => "archive",
            PipelineStage::Completed => "completed",
            PipelineStage::Booked => "booked",
            PipelineStage::AwaitingDeposit => "awaiting-deposit",
            PipelineStage::AwaitingSignature => "awaiting-signature",
        };
        write!(f, "{s}")
    }
}

impl PipelineStage {
    /// All stages in dashboard column order.
    pub const ALL: [PipelineStage; 5] = [
        PipelineStage::AwaitingSignature,
        PipelineStage::AwaitingDeposit,
        PipelineStage::Booked,
        PipelineStage::Completed,
        PipelineStage::Archive,
    ];
}
