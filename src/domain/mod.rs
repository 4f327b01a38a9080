//! Domain aggregates exposed by the planning service layer.

pub mod client;
pub mod details;
pub mod error_log;
pub mod event;
pub mod general_info;
pub mod stage;
pub mod types;
