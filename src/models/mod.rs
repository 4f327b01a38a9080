//! Database models shared across the repository layer.

pub mod client;
pub mod error_log;
pub mod event;
pub mod config;
pub mod general_info;
