//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Directory holding the static front end bundle.
    pub assets_dir: String,
    /// ISO 4217 currency used for gateway charges.
    pub currency: String,
    /// URL of the logo placed on exported timelines, if any.
    pub logo_url: Option<String>,
    /// Bound on the logo fetch during export, in milliseconds.
    pub logo_fetch_timeout_ms: u64,
}
