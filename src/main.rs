use std::env;
use std::sync::Arc;

use config::Config;
use dotenvy::dotenv;

use encore_crm::export::canvas::UnconfiguredCanvasFactory;
use encore_crm::gateways::{GatewaySet, NoLogo, NoSongs, UnconfiguredGateway};
use encore_crm::models::config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    // Stand-in integrations; deployments wire real payment/song/PDF adapters
    // here.
    let gateways = GatewaySet {
        payment: Arc::new(UnconfiguredGateway),
        songs: Arc::new(NoSongs),
        logo: Arc::new(NoLogo),
    };

    encore_crm::run(server_config, gateways, Arc::new(UnconfiguredCanvasFactory)).await
}
