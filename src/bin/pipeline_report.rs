//! Maintenance binary printing a pipeline summary: client counts per stage
//! and upcoming events within the report window.

use std::collections::HashMap;
use std::env;

use chrono::{Duration, Utc};
use config::Config;
use dotenvy::dotenv;

use encore_crm::db::establish_connection_pool;
use encore_crm::domain::stage::PipelineStage;
use encore_crm::models::config::ServerConfig;
use encore_crm::repository::{ClientListQuery, ClientReader, DieselRepository};
use encore_crm::services::pipeline::classify;

const UPCOMING_WINDOW_DAYS: i64 = 14;

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let server_config = match settings.and_then(|s| s.try_deserialize::<ServerConfig>()) {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let (total, clients) = match repo.list_clients(ClientListQuery::new().include_archived()) {
        Ok(result) => result,
        Err(err) => {
            log::error!("Failed to list clients: {err}");
            std::process::exit(1);
        }
    };

    let today = Utc::now().date_naive();
    let horizon = today + Duration::days(UPCOMING_WINDOW_DAYS);

    let mut counts: HashMap<PipelineStage, usize> = HashMap::new();
    let mut upcoming = Vec::new();
    for client in &clients {
        *counts.entry(classify(client, today)).or_default() += 1;
        if let Some(date) = client.event_date {
            if date >= today && date <= horizon {
                upcoming.push((date, client.client_name.clone()));
            }
        }
    }
    upcoming.sort();

    println!("Pipeline report ({today}, {total} clients)");
    for stage in PipelineStage::ALL {
        println!("  {stage}: {}", counts.get(&stage).copied().unwrap_or(0));
    }
    println!("Events in the next {UPCOMING_WINDOW_DAYS} days:");
    if upcoming.is_empty() {
        println!("  none");
    }
    for (date, name) in upcoming {
        println!("  {date}  {name}");
    }
}
