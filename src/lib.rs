#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod export;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod gateways;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_web::{App, HttpServer, middleware, web};

    use crate::db::establish_connection_pool;
    use crate::export::canvas::CanvasFactory;
    use crate::gateways::GatewaySet;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::clients::{
        add_client, archive_client, complete_onboarding, list_clients, save_client, show_client,
        sign_client,
    };
    use crate::routes::export::export_timeline;
    use crate::routes::general_info::{save_general_info, show_general_info};
    use crate::routes::payments::{pay_balance, pay_deposit};
    use crate::routes::schema::{timeline_catalog, timeline_schema};
    use crate::routes::songs::song_search;
    use crate::routes::timeline::{
        add_event, delete_event, rename_event, reorder_timeline, save_event_details,
        show_timeline,
    };
    use std::sync::Arc;

    /// Builds and runs the HTTP server. The gateway set and canvas factory
    /// are injected so deployments choose their own payment/song/PDF
    /// integrations.
    pub async fn run(
        server_config: ServerConfig,
        gateways: GatewaySet,
        canvas_factory: Arc<dyn CanvasFactory>,
    ) -> std::io::Result<()> {
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = DieselRepository::new(pool);
        let gateways = web::Data::new(gateways);
        let canvas_factory: web::Data<dyn CanvasFactory> = web::Data::from(canvas_factory);
        let assets_dir = server_config.assets_dir.clone();
        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", assets_dir.as_str()))
                .service(
                    web::scope("/api/v1")
                        .service(list_clients)
                        .service(add_client)
                        .service(show_client)
                        .service(save_client)
                        .service(archive_client)
                        .service(sign_client)
                        .service(complete_onboarding)
                        .service(show_timeline)
                        .service(add_event)
                        .service(reorder_timeline)
                        .service(rename_event)
                        .service(delete_event)
                        .service(save_event_details)
                        .service(show_general_info)
                        .service(save_general_info)
                        .service(pay_deposit)
                        .service(pay_balance)
                        .service(export_timeline)
                        .service(song_search)
                        .service(timeline_catalog)
                        .service(timeline_schema),
                )
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
                .app_data(gateways.clone())
                .app_data(canvas_factory.clone())
        })
        .bind(bind_address)?
        .run()
        .await
    }
}

#[cfg(feature = "server")]
pub use server::run;
