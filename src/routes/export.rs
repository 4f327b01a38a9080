use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, web};
use log::error;
use serde::Serialize;

use crate::export::canvas::CanvasFactory;
use crate::gateways::GatewaySet;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{client_row_id, error_response, lookup_client};
use crate::services::export as export_service;

#[derive(Serialize)]
struct ExportResponse {
    filename: String,
}

#[get("/clients/{public_id}/export")]
pub async fn export_timeline(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    gateways: web::Data<GatewaySet>,
    canvas_factory: web::Data<dyn CanvasFactory>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let client = match lookup_client(repo.get_ref(), &path) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let id = match client_row_id(&client) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let mut canvas = canvas_factory.open();
    match export_service::export_timeline(
        repo.get_ref(),
        gateways.logo.as_ref(),
        canvas.as_mut(),
        id,
        config.logo_url.as_deref(),
        Duration::from_millis(config.logo_fetch_timeout_ms),
    ) {
        Ok(filename) => HttpResponse::Ok().json(ExportResponse { filename }),
        Err(e) => {
            error!("Failed to export timeline: {e}");
            error_response(e)
        }
    }
}
