use actix_web::{HttpResponse, Responder, get, web};
use log::error;
use serde::Deserialize;

use crate::gateways::GatewaySet;
use crate::routes::error_response;
use crate::services::songs::search_songs;

#[derive(Deserialize)]
struct SongSearchParams {
    q: String,
}

#[get("/songs/search")]
pub async fn song_search(
    params: web::Query<SongSearchParams>,
    gateways: web::Data<GatewaySet>,
) -> impl Responder {
    match search_songs(gateways.songs.as_ref(), &params.q) {
        Ok(hits) => HttpResponse::Ok().json(hits),
        Err(e) => {
            error!("Song search failed: {e}");
            error_response(e)
        }
    }
}
