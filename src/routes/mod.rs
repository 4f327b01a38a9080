//! JSON route handlers under `/api/v1`.
//!
//! Handlers parse and validate input, call the matching service and map
//! `ServiceError` onto HTTP statuses. Unknown or malformed public ids are
//! plain 404s.

use actix_web::HttpResponse;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::{ClientId, PublicId};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::client as client_service;

pub mod clients;
pub mod export;
pub mod general_info;
pub mod payments;
pub mod schema;
pub mod songs;
pub mod timeline;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub(crate) fn error_json(message: impl Into<String>) -> ErrorBody {
    ErrorBody {
        error: message.into(),
    }
}

/// Maps a service failure onto the HTTP response the UI expects.
pub(crate) fn error_response(err: ServiceError) -> HttpResponse {
    match &err {
        ServiceError::NotFound => HttpResponse::NotFound().json(error_json("not found")),
        ServiceError::ValidationError(msg) => {
            HttpResponse::BadRequest().json(error_json(msg.clone()))
        }
        ServiceError::PaymentFailed(msg) => {
            HttpResponse::PaymentRequired().json(error_json(msg.clone()))
        }
        ServiceError::PaymentNotRecorded(msg) => {
            log::error!("Payment recorded at the gateway only: {msg}");
            HttpResponse::InternalServerError().json(error_json(msg.clone()))
        }
        ServiceError::Internal(msg) => {
            log::error!("Request failed: {msg}");
            HttpResponse::InternalServerError().json(error_json("internal error"))
        }
    }
}

pub(crate) fn client_row_id(client: &Client) -> Result<ClientId, HttpResponse> {
    ClientId::new(client.id)
        .map_err(|_| HttpResponse::InternalServerError().json(error_json("internal error")))
}

/// Resolves the public id path segment to a client. Malformed and unknown
/// ids both yield 404 so the identifier space stays opaque.
pub(crate) fn lookup_client(repo: &DieselRepository, raw: &str) -> Result<Client, HttpResponse> {
    let public_id: PublicId = raw
        .parse()
        .map_err(|_| HttpResponse::NotFound().json(error_json("not found")))?;
    client_service::get_client_by_public_id(repo, public_id).map_err(error_response)
}
