use actix_web::{HttpResponse, Responder, get, post, put, web};
use chrono::Utc;
use log::error;
use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::dto::pipeline::PipelineBoard;
use crate::forms::client::{AddClientForm, ArchiveForm, SaveClientForm, SignForm};
use crate::pagination::Paginated;
use crate::repository::{ClientListQuery, DieselRepository};
use crate::routes::{
    DEFAULT_ITEMS_PER_PAGE, client_row_id, error_json, error_response, lookup_client,
};
use crate::services::client as client_service;

#[derive(Deserialize)]
struct ListQueryParams {
    q: Option<String>,
    page: Option<usize>,
    #[serde(default)]
    include_archived: bool,
    /// "board" switches the response to the stage-grouped pipeline view.
    view: Option<String>,
}

#[get("/clients")]
pub async fn list_clients(
    params: web::Query<ListQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let q = params.q.as_deref().unwrap_or("").trim();

    if params.view.as_deref() == Some("board") {
        let mut query = ClientListQuery::new();
        if !q.is_empty() {
            query = query.search(q);
        }
        if params.include_archived {
            query = query.include_archived();
        }
        return match client_service::list_clients(repo.get_ref(), query) {
            Ok((_, clients)) => HttpResponse::Ok()
                .json(PipelineBoard::build(clients, Utc::now().date_naive())),
            Err(e) => error_response(e),
        };
    }

    let page = params.page.unwrap_or(1);
    let mut query = ClientListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if !q.is_empty() {
        query = query.search(q);
    }
    if params.include_archived {
        query = query.include_archived();
    }

    match client_service::list_clients(repo.get_ref(), query) {
        Ok((total, clients)) => {
            HttpResponse::Ok().json(Paginated::new(clients, page, total, DEFAULT_ITEMS_PER_PAGE))
        }
        Err(e) => error_response(e),
    }
}

#[post("/clients")]
pub async fn add_client(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddClientForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return HttpResponse::BadRequest().json(error_json(e.to_string()));
    }
    let new_client = match NewClient::try_from(&form) {
        Ok(new_client) => new_client,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e.to_string())),
    };

    match client_service::create_client(repo.get_ref(), &new_client) {
        Ok(client) => HttpResponse::Created().json(client),
        Err(e) => {
            error!("Failed to add a client: {e}");
            error_response(e)
        }
    }
}

#[get("/clients/{public_id}")]
pub async fn show_client(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match lookup_client(repo.get_ref(), &path) {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(response) => response,
    }
}

#[put("/clients/{public_id}")]
pub async fn save_client(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveClientForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return HttpResponse::BadRequest().json(error_json(e.to_string()));
    }
    let client = match lookup_client(repo.get_ref(), &path) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let id = match client_row_id(&client) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let updates = match UpdateClient::try_from(&form) {
        Ok(updates) => updates,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e.to_string())),
    };

    match client_service::update_client(repo.get_ref(), id, &updates) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            error!("Failed to update client: {e}");
            error_response(e)
        }
    }
}

#[post("/clients/{public_id}/archive")]
pub async fn archive_client(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ArchiveForm>,
) -> impl Responder {
    let client = match lookup_client(repo.get_ref(), &path) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let id = match client_row_id(&client) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match client_service::set_archived(repo.get_ref(), id, form.archived) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            error!("Failed to archive client: {e}");
            error_response(e)
        }
    }
}

#[post("/clients/{public_id}/sign")]
pub async fn sign_client(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SignForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return HttpResponse::BadRequest().json(error_json(e.to_string()));
    }
    let client = match lookup_client(repo.get_ref(), &path) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let id = match client_row_id(&client) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match client_service::sign_agreement(
        repo.get_ref(),
        id,
        &form.signature,
        Utc::now().naive_utc(),
    ) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            error!("Failed to record signature: {e}");
            error_response(e)
        }
    }
}

#[post("/clients/{public_id}/onboarding")]
pub async fn complete_onboarding(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let client = match lookup_client(repo.get_ref(), &path) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let id = match client_row_id(&client) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match client_service::complete_onboarding(repo.get_ref(), id) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            error!("Failed to complete onboarding: {e}");
            error_response(e)
        }
    }
}
