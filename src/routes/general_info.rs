use actix_web::{HttpResponse, Responder, get, put, web};
use log::error;
use validator::Validate;

use crate::domain::general_info::UpsertGeneralInfo;
use crate::forms::general_info::GeneralInfoForm;
use crate::repository::DieselRepository;
use crate::routes::{client_row_id, error_json, error_response, lookup_client};
use crate::services::general_info as general_info_service;

#[get("/clients/{public_id}/general-info")]
pub async fn show_general_info(
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

    match general_info_service::get_general_info(repo.get_ref(), id) {
        Ok(info) => HttpResponse::Ok().json(info),
        Err(e) => {
            error!("Failed to load general info: {e}");
            error_response(e)
        }
    }
}

#[put("/clients/{public_id}/general-info")]
pub async fn save_general_info(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<GeneralInfoForm>,
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

    let info: UpsertGeneralInfo = form.into();
    match general_info_service::save_general_info(repo.get_ref(), id, &info) {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => {
            error!("Failed to save general info: {e}");
            error_response(e)
        }
    }
}
