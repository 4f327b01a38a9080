use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use log::error;

use crate::domain::types::EventId;
use crate::dto::timeline::TimelinePage;
use crate::forms::event::{AddEventForm, DetailPatchForm, RenameEventForm};
use crate::forms::timeline::ReorderForm;
use crate::repository::{DieselRepository, GeneralInfoReader};
use crate::routes::{client_row_id, error_json, error_response, lookup_client};
use crate::services::timeline as timeline_service;

#[get("/clients/{public_id}/timeline")]
pub async fn show_timeline(
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

    let events = match timeline_service::list_timeline(repo.get_ref(), id) {
        Ok(events) => events,
        Err(e) => {
            error!("Failed to list timeline: {e}");
            return error_response(e);
        }
    };
    let general_info = match repo.get_general_info(id) {
        Ok(info) => info,
        Err(e) => {
            error!("Failed to load general info: {e}");
            return error_response(e.into());
        }
    };

    HttpResponse::Ok().json(TimelinePage::build(&events, general_info))
}

#[post("/clients/{public_id}/timeline/events")]
pub async fn add_event(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddEventForm>,
) -> impl Responder {
    let client = match lookup_client(repo.get_ref(), &path) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let id = match client_row_id(&client) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match timeline_service::add_event(repo.get_ref(), id, form.into_new_event()) {
        Ok(created) => HttpResponse::Created().json(crate::dto::timeline::EventView::from(&created)),
        Err(e) => {
            error!("Failed to add event: {e}");
            error_response(e)
        }
    }
}

#[post("/clients/{public_id}/timeline/reorder")]
pub async fn reorder_timeline(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ReorderForm>,
) -> impl Responder {
    let client = match lookup_client(repo.get_ref(), &path) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let id = match client_row_id(&client) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let ids = match form.event_ids() {
        Ok(ids) => ids,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e.to_string())),
    };

    match timeline_service::reorder(repo.get_ref(), id, &ids) {
        Ok(_) => match timeline_service::list_timeline(repo.get_ref(), id) {
            Ok(events) => HttpResponse::Ok().json(
                events
                    .iter()
                    .map(crate::dto::timeline::EventView::from)
                    .collect::<Vec<_>>(),
            ),
            Err(e) => error_response(e),
        },
        Err(e) => {
            error!("Failed to reorder timeline: {e}");
            error_response(e)
        }
    }
}

fn parse_event_id(raw: i32) -> Result<EventId, HttpResponse> {
    EventId::new(raw).map_err(|_| HttpResponse::NotFound().json(error_json("not found")))
}

#[put("/clients/{public_id}/timeline/events/{event_id}")]
pub async fn rename_event(
    path: web::Path<(String, i32)>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RenameEventForm>,
) -> impl Responder {
    let (public_id, raw_event_id) = path.into_inner();
    if let Err(response) = lookup_client(repo.get_ref(), &public_id) {
        return response;
    }
    let event_id = match parse_event_id(raw_event_id) {
        Ok(event_id) => event_id,
        Err(response) => return response,
    };

    match timeline_service::rename_event(repo.get_ref(), event_id, &form.sanitized_name()) {
        Ok(updated) => HttpResponse::Ok().json(crate::dto::timeline::EventView::from(&updated)),
        Err(e) => {
            error!("Failed to rename event: {e}");
            error_response(e)
        }
    }
}

#[delete("/clients/{public_id}/timeline/events/{event_id}")]
pub async fn delete_event(
    path: web::Path<(String, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (public_id, raw_event_id) = path.into_inner();
    if let Err(response) = lookup_client(repo.get_ref(), &public_id) {
        return response;
    }
    let event_id = match parse_event_id(raw_event_id) {
        Ok(event_id) => event_id,
        Err(response) => return response,
    };

    match timeline_service::delete_event(repo.get_ref(), event_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => {
            error!("Failed to delete event: {e}");
            error_response(e)
        }
    }
}

#[put("/clients/{public_id}/timeline/events/{event_id}/details")]
pub async fn save_event_details(
    path: web::Path<(String, i32)>,
    repo: web::Data<DieselRepository>,
    web::Json(body): web::Json<serde_json::Value>,
) -> impl Responder {
    let (public_id, raw_event_id) = path.into_inner();
    if let Err(response) = lookup_client(repo.get_ref(), &public_id) {
        return response;
    }
    let event_id = match parse_event_id(raw_event_id) {
        Ok(event_id) => event_id,
        Err(response) => return response,
    };
    let patch = match DetailPatchForm::try_from(body) {
        Ok(form) => form.0,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e.to_string())),
    };

    match timeline_service::set_event_details(repo.get_ref(), event_id, patch) {
        Ok(updated) => HttpResponse::Ok().json(crate::dto::timeline::EventView::from(&updated)),
        Err(e) => {
            error!("Failed to save event details: {e}");
            error_response(e)
        }
    }
}
