use actix_web::{HttpResponse, Responder, get, web};

use crate::domain::event::{EventKind, catalog};
use crate::forms::event::schema_for;

/// The template catalog, in default seed order.
#[get("/timeline/catalog")]
pub async fn timeline_catalog() -> impl Responder {
    HttpResponse::Ok().json(catalog())
}

/// Field descriptor table for one event kind's detail form.
#[get("/timeline/schema/{kind}")]
pub async fn timeline_schema(path: web::Path<String>) -> impl Responder {
    let kind = EventKind::from(path.as_str());
    HttpResponse::Ok().json(schema_for(&kind))
}
