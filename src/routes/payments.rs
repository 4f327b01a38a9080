use actix_web::{HttpResponse, Responder, post, web};
use log::error;
use validator::Validate;

use crate::forms::payment::PaymentForm;
use crate::gateways::{GatewaySet, PaymentMethod};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{client_row_id, error_json, error_response, lookup_client};
use crate::services::payment::{PaymentPurpose, pay};

async fn handle_payment(
    public_id: &str,
    purpose: PaymentPurpose,
    form: PaymentForm,
    repo: &DieselRepository,
    gateways: &GatewaySet,
    config: &ServerConfig,
) -> HttpResponse {
    if let Err(e) = form.validate() {
        return HttpResponse::BadRequest().json(error_json(e.to_string()));
    }
    let client = match lookup_client(repo, public_id) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let id = match client_row_id(&client) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let method = PaymentMethod::from(&form);

    match pay(
        repo,
        gateways.payment.as_ref(),
        id,
        purpose,
        &method,
        &config.currency,
    ) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            error!("Payment failed: {e}");
            error_response(e)
        }
    }
}

#[post("/clients/{public_id}/pay/deposit")]
pub async fn pay_deposit(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    gateways: web::Data<GatewaySet>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<PaymentForm>,
) -> impl Responder {
    handle_payment(
        &path,
        PaymentPurpose::Deposit,
        form,
        repo.get_ref(),
        gateways.get_ref(),
        config.get_ref(),
    )
    .await
}

#[post("/clients/{public_id}/pay/balance")]
pub async fn pay_balance(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    gateways: web::Data<GatewaySet>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<PaymentForm>,
) -> impl Responder {
    handle_payment(
        &path,
        PaymentPurpose::Balance,
        form,
        repo.get_ref(),
        gateways.get_ref(),
        config.get_ref(),
    )
    .await
}
