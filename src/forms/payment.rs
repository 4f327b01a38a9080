use serde::Deserialize;
use validator::Validate;

use crate::gateways::PaymentMethod;

/// Body for the deposit and balance payment endpoints. The card token comes
/// from the gateway's client-side tokenizer; raw card data never arrives.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    #[validate(length(min = 1))]
    pub card_token: String,
}

impl From<&PaymentForm> for PaymentMethod {
    fn from(form: &PaymentForm) -> Self {
        PaymentMethod {
            card_token: form.card_token.clone(),
        }
    }
}
