//! Two-phase payment orchestration.
//!
//! Phase one asks the gateway for an authorization token, phase two confirms
//! the charge. Any failure before confirmation leaves the client record
//! untouched. After a confirmed charge exactly one flag update is attempted;
//! if that write fails the money has already moved, so the failure is logged
//! and surfaced as a distinct error.

use crate::domain::client::{Client, ClientFlagUpdate};
use crate::domain::types::{ClientId, Money};
use crate::gateways::{ChargeMetadata, ChargeStatus, PaymentGateway, PaymentMethod};
use crate::repository::{ClientReader, ClientWriter, ErrorLogWriter};
use crate::services::{ServiceError, ServiceResult};

/// Which half of the engagement balance is being charged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentPurpose {
    Deposit,
    Balance,
}

impl PaymentPurpose {
    fn as_str(self) -> &'static str {
        match self {
            PaymentPurpose::Deposit => "deposit",
            PaymentPurpose::Balance => "balance",
        }
    }
}

fn amount_for(client: &Client, purpose: PaymentPurpose) -> ServiceResult<Money> {
    let amount = match purpose {
        PaymentPurpose::Deposit => client.deposit_amount,
        PaymentPurpose::Balance => client.remaining_balance(),
    };
    if amount.is_zero() {
        return Err(ServiceError::ValidationError(format!(
            "no {} amount is due",
            purpose.as_str()
        )));
    }
    Ok(amount)
}

fn already_paid(client: &Client, purpose: PaymentPurpose) -> bool {
    match purpose {
        PaymentPurpose::Deposit => client.deposit_paid,
        PaymentPurpose::Balance => client.balance_paid,
    }
}

/// Runs the full two-phase charge for the given purpose and records the
/// outcome on the client.
pub fn pay<R, G>(
    repo: &R,
    gateway: &G,
    client_id: ClientId,
    purpose: PaymentPurpose,
    method: &PaymentMethod,
    currency: &str,
) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ErrorLogWriter,
    G: PaymentGateway + ?Sized,
{
    let client = repo
        .get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;
    if already_paid(&client, purpose) {
        return Err(ServiceError::ValidationError(format!(
            "the {} has already been paid",
            purpose.as_str()
        )));
    }
    let amount = amount_for(&client, purpose)?;

    let metadata = ChargeMetadata {
        client_public_id: client.public_id.to_string(),
        purpose: purpose.as_str().to_string(),
    };
    let token = gateway.create_intent(amount, currency, &metadata)?;
    let outcome = gateway.confirm(&token, method)?;
    if outcome.status != ChargeStatus::Succeeded {
        return Err(ServiceError::PaymentFailed(
            "the charge was not completed".to_string(),
        ));
    }

    let flags = match purpose {
        PaymentPurpose::Deposit => ClientFlagUpdate {
            deposit_paid: Some(true),
            payment_intent_id: Some(outcome.intent_id.clone()),
            ..Default::default()
        },
        PaymentPurpose::Balance => ClientFlagUpdate {
            balance_paid: Some(true),
            payment_intent_id: Some(outcome.intent_id.clone()),
            ..Default::default()
        },
    };

    match repo.set_client_flags(client_id, &flags) {
        Ok(updated) => Ok(updated),
        Err(err) => {
            let message = format!(
                "charge {} succeeded for client {} but the record update failed: {err}",
                outcome.intent_id, client.public_id
            );
            log::error!("{message}");
            if let Err(log_err) = repo.record_error("payment_record", &message) {
                log::warn!("Failed to record payment bookkeeping error: {log_err}");
            }
            Err(ServiceError::PaymentNotRecorded(message))
        }
    }
}

pub fn pay_deposit<R, G>(
    repo: &R,
    gateway: &G,
    client_id: ClientId,
    method: &PaymentMethod,
    currency: &str,
) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ErrorLogWriter,
    G: PaymentGateway + ?Sized,
{
    pay(repo, gateway, client_id, PaymentPurpose::Deposit, method, currency)
}

pub fn pay_balance<R, G>(
    repo: &R,
    gateway: &G,
    client_id: ClientId,
    method: &PaymentMethod,
    currency: &str,
) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ErrorLogWriter,
    G: PaymentGateway + ?Sized,
{
    pay(repo, gateway, client_id, PaymentPurpose::Balance, method, currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PublicId;
    use crate::gateways::fakes::FakeGateway;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use chrono::Utc;

    fn client(deposit: i64, total: i64) -> Client {
        let now = Utc::now().naive_utc();
        Client {
            id: 1,
            public_id: PublicId::new(),
            event_type: "Wedding".into(),
            event_name: None,
            client_name: "Jamie".into(),
            fiance_name: None,
            client_email: None,
            client_phone: None,
            client_address: None,
            event_date: None,
            venue_name: None,
            venue_address: None,
            services: None,
            deposit_amount: Money::new(deposit).unwrap(),
            total_balance: Money::new(total).unwrap(),
            signature: None,
            signature_date: None,
            deposit_paid: false,
            balance_paid: false,
            payment_intent_id: None,
            onboarding_completed: false,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn method() -> PaymentMethod {
        PaymentMethod {
            card_token: "card_test".into(),
        }
    }

    #[test]
    fn successful_deposit_sets_flag_and_intent_id() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|_| Ok(Some(client(50_000, 150_000))));
        repo.expect_set_client_flags()
            .withf(|_, flags| {
                flags.deposit_paid == Some(true) && flags.payment_intent_id.is_some()
            })
            .times(1)
            .returning(|_, flags| {
                let mut updated = client(50_000, 150_000);
                updated.deposit_paid = true;
                updated.payment_intent_id = flags.payment_intent_id.clone();
                Ok(updated)
            });

        let gateway = FakeGateway::default();
        let updated = pay_deposit(
            &repo,
            &gateway,
            ClientId::new(1).unwrap(),
            &method(),
            "usd",
        )
        .unwrap();
        assert!(updated.deposit_paid);
        assert!(updated.payment_intent_id.is_some());
    }

    #[test]
    fn declined_confirmation_leaves_the_record_untouched() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|_| Ok(Some(client(50_000, 150_000))));
        repo.expect_set_client_flags().times(0);

        let gateway = FakeGateway {
            fail_confirm: true,
            ..Default::default()
        };
        let result = pay_deposit(
            &repo,
            &gateway,
            ClientId::new(1).unwrap(),
            &method(),
            "usd",
        );
        assert!(matches!(result, Err(ServiceError::PaymentFailed(_))));
    }

    #[test]
    fn unreachable_intent_endpoint_fails_before_confirmation() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|_| Ok(Some(client(50_000, 150_000))));
        repo.expect_set_client_flags().times(0);

        let gateway = FakeGateway {
            fail_intent: true,
            ..Default::default()
        };
        let result = pay_deposit(
            &repo,
            &gateway,
            ClientId::new(1).unwrap(),
            &method(),
            "usd",
        );
        assert!(matches!(result, Err(ServiceError::PaymentFailed(_))));
        assert!(gateway.confirmed.lock().unwrap().is_empty());
    }

    #[test]
    fn balance_charge_uses_the_remaining_amount() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| {
            let mut c = client(50_000, 150_000);
            c.deposit_paid = true;
            Ok(Some(c))
        });
        repo.expect_set_client_flags()
            .withf(|_, flags| flags.balance_paid == Some(true))
            .times(1)
            .returning(|_, _| {
                let mut c = client(50_000, 150_000);
                c.deposit_paid = true;
                c.balance_paid = true;
                Ok(c)
            });

        let gateway = FakeGateway::default();
        let updated = pay_balance(
            &repo,
            &gateway,
            ClientId::new(1).unwrap(),
            &method(),
            "usd",
        )
        .unwrap();
        assert!(updated.balance_paid);
        // remaining balance is 1000.00 in minor units
        let confirmed = gateway.confirmed.lock().unwrap();
        assert_eq!(confirmed[0].0, "tok_balance_100000");
    }

    #[test]
    fn record_failure_after_confirmed_charge_is_a_distinct_error() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|_| Ok(Some(client(50_000, 150_000))));
        repo.expect_set_client_flags()
            .returning(|_, _| Err(RepositoryError::DatabaseError("disk I/O error".into())));
        repo.expect_record_error()
            .withf(|context, _| context == "payment_record")
            .times(1)
            .returning(|_, _| Ok(()));

        let gateway = FakeGateway::default();
        let result = pay_deposit(
            &repo,
            &gateway,
            ClientId::new(1).unwrap(),
            &method(),
            "usd",
        );
        assert!(matches!(result, Err(ServiceError::PaymentNotRecorded(_))));
        // the charge itself went through
        assert_eq!(gateway.confirmed.lock().unwrap().len(), 1);
    }

    #[test]
    fn double_deposit_payment_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| {
            let mut c = client(50_000, 150_000);
            c.deposit_paid = true;
            Ok(Some(c))
        });

        let gateway = FakeGateway::default();
        let result = pay_deposit(
            &repo,
            &gateway,
            ClientId::new(1).unwrap(),
            &method(),
            "usd",
        );
        assert!(matches!(result, Err(ServiceError::ValidationError(_))));
    }
}
