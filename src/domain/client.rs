use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientEmail, Money, NonEmptyString, PublicId, TypeConstraintError};

/// One customer engagement: contact data, venue, money and pipeline flags.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: i32,
    /// Opaque identifier used in planner share links.
    pub public_id: PublicId,
    pub event_type: String,
    pub event_name: Option<String>,
    pub client_name: String,
    pub fiance_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    /// Free-text description of the booked services.
    pub services: Option<String>,
    pub deposit_amount: Money,
    pub total_balance: Money,
    pub signature: Option<String>,
    pub signature_date: Option<NaiveDateTime>,
    pub deposit_paid: bool,
    pub balance_paid: bool,
    pub payment_intent_id: Option<String>,
    pub onboarding_completed: bool,
    pub archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Client {
    /// True once the service agreement carries a signer name.
    pub fn is_signed(&self) -> bool {
        self.signature.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Amount still owed after the deposit.
    pub fn remaining_balance(&self) -> Money {
        self.total_balance.saturating_sub(self.deposit_amount)
    }
}

/// Payload for creating a client. Construct via [`NewClient::new`] so the
/// deposit/balance invariant is checked before anything reaches the store.
#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub event_type: String,
    pub event_name: Option<String>,
    pub client_name: String,
    pub fiance_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub services: Option<String>,
    pub deposit_amount: Money,
    pub total_balance: Money,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn normalized_email(value: Option<String>) -> Result<Option<String>, TypeConstraintError> {
    trimmed(value)
        .map(|s| ClientEmail::new(s).map(ClientEmail::into_inner))
        .transpose()
}

impl NewClient {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        event_type: String,
        event_name: Option<String>,
        client_name: String,
        fiance_name: Option<String>,
        client_email: Option<String>,
        client_phone: Option<String>,
        client_address: Option<String>,
        event_date: Option<NaiveDate>,
        venue_name: Option<String>,
        venue_address: Option<String>,
        services: Option<String>,
        deposit_amount: Money,
        total_balance: Money,
    ) -> Result<Self, TypeConstraintError> {
        if deposit_amount > total_balance {
            return Err(TypeConstraintError::DepositExceedsBalance);
        }
        Ok(Self {
            event_type: event_type.trim().to_string(),
            event_name: trimmed(event_name),
            client_name: NonEmptyString::new(client_name)?.into_inner(),
            fiance_name: trimmed(fiance_name),
            client_email: normalized_email(client_email)?,
            client_phone: trimmed(client_phone),
            client_address: trimmed(client_address),
            event_date,
            venue_name: trimmed(venue_name),
            venue_address: trimmed(venue_address),
            services: trimmed(services),
            deposit_amount,
            total_balance,
        })
    }
}

/// Full-record update applied by staff edits. Same invariant as [`NewClient`].
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateClient {
    pub event_type: String,
    pub event_name: Option<String>,
    pub client_name: String,
    pub fiance_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub services: Option<String>,
    pub deposit_amount: Money,
    pub total_balance: Money,
    pub onboarding_completed: bool,
}

impl UpdateClient {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        event_type: String,
        event_name: Option<String>,
        client_name: String,
        fiance_name: Option<String>,
        client_email: Option<String>,
        client_phone: Option<String>,
        client_address: Option<String>,
        event_date: Option<NaiveDate>,
        venue_name: Option<String>,
        venue_address: Option<String>,
        services: Option<String>,
        deposit_amount: Money,
        total_balance: Money,
        onboarding_completed: bool,
    ) -> Result<Self, TypeConstraintError> {
        if deposit_amount > total_balance {
            return Err(TypeConstraintError::DepositExceedsBalance);
        }
        Ok(Self {
            event_type: event_type.trim().to_string(),
            event_name: trimmed(event_name),
            client_name: NonEmptyString::new(client_name)?.into_inner(),
            fiance_name: trimmed(fiance_name),
            client_email: normalized_email(client_email)?,
            client_phone: trimmed(client_phone),
            client_address: trimmed(client_address),
            event_date,
            venue_name: trimmed(venue_name),
            venue_address: trimmed(venue_address),
            services: trimmed(services),
            deposit_amount,
            total_balance,
            onboarding_completed,
        })
    }
}

/// Targeted flag updates performed by the signing, payment and archive flows.
/// Only the present fields are written.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ClientFlagUpdate {
    pub signature: Option<String>,
    pub signature_date: Option<NaiveDateTime>,
    pub deposit_paid: Option<bool>,
    pub balance_paid: Option<bool>,
    pub payment_intent_id: Option<String>,
    pub onboarding_completed: Option<bool>,
    pub archived: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(deposit: i64, total: i64) -> Result<NewClient, TypeConstraintError> {
        NewClient::new(
            "Wedding".into(),
            None,
            "Jamie Rivera".into(),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            Money::new(deposit).unwrap(),
            Money::new(total).unwrap(),
        )
    }

    #[test]
    fn deposit_above_balance_is_rejected() {
        assert_eq!(
            minimal(60000, 50000).unwrap_err(),
            TypeConstraintError::DepositExceedsBalance
        );
    }

    #[test]
    fn deposit_equal_to_balance_is_allowed() {
        assert!(minimal(50000, 50000).is_ok());
    }

    #[test]
    fn optional_fields_are_trimmed_to_none() {
        let new_client = NewClient::new(
            "Wedding".into(),
            Some("   ".into()),
            "Jamie".into(),
            None,
            Some(" Jamie@Example.com ".into()),
            None,
            None,
            None,
            None,
            None,
            None,
            Money::zero(),
            Money::zero(),
        )
        .unwrap();
        assert_eq!(new_client.event_name, None);
        assert_eq!(new_client.client_email.as_deref(), Some("jamie@example.com"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let result = NewClient::new(
            "Wedding".into(),
            None,
            "Jamie".into(),
            None,
            Some("not-an-email".into()),
            None,
            None,
            None,
            None,
            None,
            None,
            Money::zero(),
            Money::zero(),
        );
        assert_eq!(result.unwrap_err(), TypeConstraintError::InvalidEmail);
    }

    #[test]
    fn blank_client_name_is_rejected() {
        let result = NewClient::new(
            "Wedding".into(),
            None,
            "   ".into(),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            Money::zero(),
            Money::zero(),
        );
        assert_eq!(result.unwrap_err(), TypeConstraintError::EmptyString);
    }
}
