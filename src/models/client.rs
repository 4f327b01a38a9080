use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};
use crate::domain::types::{Money, PublicId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub public_id: String,
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
    pub deposit_amount: i64,
    pub total_balance: i64,
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub public_id: String,
    pub event_type: &'a str,
    pub event_name: Option<&'a str>,
    pub client_name: &'a str,
    pub fiance_name: Option<&'a str>,
    pub client_email: Option<&'a str>,
    pub client_phone: Option<&'a str>,
    pub client_address: Option<&'a str>,
    pub event_date: Option<NaiveDate>,
    pub venue_name: Option<&'a str>,
    pub venue_address: Option<&'a str>,
    pub services: Option<&'a str>,
    pub deposit_amount: i64,
    pub total_balance: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Data used when staff edit a [`Client`] record.
pub struct UpdateClient<'a> {
    pub event_type: &'a str,
    pub event_name: Option<&'a str>,
    pub client_name: &'a str,
    pub fiance_name: Option<&'a str>,
    pub client_email: Option<&'a str>,
    pub client_phone: Option<&'a str>,
    pub client_address: Option<&'a str>,
    pub event_date: Option<NaiveDate>,
    pub venue_name: Option<&'a str>,
    pub venue_address: Option<&'a str>,
    pub services: Option<&'a str>,
    pub deposit_amount: i64,
    pub total_balance: i64,
    pub onboarding_completed: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::clients)]
/// Targeted flag changes (signing, payments, archive). `None` fields are
/// left untouched by Diesel.
pub struct ClientFlagChangeset {
    pub signature: Option<String>,
    pub signature_date: Option<NaiveDateTime>,
    pub deposit_paid: Option<bool>,
    pub balance_paid: Option<bool>,
    pub payment_intent_id: Option<String>,
    pub onboarding_completed: Option<bool>,
    pub archived: Option<bool>,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: client.id,
            public_id: client.public_id.parse::<PublicId>()?,
            event_type: client.event_type,
            event_name: client.event_name,
            client_name: client.client_name,
            fiance_name: client.fiance_name,
            client_email: client.client_email,
            client_phone: client.client_phone,
            client_address: client.client_address,
            event_date: client.event_date,
            venue_name: client.venue_name,
            venue_address: client.venue_address,
            services: client.services,
            deposit_amount: Money::new(client.deposit_amount)?,
            total_balance: Money::new(client.total_balance)?,
            signature: client.signature,
            signature_date: client.signature_date,
            deposit_paid: client.deposit_paid,
            balance_paid: client.balance_paid,
            payment_intent_id: client.payment_intent_id,
            onboarding_completed: client.onboarding_completed,
            archived: client.archived,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> NewClient<'a> {
    /// Builds the insertable row, minting a fresh public id.
    pub fn from_domain(client: &'a DomainNewClient, public_id: PublicId) -> Self {
        Self {
            public_id: public_id.to_string(),
            event_type: client.event_type.as_str(),
            event_name: client.event_name.as_deref(),
            client_name: client.client_name.as_str(),
            fiance_name: client.fiance_name.as_deref(),
            client_email: client.client_email.as_deref(),
            client_phone: client.client_phone.as_deref(),
            client_address: client.client_address.as_deref(),
            event_date: client.event_date,
            venue_name: client.venue_name.as_deref(),
            venue_address: client.venue_address.as_deref(),
            services: client.services.as_deref(),
            deposit_amount: client.deposit_amount.minor_units(),
            total_balance: client.total_balance.minor_units(),
        }
    }
}

impl<'a> UpdateClient<'a> {
    pub fn from_domain(client: &'a DomainUpdateClient, now: NaiveDateTime) -> Self {
        Self {
            event_type: client.event_type.as_str(),
            event_name: client.event_name.as_deref(),
            client_name: client.client_name.as_str(),
            fiance_name: client.fiance_name.as_deref(),
            client_email: client.client_email.as_deref(),
            client_phone: client.client_phone.as_deref(),
            client_address: client.client_address.as_deref(),
            event_date: client.event_date,
            venue_name: client.venue_name.as_deref(),
            venue_address: client.venue_address.as_deref(),
            services: client.services.as_deref(),
            deposit_amount: client.deposit_amount.minor_units(),
            total_balance: client.total_balance.minor_units(),
            onboarding_completed: client.onboarding_completed,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_db_client() -> Client {
        let now = Utc::now().naive_utc();
        Client {
            id: 1,
            public_id: PublicId::new().to_string(),
            event_type: "Wedding".into(),
            event_name: None,
            client_name: "Jamie".into(),
            fiance_name: Some("Alex".into()),
            client_email: Some("jamie@example.com".into()),
            client_phone: None,
            client_address: None,
            event_date: None,
            venue_name: Some("The Barn".into()),
            venue_address: None,
            services: None,
            deposit_amount: 60000,
            total_balance: 150000,
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

    #[test]
    fn db_client_converts_into_domain() {
        let db_client = sample_db_client();
        let domain: DomainClient = db_client.clone().try_into().unwrap();
        assert_eq!(domain.id, 1);
        assert_eq!(domain.deposit_amount.minor_units(), 60000);
        assert_eq!(domain.remaining_balance().minor_units(), 90000);
        assert_eq!(domain.public_id.to_string(), db_client.public_id);
    }

    #[test]
    fn malformed_public_id_is_rejected_at_the_boundary() {
        let mut db_client = sample_db_client();
        db_client.public_id = "not-a-uuid".into();
        assert!(DomainClient::try_from(db_client).is_err());
    }
}
