//! Contracts for the external collaborators the planner depends on: the
//! payment gateway, the song lookup service and the logo asset host. Each is
//! consumed through a trait so the service layer stays testable; production
//! adapters live with the deployment, tests use the in-memory fakes below.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::Money;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway rejected the request (bad amount, declined card, ...).
    #[error("payment declined: {0}")]
    Declined(String),
    /// Transport-level failure talking to the gateway.
    #[error("gateway unreachable: {0}")]
    Unreachable(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Opaque authorization token returned by the first phase of a charge.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntentToken(pub String);

/// Card details collected client-side; passed through, never stored.
#[derive(Clone, Debug, Deserialize)]
pub struct PaymentMethod {
    pub card_token: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChargeStatus {
    Succeeded,
    Failed,
}

#[derive(Clone, Debug)]
pub struct ChargeOutcome {
    pub status: ChargeStatus,
    /// Gateway-side identifier of the intent, persisted on success.
    pub intent_id: String,
}

/// Metadata attached to a charge so gateway records can be tied back to the
/// client engagement.
#[derive(Clone, Debug, Serialize)]
pub struct ChargeMetadata {
    pub client_public_id: String,
    pub purpose: String,
}

/// Two-phase charge protocol: request an authorization token, then confirm
/// the charge with card details.
pub trait PaymentGateway: Send + Sync {
    fn create_intent(
        &self,
        amount: Money,
        currency: &str,
        metadata: &ChargeMetadata,
    ) -> GatewayResult<IntentToken>;

    fn confirm(&self, token: &IntentToken, method: &PaymentMethod) -> GatewayResult<ChargeOutcome>;
}

/// One hit from the song lookup service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackHit {
    pub track_name: String,
    pub artist_name: String,
    pub artwork_url: Option<String>,
    pub preview_url: Option<String>,
}

/// Bounded-result song search; no pagination.
pub trait SongLookup: Send + Sync {
    fn search(&self, query: &str, limit: usize) -> GatewayResult<Vec<TrackHit>>;
}

/// Fetches the logo asset for exported documents within a bounded wait.
/// Implementations must return within roughly `timeout`; a slow or failing
/// host degrades the export to "no logo", never to a failure.
pub trait LogoFetcher: Send + Sync {
    fn fetch(&self, url: &str, timeout: Duration) -> Option<Vec<u8>>;
}

/// The external collaborators the server carries in app data.
pub struct GatewaySet {
    pub payment: std::sync::Arc<dyn PaymentGateway>,
    pub songs: std::sync::Arc<dyn SongLookup>,
    pub logo: std::sync::Arc<dyn LogoFetcher>,
}

/// Trivial fetcher for deployments without a logo asset.
pub struct NoLogo;

impl LogoFetcher for NoLogo {
    fn fetch(&self, _url: &str, _timeout: Duration) -> Option<Vec<u8>> {
        None
    }
}

/// Placeholder for deployments without a payment integration; every charge
/// fails with a clear message instead of silently succeeding.
pub struct UnconfiguredGateway;

impl PaymentGateway for UnconfiguredGateway {
    fn create_intent(
        &self,
        _amount: Money,
        _currency: &str,
        _metadata: &ChargeMetadata,
    ) -> GatewayResult<IntentToken> {
        Err(GatewayError::Unreachable(
            "no payment gateway configured".to_string(),
        ))
    }

    fn confirm(
        &self,
        _token: &IntentToken,
        _method: &PaymentMethod,
    ) -> GatewayResult<ChargeOutcome> {
        Err(GatewayError::Unreachable(
            "no payment gateway configured".to_string(),
        ))
    }
}

/// Song lookup for deployments without a search integration.
pub struct NoSongs;

impl SongLookup for NoSongs {
    fn search(&self, _query: &str, _limit: usize) -> GatewayResult<Vec<TrackHit>> {
        Ok(Vec::new())
    }
}

#[cfg(any(test, feature = "test-mocks"))]
pub mod fakes {
    //! In-memory gateway fakes shared by service tests.

    use std::sync::Mutex;

    use super::*;

    /// Scriptable payment gateway: fails phase one or phase two on demand
    /// and records every confirmed charge.
    #[derive(Default)]
    pub struct FakeGateway {
        pub fail_intent: bool,
        pub fail_confirm: bool,
        pub confirmed: Mutex<Vec<(String, i64)>>,
    }

    impl PaymentGateway for FakeGateway {
        fn create_intent(
            &self,
            amount: Money,
            _currency: &str,
            metadata: &ChargeMetadata,
        ) -> GatewayResult<IntentToken> {
            if self.fail_intent {
                return Err(GatewayError::Unreachable("intent endpoint down".into()));
            }
            Ok(IntentToken(format!(
                "tok_{}_{}",
                metadata.purpose,
                amount.minor_units()
            )))
        }

        fn confirm(
            &self,
            token: &IntentToken,
            _method: &PaymentMethod,
        ) -> GatewayResult<ChargeOutcome> {
            if self.fail_confirm {
                return Err(GatewayError::Declined("card declined".into()));
            }
            let intent_id = format!("pi_{}", token.0);
            if let Ok(mut confirmed) = self.confirmed.lock() {
                confirmed.push((token.0.clone(), 0));
            }
            Ok(ChargeOutcome {
                status: ChargeStatus::Succeeded,
                intent_id,
            })
        }
    }

    /// Song lookup returning canned hits regardless of the query.
    pub struct FakeSongLookup(pub Vec<TrackHit>);

    impl SongLookup for FakeSongLookup {
        fn search(&self, _query: &str, limit: usize) -> GatewayResult<Vec<TrackHit>> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }
    }

    /// Logo fetcher that pretends the asset host timed out.
    pub struct UnreachableLogo;

    impl LogoFetcher for UnreachableLogo {
        fn fetch(&self, _url: &str, _timeout: Duration) -> Option<Vec<u8>> {
            None
        }
    }
}
