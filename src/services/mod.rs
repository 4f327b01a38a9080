//! Orchestration layer. Services are plain functions generic over the
//! repository traits they need, so route handlers and tests can supply either
//! the Diesel implementation or mocks.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::gateways::GatewayError;
use crate::repository::errors::RepositoryError;

pub mod client;
pub mod export;
pub mod general_info;
pub mod payment;
pub mod pipeline;
pub mod songs;
pub mod timeline;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    /// The gateway confirmed the charge but the record store update failed.
    /// The money has moved; the caller must surface this distinctly.
    #[error("Payment succeeded but could not be recorded: {0}")]
    PaymentNotRecorded(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(msg) => ServiceError::ValidationError(msg),
            RepositoryError::ConstraintViolation(msg) => ServiceError::ValidationError(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        ServiceError::PaymentFailed(err.to_string())
    }
}
