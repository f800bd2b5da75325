//! Error taxonomy for the service façade.

use thiserror::Error;

use customer_registry_core::{CustomerId, EmailError};

use crate::store::StoreError;

/// Caller-supplied data failed a precondition.
///
/// Every variant names the offending field using its wire name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// The email address is not syntactically valid.
    #[error("invalid email format: {0}")]
    InvalidEmail(#[from] EmailError),

    /// An identifier is zero or negative.
    #[error("{field} must be greater than 0")]
    NonPositiveId { field: &'static str },

    /// The identifier in the request path differs from the one in the body.
    #[error("customerId in URL ({path}) does not match customerId in body ({body})")]
    IdMismatch { path: CustomerId, body: CustomerId },
}

impl ValidationError {
    /// Wire name of the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Required { field } | Self::TooLong { field, .. } | Self::NonPositiveId { field } => {
                *field
            }
            Self::InvalidEmail(_) => "email",
            Self::IdMismatch { .. } => "customerId",
        }
    }
}

/// Errors returned by [`CustomerService`](super::CustomerService).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed validation; nothing was read or written.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No customer has this identifier.
    #[error("Customer with ID {0} not found")]
    NotFound(CustomerId),

    /// Unexpected failure in the store.
    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    /// Short machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "notFound",
            Self::Internal { .. } => "internal",
        }
    }
}

/// Result type alias for `ServiceError`.
pub type ServiceResult<T> = Result<T, ServiceError>;
