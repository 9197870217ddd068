use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

use crate::forms::products::ProductFormError;

pub mod products;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by product operations.
///
/// Validation and not-found conditions have dedicated variants; everything
/// else is a server fault and is reported with its own message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Product ID is required")]
    MissingId,
    #[error("Field cannot be null: {0}")]
    NullField(&'static str),
    #[error("Product not found")]
    NotFound,
    /// The request could not be interpreted (bad JSON, bad id, bad number).
    #[error("{0}")]
    Malformed(String),
    #[error("{0}")]
    Repository(RepositoryError),
}

impl ServiceError {
    /// HTTP status code reported for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::MissingField(_) | ServiceError::MissingId | ServiceError::NullField(_) => {
                400
            }
            ServiceError::NotFound => 404,
            ServiceError::Malformed(_) | ServiceError::Repository(_) => 500,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(value: ProductFormError) -> Self {
        match value {
            ProductFormError::MissingField(field) => ServiceError::MissingField(field),
            ProductFormError::MissingId => ServiceError::MissingId,
            ProductFormError::NullField(field) => ServiceError::NullField(field),
            other => ServiceError::Malformed(other.to_string()),
        }
    }
}
