//! Domain-specific error types and error handling.

mod types;

pub use types::AuthError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Persistence failure. Always propagated; a storage error that still
    /// reports success to the caller would let a user believe a code was
    /// stored or consumed when it was not.
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to the authentication error taxonomy
    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type DomainResult<T> = Result<T, DomainError>;
