use causerie_store::{ContactId, StoreError};
use thiserror::Error;

/// Errors surfaced by client operations.
///
/// Lookups of unknown contacts, messages or status updates inside a mutation
/// are not errors: those operations succeed and return the state unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The operation needs a profile and onboarding has not completed.
    #[error("No profile found")]
    ProfileMissing,

    #[error("Contact {0} not found")]
    ContactNotFound(ContactId),

    #[error("Contact {0} is blocked")]
    ContactBlocked(ContactId),

    #[error("Incorrect verification code")]
    InvalidVerificationCode,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
