//! Error types for the account service.

use std::io;
use std::path::PathBuf;

use hle_framework::ServiceError;

use crate::types::UserId;

/// Errors from profile store mutations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// All `MAX_USERS` slots are taken
    #[error("profile store is full")]
    TooManyUsers,
    /// The invalid (zero) id was passed
    #[error("invalid user id")]
    InvalidUser,
    /// The id is already registered
    #[error("user {0} already exists")]
    UserAlreadyExists(UserId),
    /// The id is not registered
    #[error("user {0} not found")]
    NotFound(UserId),
    /// Username does not fit the fixed-size field
    #[error("username is {0} bytes, longer than the username field")]
    UsernameTooLong(usize),
}

/// Errors raised by the account module.
///
/// Lookup failures never reach the guest as-is: handlers log them and
/// answer with a generic failure result.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// The user has no record in the store
    #[error("user {0} not found")]
    NotFound(UserId),

    /// The store holds a base profile but cannot produce the rest of it
    #[error("profile store is inconsistent for user {0}")]
    Inconsistent(UserId),

    #[error("failed to read config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}
