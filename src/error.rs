//! Error types for the store, the table controller and the user source

use thiserror::Error;

use crate::models::UserStatus;

/// Failure talking to the user source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Server returned {status}")]
    Status { status: u16 },
    #[error("Invalid response body: {0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}

/// Errors reported by [`crate::store::UserDataStore`] mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("User {0} not found")]
    NotFound(String),
    #[error("Could not set {user_id} to {status}: {source}")]
    PersistFailed {
        user_id: String,
        status: UserStatus,
        #[source]
        source: FetchError,
    },
}

/// Errors reported by [`crate::table::UserTableController`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Invalid page size {0}")]
    InvalidPageSize(usize),
}
