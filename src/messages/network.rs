//! Network messages - communication between App and Network layers

use crate::error::FetchError;
use crate::models::{UserRecord, UserStatus};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch the full user list; `generation` comes from the store
    FetchUsers { generation: u64 },
    /// Persist a status change for one user
    PersistStatus { user_id: String, status: UserStatus },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    UsersFetched {
        generation: u64,
        result: Result<Vec<UserRecord>, FetchError>,
    },
    StatusPersisted {
        user_id: String,
        status: UserStatus,
        result: Result<(), FetchError>,
    },
}
