//! # Userboard
//!
//! A terminal admin dashboard for the users of a lending platform.
//!
//! ## Features
//! - Paginated users table (10/20/30/40/50 rows per page)
//! - Three-state column sorting (ascending, descending, fetch order)
//! - Filter modal (organization, name, email, join date, phone, status)
//! - Per-row action menu: view details, blacklist, activate
//! - Summary cards and a per-user detail screen
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine over the user store and table controller)
//! - Network Layer (Tokio runtime) - user source calls

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod source;
pub mod store;
pub mod table;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use error::{FetchError, StoreError, TableError};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{AuthType, UserRecord, UserStatus};
pub use network::{HttpUserSource, NetworkActor};
pub use source::{FileUserSource, UserSource};
pub use store::{StoreSnapshot, UserDataStore, UserSummary};
pub use table::{Column, SortDirection, UserFilter, UserTableController};
