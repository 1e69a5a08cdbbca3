//! User sources - where the user list comes from and where status changes go
//!
//! The store only talks to [`UserSource`]; the HTTP implementation lives in
//! [`crate::network::client`], the file implementation here.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::FetchError;
use crate::models::{UserRecord, UserStatus};
use crate::network::client::HttpUserSource;

/// Fetch and persist collaborator used by [`crate::store::UserDataStore`]
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch every user, in the order the backend lists them
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, FetchError>;

    /// Persist a status change for one user
    async fn persist_status(&self, user_id: &str, status: UserStatus) -> Result<(), FetchError>;
}

/// Reads users from a local JSON array; status changes stay in memory
pub struct FileUserSource {
    path: PathBuf,
}

impl FileUserSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileUserSource { path: path.into() }
    }
}

#[async_trait]
impl UserSource for FileUserSource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, FetchError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Other(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&content).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn persist_status(&self, user_id: &str, status: UserStatus) -> Result<(), FetchError> {
        tracing::debug!(user_id, %status, "File source keeps status changes in memory only");
        Ok(())
    }
}

/// Pick the source named by the configuration
pub fn source_from_config(config: &Config) -> anyhow::Result<Arc<dyn UserSource>> {
    match &config.data_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading users from file");
            Ok(Arc::new(FileUserSource::new(path)))
        }
        None => {
            tracing::info!(url = %config.api_url, "Loading users from API");
            Ok(Arc::new(HttpUserSource::new(
                &config.api_url,
                config.auth.clone(),
                config.request_timeout(),
            )?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_source_reads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"1","fullName":"Adedeji Ola","email":"adedeji@lendsqr.com","phoneNumber":"08078903721","organization":"Lendsqr","dateJoined":"2020-05-15T10:00:00Z","status":"Inactive"}}]"#
        )
        .unwrap();

        let source = FileUserSource::new(file.path());
        let users = source.fetch_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].status, UserStatus::Inactive);
    }

    #[tokio::test]
    async fn test_file_source_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let source = FileUserSource::new(file.path());
        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileUserSource::new("/definitely/not/here.json");
        assert!(matches!(source.fetch_all().await, Err(FetchError::Other(_))));
    }
}
