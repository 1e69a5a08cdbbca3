//! HTTP user source - talks to the admin users API

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;

use crate::error::FetchError;
use crate::models::{AuthType, UserRecord, UserStatus};
use crate::source::UserSource;

/// Users API client
pub struct HttpUserSource {
    client: reqwest::Client,
    api_url: String,
    auth: AuthType,
}

#[derive(Serialize)]
struct StatusBody {
    status: UserStatus,
}

impl HttpUserSource {
    pub fn new(api_url: &str, auth: AuthType, timeout: Duration) -> anyhow::Result<Self> {
        Ok(HttpUserSource {
            client: create_client(timeout)?,
            api_url: api_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.api_url)
    }

    fn user_url(&self, user_id: &str) -> String {
        format!("{}/users/{}", self.api_url, user_id)
    }

    /// Attach auth and the JSON accept header
    fn build_request(&self, req_builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let req_builder = req_builder.header("Accept", "application/json");
        match &self.auth {
            AuthType::Bearer { token } => {
                req_builder.header("Authorization", format!("Bearer {}", token))
            }
            AuthType::Basic { username, password } => {
                req_builder.header("Authorization", basic_auth_header(username, password))
            }
            AuthType::None => req_builder,
        }
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, FetchError> {
        let url = self.users_url();
        tracing::info!(url = %url, "Fetching users");
        let resp = self
            .build_request(self.client.get(&url))
            .send()
            .await
            .map_err(map_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        resp.json::<Vec<UserRecord>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn persist_status(&self, user_id: &str, status: UserStatus) -> Result<(), FetchError> {
        let url = self.user_url(user_id);
        tracing::info!(url = %url, %status, "Persisting status");
        let resp = self
            .build_request(self.client.patch(&url))
            .json(&StatusBody { status })
            .send()
            .await
            .map_err(map_error)?;

        let code = resp.status();
        if code.is_success() {
            Ok(())
        } else {
            Err(FetchError::Status {
                status: code.as_u16(),
            })
        }
    }
}

fn basic_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    format!("Basic {}", encoded)
}

fn map_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect(e.to_string())
    } else if e.is_decode() {
        FetchError::Decode(e.to_string())
    } else {
        FetchError::Other(format!("Request failed: {}", e))
    }
}

/// Create an HTTP client with the configured timeout
pub fn create_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
