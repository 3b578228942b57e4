//! Development auto-login

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{BootstrapOutcome, BootstrapStep};
use crate::store::{TokenStore, AUTH_TOKEN_KEY};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapAuthError {
    #[error("login request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("login rejected with status {0}")]
    Status(u16),
    #[error("login response had no token")]
    Decode,
    #[error("credential store: {0}")]
    Store(#[source] anyhow::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default, alias = "access_token", alias = "accessToken")]
    token: Option<String>,
}

pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BootstrapAuthError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.base_url)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<String, BootstrapAuthError> {
        let response = self.http.post(self.login_url()).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BootstrapAuthError::Status(status.as_u16()));
        }
        let text = response.text().await?;
        let body: LoginResponse = serde_json::from_str(&text).map_err(|err| {
            tracing::debug!(error = %err, "login response is not the expected JSON");
            BootstrapAuthError::Decode
        })?;
        body.token
            .filter(|token| !token.is_empty())
            .ok_or(BootstrapAuthError::Decode)
    }
}

/// Logs in with fixed development credentials unless a token is already stored
pub struct CredentialBootstrap {
    client: AuthClient,
    request: LoginRequest,
    store: Arc<dyn TokenStore>,
}

impl CredentialBootstrap {
    pub fn new(client: AuthClient, request: LoginRequest, store: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            request,
            store,
        }
    }

    async fn authenticate(&self) -> Result<BootstrapOutcome, BootstrapAuthError> {
        let existing = self
            .store
            .get(AUTH_TOKEN_KEY)
            .map_err(BootstrapAuthError::Store)?;
        if existing.is_some() {
            return Ok(BootstrapOutcome::AlreadyAuthenticated);
        }

        tracing::info!(url = %self.client.login_url(), user = %self.request.username, "logging in");
        let token = self.client.login(&self.request).await?;
        self.store
            .set(AUTH_TOKEN_KEY, &token)
            .map_err(BootstrapAuthError::Store)?;
        Ok(BootstrapOutcome::Authenticated)
    }
}

#[async_trait]
impl BootstrapStep for CredentialBootstrap {
    async fn run(&self) -> BootstrapOutcome {
        match self.authenticate().await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(error = %err, "auto-login failed");
                BootstrapOutcome::Failed(err.to_string())
            }
        }
    }
}
