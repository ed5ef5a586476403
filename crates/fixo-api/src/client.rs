// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the marketplace REST backend.
//!
//! All authenticated traffic goes through one path: attach the bearer token,
//! and on a 401 run the coordinated refresh in [`crate::session::AuthSession`]
//! and retry once with the fresh token. 403 and other failures are plain API
//! errors -- only 401 triggers a refresh.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use fixo_config::model::ApiConfig;
use fixo_core::FixoError;

use crate::envelope::ApiEnvelope;
use crate::session::AuthSession;

/// HTTP client for backend communication.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<AuthSession>,
}

impl ApiClient {
    /// Creates a new API client from configuration.
    pub fn new(config: &ApiConfig, session: Arc<AuthSession>) -> Result<Self, FixoError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FixoError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(
        &self,
        method: &Method,
        path: &str,
        body: Option<&serde_json::Value>,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, FixoError> {
        let mut req = self.http.request(method.clone(), self.url(path));
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await.map_err(|e| FixoError::Transport {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Sends an authenticated request and returns the raw status and body.
    ///
    /// On 401 the session refresh runs (single-flight across concurrent
    /// failures) and the request is retried exactly once with the new token.
    async fn send_authorized(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(StatusCode, String), FixoError> {
        let tokens = self.session.current().ok_or(FixoError::Unauthorized)?;
        let mut response = self
            .execute(&method, path, body.as_ref(), Some(tokens.access()))
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let fresh = self
                .session
                .refresh_after_401(tokens.access(), self)
                .await?;
            debug!(path, "retrying request with refreshed token");
            response = self
                .execute(&method, path, body.as_ref(), Some(fresh.access()))
                .await?;
        }

        let status = response.status();
        let text = response.text().await.map_err(|e| FixoError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok((status, text))
    }

    /// Authenticated request expecting an envelope with a payload.
    pub(crate) async fn authorized<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, FixoError> {
        let (status, text) = self.send_authorized(method, path, body).await?;
        parse_data(status, &text)
    }

    /// Authenticated request expecting an envelope without a payload.
    pub(crate) async fn authorized_ack(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), FixoError> {
        let (status, text) = self.send_authorized(method, path, body).await?;
        if status.is_success() {
            let env: ApiEnvelope<serde_json::Value> = parse_envelope(status, &text)?;
            env.into_ack(status.as_u16())
        } else {
            Err(error_from_failure(status, &text))
        }
    }

    /// Unauthenticated request (login, register, refresh).
    pub(crate) async fn public_post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, FixoError> {
        let response = self
            .execute(&Method::POST, path, Some(&body), None)
            .await?;
        let status = response.status();
        let text = response.text().await.map_err(|e| FixoError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        parse_data(status, &text)
    }
}

fn parse_envelope<T: DeserializeOwned>(
    status: StatusCode,
    text: &str,
) -> Result<ApiEnvelope<T>, FixoError> {
    serde_json::from_str(text).map_err(|e| FixoError::Api {
        status: status.as_u16(),
        message: format!("malformed backend response: {e}"),
    })
}

fn parse_data<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T, FixoError> {
    if status.is_success() {
        parse_envelope::<T>(status, text)?.into_data(status.as_u16())
    } else {
        Err(error_from_failure(status, text))
    }
}

/// Maps a non-success response to an API error, preferring the envelope's
/// `message` field when the body parses.
fn error_from_failure(status: StatusCode, text: &str) -> FixoError {
    if let Ok(env) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(text)
        && let Some(message) = env.message
    {
        return FixoError::Api {
            status: status.as_u16(),
            message,
        };
    }
    FixoError::Api {
        status: status.as_u16(),
        message: format!("request failed with status {status}"),
    }
}
