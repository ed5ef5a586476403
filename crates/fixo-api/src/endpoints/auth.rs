// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auth endpoints: login, register, refresh, logout.
//!
//! Login and register validate inputs client-side before touching the
//! network; the refresh endpoint backs the [`TokenRefresher`] impl used by
//! the 401 middleware.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::{info, warn};

use fixo_core::validate::{validate_password, validate_phone};
use fixo_core::{FixoError, TokenPair, UserProfile};

use crate::client::ApiClient;
use crate::session::TokenRefresher;

/// Token material and user record returned by login and register.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthData {
    access_token: String,
    refresh_token: String,
    user: UserProfile,
}

/// Rotated token pair returned by the refresh endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshData {
    access_token: String,
    refresh_token: String,
}

impl ApiClient {
    /// Logs in with phone and password, installing and persisting the
    /// session on success.
    pub async fn login(&self, phone: &str, password: &str) -> Result<UserProfile, FixoError> {
        validate_phone(phone)?;
        validate_password(password)?;

        let data: AuthData = self
            .public_post(
                "/auth/login",
                serde_json::json!({"phone": phone, "password": password}),
            )
            .await?;

        self.session()
            .install(TokenPair::new(data.access_token, data.refresh_token))
            .await?;
        self.session().store().save_user(&data.user).await?;
        info!(user_id = %data.user.id, "logged in");
        Ok(data.user)
    }

    /// Registers a new account and logs it in.
    pub async fn register(
        &self,
        phone: &str,
        password: &str,
        full_name: &str,
    ) -> Result<UserProfile, FixoError> {
        validate_phone(phone)?;
        validate_password(password)?;
        if full_name.trim().is_empty() {
            return Err(FixoError::Validation("full name must not be empty".into()));
        }

        let data: AuthData = self
            .public_post(
                "/auth/register",
                serde_json::json!({
                    "phone": phone,
                    "password": password,
                    "fullName": full_name,
                }),
            )
            .await?;

        self.session()
            .install(TokenPair::new(data.access_token, data.refresh_token))
            .await?;
        self.session().store().save_user(&data.user).await?;
        info!(user_id = %data.user.id, "registered");
        Ok(data.user)
    }

    /// Logs out. The backend call is best effort; local session state is
    /// cleared regardless (the role survives, it is a UI toggle).
    pub async fn logout(&self) -> Result<(), FixoError> {
        if let Err(e) = self
            .authorized_ack(Method::POST, "/auth/logout", None)
            .await
        {
            warn!(error = %e, "backend logout failed, clearing local session anyway");
        }
        self.session().clear().await?;
        info!("logged out");
        Ok(())
    }
}

#[async_trait]
impl TokenRefresher for ApiClient {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, FixoError> {
        let data: RefreshData = self
            .public_post(
                "/auth/refresh",
                serde_json::json!({"refreshToken": refresh_token}),
            )
            .await?;
        Ok(TokenPair::new(data.access_token, data.refresh_token))
    }
}
