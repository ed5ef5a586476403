// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification endpoints.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;

use fixo_core::FixoError;

use crate::client::ApiClient;

/// A backend-issued notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl ApiClient {
    /// Lists the caller's notifications.
    pub async fn notifications(&self) -> Result<Vec<Notification>, FixoError> {
        self.authorized(Method::GET, "/notifications", None).await
    }

    /// Marks a notification as read.
    pub async fn mark_notification_read(&self, id: &str) -> Result<(), FixoError> {
        self.authorized_ack(Method::POST, &format!("/notifications/{id}/read"), None)
            .await
    }
}
