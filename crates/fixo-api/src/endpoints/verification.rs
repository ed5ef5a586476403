// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Worker verification endpoints.
//!
//! Workers submit identity documents and poll for review status; the app
//! gates quote-sending screens on an approved status.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use fixo_core::FixoError;

use crate::client::ApiClient;

/// Review status of a worker verification submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
}

/// Identity documents submitted for review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSubmission {
    pub id_number: String,
    pub full_name: String,
    /// URLs of uploaded document images (uploading itself is external).
    pub document_urls: Vec<String>,
}

/// Current verification state as reported by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationState {
    pub status: VerificationStatus,
    /// Reviewer's reason, present on rejection.
    #[serde(default)]
    pub reason: Option<String>,
}

impl ApiClient {
    /// Submits worker identity documents for review.
    pub async fn submit_verification(
        &self,
        submission: &VerificationSubmission,
    ) -> Result<(), FixoError> {
        let body = serde_json::to_value(submission).map_err(|e| {
            FixoError::Internal(format!("verification serialization failed: {e}"))
        })?;
        self.authorized_ack(Method::POST, "/verification", Some(body))
            .await
    }

    /// Fetches the caller's current verification status.
    pub async fn verification_status(&self) -> Result<VerificationState, FixoError> {
        self.authorized(Method::GET, "/verification/status", None)
            .await
    }
}
