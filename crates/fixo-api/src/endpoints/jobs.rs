// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job request endpoints: create, list, detail, cancel, price confirmation.
//!
//! Job records are backend-owned; they are fetched per call and never cached
//! or merged client-side.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use fixo_core::{FixoError, JobCode, ServiceId};

use crate::client::ApiClient;

/// Lifecycle status reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Quoted,
    Confirmed,
    InProgress,
    Completed,
    Canceled,
}

/// Payload for creating a job request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobRequest {
    pub service_id: ServiceId,
    pub description: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// A job request as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub code: JobCode,
    pub service_id: ServiceId,
    pub status: JobStatus,
    pub description: String,
    pub address: String,
    /// Confirmed or proposed price, absent until a quote is accepted.
    #[serde(default)]
    pub price: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl ApiClient {
    /// Creates a job request and returns the backend record with its code.
    pub async fn create_job(&self, req: &NewJobRequest) -> Result<JobRequest, FixoError> {
        let body = serde_json::to_value(req)
            .map_err(|e| FixoError::Internal(format!("job serialization failed: {e}")))?;
        self.authorized(Method::POST, "/jobs", Some(body)).await
    }

    /// Lists the caller's own job requests.
    pub async fn my_jobs(&self) -> Result<Vec<JobRequest>, FixoError> {
        self.authorized(Method::GET, "/jobs", None).await
    }

    /// Fetches a single job request by code.
    pub async fn job_detail(&self, code: &JobCode) -> Result<JobRequest, FixoError> {
        self.authorized(Method::GET, &format!("/jobs/{code}"), None)
            .await
    }

    /// Cancels a job request. Booking-critical: failures should be surfaced
    /// as blocking errors by the caller, not swallowed.
    pub async fn cancel_job(&self, code: &JobCode) -> Result<(), FixoError> {
        self.authorized_ack(Method::POST, &format!("/jobs/{code}/cancel"), None)
            .await
    }

    /// Accepts or declines the price proposed via the confirmPrice topic.
    pub async fn confirm_price(&self, code: &JobCode, accept: bool) -> Result<(), FixoError> {
        self.authorized_ack(
            Method::POST,
            &format!("/jobs/{code}/confirm-price"),
            Some(serde_json::json!({"accept": accept})),
        )
        .await
    }
}
