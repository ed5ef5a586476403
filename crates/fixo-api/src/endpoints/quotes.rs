// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quote endpoints: customers list quotes for a job, workers send them.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use fixo_core::{FixoError, JobCode};

use crate::client::ApiClient;

/// A worker's quote on a job request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub job_code: JobCode,
    pub worker_id: String,
    #[serde(default)]
    pub worker_name: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for sending a quote (worker side).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub job_code: JobCode,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiClient {
    /// Lists the quotes received for a job request.
    pub async fn quotes_for(&self, code: &JobCode) -> Result<Vec<Quote>, FixoError> {
        self.authorized(Method::GET, &format!("/jobs/{code}/quotes"), None)
            .await
    }

    /// Sends a quote on an open job request.
    pub async fn send_quote(&self, quote: &NewQuote) -> Result<Quote, FixoError> {
        let body = serde_json::to_value(quote)
            .map_err(|e| FixoError::Internal(format!("quote serialization failed: {e}")))?;
        self.authorized(Method::POST, "/quotes", Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_deserializes_backend_shape() {
        let json = r#"{
            "id": "q-77",
            "jobCode": "JR-1",
            "workerId": "w-5",
            "workerName": "Le Van C",
            "amount": 300000.0,
            "message": "Can start tomorrow morning",
            "createdAt": "2026-08-11T10:00:00Z"
        }"#;
        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.job_code, JobCode("JR-1".into()));
        assert_eq!(quote.amount, 300000.0);
    }

    #[test]
    fn new_quote_omits_absent_message() {
        let quote = NewQuote {
            job_code: JobCode("JR-1".into()),
            amount: 100.0,
            message: None,
        };
        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("jobCode"));
        assert!(!json.contains("message"));
    }
}
