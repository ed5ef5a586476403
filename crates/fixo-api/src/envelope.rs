// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend response envelope.
//!
//! Every endpoint responds with `{"result": bool, "message": ..., "data": ...}`;
//! `result == false` carries a business error in `message`.

use serde::Deserialize;

use fixo_core::FixoError;

/// The standard response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub result: bool,
    #[serde(default)]
    pub message: Option<String>,
    // No serde(default) here: a missing Option is already None, and the
    // attribute would force a Default bound on T.
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload of a successful envelope, mapping business errors
    /// to [`FixoError::Api`].
    pub fn into_data(self, status: u16) -> Result<T, FixoError> {
        if !self.result {
            return Err(FixoError::Api {
                status,
                message: self
                    .message
                    .unwrap_or_else(|| "request rejected by backend".to_string()),
            });
        }
        self.data.ok_or_else(|| FixoError::Api {
            status,
            message: "backend reported success without data".to_string(),
        })
    }

    /// Checks a successful envelope for endpoints that return no payload.
    pub fn into_ack(self, status: u16) -> Result<(), FixoError> {
        if self.result {
            Ok(())
        } else {
            Err(FixoError::Api {
                status,
                message: self
                    .message
                    .unwrap_or_else(|| "request rejected by backend".to_string()),
            })
        }
    }
}
