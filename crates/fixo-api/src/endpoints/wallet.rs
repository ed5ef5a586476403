// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wallet endpoints: balance and transaction history.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;

use fixo_core::FixoError;

use crate::client::ApiClient;

/// Current wallet balance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub balance: f64,
    pub currency: String,
}

/// Direction of a wallet movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Credit,
    Debit,
}

/// A single wallet transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ApiClient {
    /// Fetches the current wallet balance.
    pub async fn wallet_balance(&self) -> Result<WalletBalance, FixoError> {
        self.authorized(Method::GET, "/wallet/balance", None).await
    }

    /// Lists wallet transactions, newest first.
    pub async fn wallet_transactions(&self) -> Result<Vec<WalletTransaction>, FixoError> {
        self.authorized(Method::GET, "/wallet/transactions", None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_deserializes_backend_shape() {
        let json = r#"{
            "id": "t-1",
            "kind": "DEBIT",
            "amount": 50000.0,
            "description": "Platform fee",
            "createdAt": "2026-08-11T12:00:00Z"
        }"#;
        let tx: WalletTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::Debit);
        assert_eq!(tx.amount, 50000.0);
    }

    #[test]
    fn balance_deserializes() {
        let bal: WalletBalance =
            serde_json::from_str(r#"{"balance": 120000.0, "currency": "VND"}"#).unwrap();
        assert_eq!(bal.currency, "VND");
    }
}
