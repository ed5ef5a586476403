// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service catalog endpoints.

use reqwest::Method;
use serde::Deserialize;

use fixo_core::{FixoError, ServiceId};

use crate::client::ApiClient;

/// A bookable service category (cleaning, plumbing, electrical, ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    pub id: ServiceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
}

impl ApiClient {
    /// Lists all bookable service categories.
    pub async fn list_services(&self) -> Result<Vec<ServiceCategory>, FixoError> {
        self.authorized(Method::GET, "/services", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_category_deserializes_backend_shape() {
        let json = r#"{
            "id": "svc-cleaning",
            "name": "Home cleaning",
            "description": "Hourly cleaning service",
            "iconUrl": "https://cdn.test/cleaning.png",
            "basePrice": 150000.0
        }"#;
        let svc: ServiceCategory = serde_json::from_str(json).unwrap();
        assert_eq!(svc.id, ServiceId("svc-cleaning".into()));
        assert_eq!(svc.base_price, Some(150000.0));
    }

    #[test]
    fn optional_fields_default_to_none() {
        let svc: ServiceCategory =
            serde_json::from_str(r#"{"id": "svc-1", "name": "Plumbing"}"#).unwrap();
        assert!(svc.description.is_none());
        assert!(svc.icon_url.is_none());
        assert!(svc.base_price.is_none());
    }
}
