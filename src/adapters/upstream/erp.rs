//! ERP REST client
//!
//! Talks to the ERP's record search API. Searches are POSTed as JSON
//! with the record type and date bounds in the body, authenticated with
//! HTTP Basic credentials derived from the account id and API token.

use crate::config::ErpConfig;
use crate::core::sync::DateWindow;
use crate::domain::errors::UpstreamError;
use crate::domain::ids::{EntityKind, UpstreamSystem};
use crate::domain::record::RawRecord;
use crate::domain::{LedgerError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::traits::{PageRequest, RecordPage, UpstreamSource};

/// Client for the ERP record search API
pub struct ErpClient {
    client: reqwest::Client,
    base_url: String,
    config: ErpConfig,
}

/// Wire shape of the ERP search endpoint
#[derive(Debug, Deserialize)]
struct RecordSearchResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
    #[serde(default)]
    total_results: Option<u64>,
}

impl ErpClient {
    /// Creates a new ERP client from configuration
    pub fn new(config: ErpConfig) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                LedgerError::Configuration(format!("Failed to build ERP HTTP client: {}", e))
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    fn auth_header_value(&self) -> String {
        let credentials = format!(
            "{}:{}",
            self.config.account_id,
            self.config.token.expose_secret()
        );
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }
}

#[async_trait]
impl UpstreamSource for ErpClient {
    fn system(&self) -> UpstreamSystem {
        UpstreamSystem::Erp
    }

    async fn fetch_page(
        &self,
        entity: EntityKind,
        window: &DateWindow,
        page: PageRequest,
    ) -> Result<RecordPage> {
        if entity.system() != UpstreamSystem::Erp {
            return Err(LedgerError::Validation(format!(
                "Entity '{}' is not served by the ERP adapter",
                entity
            )));
        }

        let url = format!("{}/api/v1/records/search", self.base_url);
        let body = json!({
            "record_type": entity.wire_name(),
            "date_from": window.from_param(),
            "date_to": window.to_param(),
            "page_size": page.size,
            "offset": page.offset,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header_value())
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| UpstreamError::Http(format!("ERP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let payload: RecordSearchResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(format!("Invalid ERP response: {}", e)))?;

        let items = payload
            .items
            .iter()
            .filter_map(RawRecord::from_value)
            .collect();

        Ok(RecordPage {
            items,
            total_estimate: payload.total_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use chrono::NaiveDate;

    fn test_config(base_url: &str) -> ErpConfig {
        ErpConfig {
            base_url: base_url.to_string(),
            account_id: "ACCT-42".to_string(),
            token: secret_string("erp_test_token".to_string()),
            timeout_seconds: 5,
        }
    }

    fn test_window() -> DateWindow {
        DateWindow {
            from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = ErpClient::new(test_config("https://erp.example.com/"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "https://erp.example.com");
    }

    #[test]
    fn test_auth_header_is_basic() {
        let client = ErpClient::new(test_config("https://erp.example.com")).unwrap();
        let value = client.auth_header_value();
        assert!(value.starts_with("Basic "));

        let encoded = value.trim_start_matches("Basic ");
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "ACCT-42:erp_test_token");
    }

    #[tokio::test]
    async fn test_fetch_page_sends_record_type_and_bounds() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/records/search")
            .match_header("authorization", mockito::Matcher::Regex("^Basic ".into()))
            .match_body(mockito::Matcher::PartialJson(json!({
                "record_type": "invoice",
                "date_from": "2025-01-01",
                "date_to": "2025-03-31",
                "page_size": 40,
                "offset": 80,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items": [{"internal_id": "INV-9"}], "total_results": 81}"#)
            .create_async()
            .await;

        let client = ErpClient::new(test_config(&server.url())).unwrap();
        let page = client
            .fetch_page(
                EntityKind::Invoice,
                &test_window(),
                PageRequest::new(80, 40),
            )
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page.total_estimate, Some(81));
        assert_eq!(
            page.items[0].text("internal_id"),
            Some("INV-9".to_string())
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_maps_credit_memo_wire_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/records/search")
            .match_body(mockito::Matcher::PartialJson(json!({
                "record_type": "creditmemo",
            })))
            .with_status(200)
            .with_body(r#"{"items": [], "total_results": 0}"#)
            .create_async()
            .await;

        let client = ErpClient::new(test_config(&server.url())).unwrap();
        let page = client
            .fetch_page(
                EntityKind::CreditMemo,
                &test_window(),
                PageRequest::new(0, 40),
            )
            .await
            .unwrap();

        assert!(page.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_surfaces_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/v1/records/search")
            .with_status(401)
            .with_body("invalid credentials")
            .create_async()
            .await;

        let client = ErpClient::new(test_config(&server.url())).unwrap();
        let err = client
            .fetch_page(
                EntityKind::Payment,
                &test_window(),
                PageRequest::new(0, 40),
            )
            .await
            .unwrap_err();

        match err {
            LedgerError::Upstream(UpstreamError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid credentials"));
            }
            other => panic!("Expected status error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_crm_entities() {
        let client = ErpClient::new(test_config("http://localhost:1")).unwrap();
        let err = client
            .fetch_page(EntityKind::Deal, &test_window(), PageRequest::new(0, 40))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::Validation(_)));
    }
}
