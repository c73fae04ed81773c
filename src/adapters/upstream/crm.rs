//! CRM REST client
//!
//! Talks to the CRM's JSON API over HTTPS with bearer-token
//! authentication. Deals are listed through an offset-paginated
//! endpoint filtered by modification date.

use crate::config::CrmConfig;
use crate::core::sync::DateWindow;
use crate::domain::errors::UpstreamError;
use crate::domain::ids::{EntityKind, UpstreamSystem};
use crate::domain::record::RawRecord;
use crate::domain::{LedgerError, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;

use super::traits::{PageRequest, RecordPage, UpstreamSource};

/// Client for the CRM deals API
pub struct CrmClient {
    client: reqwest::Client,
    base_url: String,
    config: CrmConfig,
}

/// Wire shape of the CRM list endpoint
#[derive(Debug, Deserialize)]
struct DealListResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(default)]
    total: Option<u64>,
}

impl CrmClient {
    /// Creates a new CRM client from configuration
    pub fn new(config: CrmConfig) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                LedgerError::Configuration(format!("Failed to build CRM HTTP client: {}", e))
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    fn auth_header_value(&self) -> String {
        format!("Bearer {}", self.config.api_token.expose_secret())
    }
}

#[async_trait]
impl UpstreamSource for CrmClient {
    fn system(&self) -> UpstreamSystem {
        UpstreamSystem::Crm
    }

    async fn fetch_page(
        &self,
        entity: EntityKind,
        window: &DateWindow,
        page: PageRequest,
    ) -> Result<RecordPage> {
        if entity.system() != UpstreamSystem::Crm {
            return Err(LedgerError::Validation(format!(
                "Entity '{}' is not served by the CRM adapter",
                entity
            )));
        }

        let url = format!("{}/api/v3/deals", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header_value())
            .header("Accept", "application/json")
            .query(&[
                ("modified_from", window.from_param()),
                ("modified_to", window.to_param()),
                ("limit", page.size.to_string()),
                ("offset", page.offset.to_string()),
            ])
            .send()
            .await
            .map_err(|e| UpstreamError::Http(format!("CRM request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let payload: DealListResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(format!("Invalid CRM response: {}", e)))?;

        let items = payload
            .results
            .iter()
            .filter_map(RawRecord::from_value)
            .collect();

        Ok(RecordPage {
            items,
            total_estimate: payload.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use chrono::NaiveDate;

    fn test_config(base_url: &str) -> CrmConfig {
        CrmConfig {
            base_url: base_url.to_string(),
            api_token: secret_string("crm_test_token".to_string()),
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
        let client = CrmClient::new(test_config("https://crm.example.com/"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "https://crm.example.com");
    }

    #[test]
    fn test_auth_header_is_bearer() {
        let client = CrmClient::new(test_config("https://crm.example.com")).unwrap();
        assert_eq!(client.auth_header_value(), "Bearer crm_test_token");
    }

    #[tokio::test]
    async fn test_fetch_page_parses_results() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v3/deals")
            .match_header("authorization", "Bearer crm_test_token")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("modified_from".into(), "2025-01-01".into()),
                mockito::Matcher::UrlEncoded("modified_to".into(), "2025-03-31".into()),
                mockito::Matcher::UrlEncoded("limit".into(), "50".into()),
                mockito::Matcher::UrlEncoded("offset".into(), "0".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results": [{"id": "D-1", "name": "Acme renewal"}, {"id": "D-2"}], "total": 2}"#,
            )
            .create_async()
            .await;

        let client = CrmClient::new(test_config(&server.url())).unwrap();
        let page = client
            .fetch_page(EntityKind::Deal, &test_window(), PageRequest::new(0, 50))
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.total_estimate, Some(2));
        assert_eq!(page.items[0].text("id"), Some("D-1".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_surfaces_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v3/deals")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .with_body("upstream maintenance")
            .create_async()
            .await;

        let client = CrmClient::new(test_config(&server.url())).unwrap();
        let err = client
            .fetch_page(EntityKind::Deal, &test_window(), PageRequest::new(0, 50))
            .await
            .unwrap_err();

        match err {
            LedgerError::Upstream(UpstreamError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert!(body.contains("maintenance"));
            }
            other => panic!("Expected status error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_undecodable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v3/deals")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = CrmClient::new(test_config(&server.url())).unwrap();
        let err = client
            .fetch_page(EntityKind::Deal, &test_window(), PageRequest::new(0, 50))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Upstream(UpstreamError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_erp_entities() {
        let client = CrmClient::new(test_config("http://localhost:1")).unwrap();
        let err = client
            .fetch_page(EntityKind::Invoice, &test_window(), PageRequest::new(0, 50))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::Validation(_)));
    }
}
