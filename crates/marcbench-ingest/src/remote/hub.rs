//! Dataset hub client
//!
//! Reads rows through the hub's paginated rows endpoint:
//!
//! ```text
//! GET {base}/rows?dataset=acme/scans&config=default&split=train&offset=0&length=100
//! ```
//!
//! Requests are not retried and carry no timeout; a hanging hub blocks the load.

use async_trait::async_trait;
use marcbench_common::{BenchError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::RowFetcher;
use crate::normalize::RawItem;

// ============================================================================
// Hub Client Constants
// ============================================================================

/// Public dataset hub rows service.
pub const DEFAULT_HUB_URL: &str = "https://datasets-server.huggingface.co";

/// Dataset configuration (subset) read when none is configured.
pub const DEFAULT_HUB_CONFIG: &str = "default";

/// Largest page the rows endpoint serves.
pub const MAX_PAGE_SIZE: usize = 100;

/// One page of the rows endpoint
#[derive(Debug, Deserialize)]
struct RowsPage {
    rows: Vec<HubRow>,
    #[serde(default)]
    num_rows_total: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct HubRow {
    row: RawItem,
}

/// HTTP client for the dataset hub
#[derive(Debug, Clone)]
pub struct HubClient {
    client: Client,
    base_url: String,
    config_name: String,
    page_size: usize,
}

impl HubClient {
    /// Create a client for the hub at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("marcbench/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BenchError::Config(format!("Failed to build hub HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            config_name: DEFAULT_HUB_CONFIG.to_string(),
            page_size: MAX_PAGE_SIZE,
        })
    }

    /// Read a named dataset configuration instead of `default`
    pub fn with_config_name(mut self, config_name: impl Into<String>) -> Self {
        self.config_name = config_name.into();
        self
    }

    /// Rows requested per call, clamped to `1..=MAX_PAGE_SIZE`
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    async fn fetch_page(
        &self,
        name: &str,
        split: &str,
        offset: usize,
        length: usize,
    ) -> Result<RowsPage> {
        let url = format!("{}/rows", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("dataset", name),
                ("config", self.config_name.as_str()),
                ("split", split),
            ])
            .query(&[("offset", offset), ("length", length)])
            .send()
            .await
            .map_err(|e| BenchError::source_fetch(name, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BenchError::source_fetch(
                name,
                format!("hub returned {}: {}", status, hub_error_message(&body)),
            ));
        }

        response
            .json::<RowsPage>()
            .await
            .map_err(|e| BenchError::source_fetch(name, format!("unreadable rows page: {}", e)))
    }
}

/// The hub reports failures as `{"error": "..."}`; fall back to the raw body
fn hub_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl RowFetcher for HubClient {
    #[instrument(skip(self))]
    async fn fetch_remote_rows(
        &self,
        name: &str,
        split: &str,
        max_rows: Option<usize>,
    ) -> Result<Vec<RawItem>> {
        let mut rows = Vec::new();

        loop {
            let wanted = match max_rows {
                Some(max) => max.saturating_sub(rows.len()),
                None => self.page_size,
            };
            if wanted == 0 {
                break;
            }

            let offset = rows.len();
            let length = wanted.min(self.page_size);
            let page = self.fetch_page(name, split, offset, length).await?;
            let received = page.rows.len();
            rows.extend(page.rows.into_iter().map(|r| r.row));

            debug!(offset, received, total = ?page.num_rows_total, "Fetched rows page");

            // Without a reported total, a short page marks the end of the split
            let exhausted = match page.num_rows_total {
                Some(total) => rows.len() >= total,
                None => received < length,
            };
            if received == 0 || exhausted {
                break;
            }
        }

        Ok(rows)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = HubClient::new("http://localhost:9999/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[test]
    fn test_page_size_is_clamped() {
        let client = HubClient::new(DEFAULT_HUB_URL).unwrap();
        assert_eq!(client.clone().with_page_size(0).page_size(), 1);
        assert_eq!(client.with_page_size(500).page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_hub_error_message() {
        assert_eq!(
            hub_error_message(r#"{"error": "The dataset does not exist."}"#),
            "The dataset does not exist."
        );
        assert_eq!(hub_error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_unreachable_hub_is_a_fetch_error() {
        let client = HubClient::new("http://127.0.0.1:9").unwrap();

        let err = client
            .fetch_remote_rows("acme/scans", "train", Some(1))
            .await
            .unwrap_err();

        assert!(matches!(err, BenchError::SourceFetch { .. }));
    }
}
