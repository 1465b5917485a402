use crate::core::AssetLoader;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::validate_url;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Assets served over HTTP, e.g. the static `assets/` folder of the web UI.
#[derive(Debug, Clone)]
pub struct HttpAssets {
    base_url: Url,
    client: Client,
}

impl HttpAssets {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        validate_url("source.base_url", base_url)?;

        // 沒有結尾斜線時 Url::join 會取代最後一段路徑
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| CatalogError::invalid_value("source.base_url", &normalized, e.to_string()))?;

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| CatalogError::data_unavailable(path, e))
    }
}

impl AssetLoader for HttpAssets {
    async fn load(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url_for(path)?;
        tracing::debug!("Making asset request to: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("Asset response status: {}", status);

        if !status.is_success() {
            return Err(CatalogError::data_unavailable(
                url.as_str(),
                format!("HTTP status {}", status),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn describe(&self, path: &str) -> String {
        self.url_for(path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(HttpAssets::new("assets").is_err());
        assert!(HttpAssets::new("ftp://example.com/assets").is_err());
    }

    #[test]
    fn test_joins_paths_under_base() {
        let assets = HttpAssets::new("http://localhost:4200/assets").unwrap();
        assert_eq!(
            assets.describe("flows/patents.json"),
            "http://localhost:4200/assets/flows/patents.json"
        );
        assert_eq!(
            assets.describe("/domains.json"),
            "http://localhost:4200/assets/domains.json"
        );
    }

    #[tokio::test]
    async fn test_load_success_and_status_error() {
        let server = MockServer::start();
        let ok_mock = server.mock(|when, then| {
            when.method(GET).path("/assets/domains.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"[{"name":"Patents"}]"#);
        });
        let missing_mock = server.mock(|when, then| {
            when.method(GET).path("/assets/missing.json");
            then.status(404);
        });

        let assets = HttpAssets::new(&server.url("/assets")).unwrap();

        let data = assets.load("domains.json").await.unwrap();
        assert_eq!(data, br#"[{"name":"Patents"}]"#);
        ok_mock.assert();

        match assets.load("missing.json").await {
            Err(CatalogError::DataUnavailable { resource, reason }) => {
                assert!(resource.ends_with("/assets/missing.json"));
                assert!(reason.contains("404"));
            }
            other => panic!("expected DataUnavailable, got {:?}", other),
        }
        missing_mock.assert();
    }
}
