//! HTTP client for the repository's JSON:API

use crate::config::VerifyConfig;
use crate::error::{VerifyError, VerifyResult};
use idc_jsonapi::{Document, JSONAPI_PREFIX};
use reqwest::{header, Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Media type of JSON:API documents
pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Read-only JSON:API client for the repository under test
#[derive(Clone)]
pub struct JsonApiClient {
    client: Client,
    base_url: String,
}

impl JsonApiClient {
    /// Create a client for the configured repository
    pub fn new(config: &VerifyConfig) -> VerifyResult<Self> {
        let mut builder = Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| VerifyError::Transport {
            url: config.base_url.clone(),
            source: e,
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Get the repository base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON:API document, requiring a 200 response that decodes
    pub async fn get_document<A: DeserializeOwned>(&self, url: &Url) -> VerifyResult<Document<A>> {
        let body = self.get_ok(url).await?;
        Document::from_slice(&body).map_err(|e| VerifyError::Decode {
            url: url.to_string(),
            source: e,
        })
    }

    async fn get_ok(&self, url: &Url) -> VerifyResult<Vec<u8>> {
        debug!("Retrieving {}", url);
        let transport = |e| VerifyError::Transport {
            url: url.to_string(),
            source: e,
        };

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, JSONAPI_MEDIA_TYPE)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(VerifyError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }

    /// Check if the JSON:API root answers
    pub async fn is_healthy(&self) -> bool {
        let Ok(url) = Url::parse(&format!("{}/{}", self.base_url, JSONAPI_PREFIX)) else {
            return false;
        };
        self.get_ok(&url).await.is_ok()
    }

    /// Wait for the JSON:API root to answer
    pub async fn wait_for_healthy(&self, timeout: Duration) -> bool {
        let start = std::time::Instant::now();
        let check_interval = Duration::from_secs(2);

        while start.elapsed() < timeout {
            if self.is_healthy().await {
                return true;
            }
            tokio::time::sleep(check_interval).await;
        }

        false
    }
}
