use crate::analyzer::Fetcher;
use crate::error::AnalysisError;
use anyhow::Result;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use url::Url;

/// Common HTTP headers used for all requests
pub const USER_AGENT: &str = "SEO-Tag-Inspector/1.0";
const ACCEPT: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Creates a reqwest client with the inspector's headers and configuration
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static(ACCEPT_LANGUAGE),
    );

    let client = ClientBuilder::new()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;

    Ok(client)
}

/// Fetches pages over HTTP with a single attempt per request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, AnalysisError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| AnalysisError::Fetch {
                status: e.status().map(|s| s.as_u16()),
                message: format!("Failed to fetch website: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Fetch {
                status: Some(status.as_u16()),
                message: format!(
                    "Failed to fetch website: {}",
                    status.canonical_reason().unwrap_or("Unknown status")
                ),
            });
        }

        response.text().await.map_err(|e| AnalysisError::Fetch {
            status: None,
            message: format!("Failed to read website body: {}", e),
        })
    }
}
