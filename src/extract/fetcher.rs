//! HTTP fetcher implementation
//!
//! This module handles the single page request the job makes:
//! - Building an HTTP client with the configured user agent and timeouts
//! - GET of the source page, mapping non-success statuses to errors
//! - The `PageSource` seam that lets tests substitute static markup

use crate::config::SourceConfig;
use crate::EtlError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Anything that can produce the raw markup for a URL
pub trait PageSource {
    /// Returns the body of the page at `url`
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, EtlError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The source configuration (user agent, timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &SourceConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body
///
/// No retries: a transport error or a non-2xx status aborts the run.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, EtlError> {
    let response = client.get(url).send().await.map_err(|source| EtlError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(EtlError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| EtlError::Http {
        url: url.to_string(),
        source,
    })?;

    tracing::debug!("Fetched {} ({} bytes)", url, body.len());
    Ok(body)
}

/// `PageSource` backed by a real HTTP client
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Creates a source from the `[source]` configuration section
    pub fn new(config: &SourceConfig) -> Result<Self, EtlError> {
        let client = build_http_client(config).map_err(|source| EtlError::Http {
            url: config.url.clone(),
            source,
        })?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, EtlError> {
        fetch_page(&self.client, url).await
    }
}
