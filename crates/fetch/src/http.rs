//! HTTP access to the presentation data service.

use std::time::Duration;

use reqwest::blocking::Client;
use slides_core::{DownloadConfig, Error, Result};

/// Something that can fetch the body of a URL.
///
/// Implementations must fail on non-success responses instead of returning
/// the error body.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP client sending a fixed User-Agent header.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with the given User-Agent and request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create a client from the download configuration.
    pub fn from_config(config: &DownloadConfig) -> Result<Self> {
        Self::new(&config.user_agent, config.timeout)
    }
}

impl Fetch for HttpClient {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|e| Error::Http(e.to_string()))?;
        Ok(body.to_vec())
    }
}
