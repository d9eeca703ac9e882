//! `reqwest`-backed fetcher

use super::Fetcher;
use crate::error::{FinderError, Result};
use std::time::Duration;
use tracing::debug;

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a fetcher. `timeout` of `None` leaves requests unbounded.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let builder = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout);

        let client = builder
            .build()
            .map_err(|e| FinderError::transport("<client>", e))?;

        Ok(Self { client })
    }

    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<reqwest::blocking::Response> {
        debug!(url, params = query.len(), "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| FinderError::transport(url, e))?;

        if !response.status().is_success() {
            return Err(FinderError::transport(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        Ok(response)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        self.get(url, &[])?
            .text()
            .map_err(|e| FinderError::transport(url, e))
    }

    fn fetch_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>> {
        let bytes = self
            .get(url, query)?
            .bytes()
            .map_err(|e| FinderError::transport(url, e))?;
        Ok(bytes.to_vec())
    }
}
