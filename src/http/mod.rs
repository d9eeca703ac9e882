//! Blocking HTTP access behind a small trait so the pipeline can run against mocks

pub mod client;
pub mod mock;

pub use client::HttpFetcher;
pub use mock::MockFetcher;

use crate::error::Result;

/// A single blocking GET of a URL. Failures surface as `FinderError::Transport`.
pub trait Fetcher: Send + Sync {
    /// Fetch a document and decode it as text
    fn fetch_text(&self, url: &str) -> Result<String>;

    /// Fetch a document with query parameters, returning the raw body
    fn fetch_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>>;
}

impl<T: Fetcher + ?Sized> Fetcher for &T {
    fn fetch_text(&self, url: &str) -> Result<String> {
        (**self).fetch_text(url)
    }

    fn fetch_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>> {
        (**self).fetch_bytes(url, query)
    }
}
