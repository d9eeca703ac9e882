//! Locates the provider's currently live configuration file
//!
//! The provider publishes a small status page containing a line such as
//! `Current live file: <a href="https://.../layers.js">`. The URL in that anchor is the
//! only stable way to find the configuration, which is renamed on every release.

use crate::error::{FinderError, Result};
use crate::http::Fetcher;
use regex::Regex;
use std::sync::OnceLock;
use tracing::info;

fn live_file_regex() -> &'static Regex {
    static LIVE_FILE_REGEX: OnceLock<Regex> = OnceLock::new();
    LIVE_FILE_REGEX.get_or_init(|| {
        Regex::new(r#"Current live file:\s*<a\s+[^>]*?href\s*=\s*["']([^"']*)["']"#)
            .expect("Invalid live file regex")
    })
}

/// Extract the live configuration URL from the status document
pub fn extract_live_file_url(status_html: &str) -> Result<String> {
    live_file_regex()
        .captures(status_html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            FinderError::not_found_with(
                "live configuration file",
                "status page has no 'Current live file:' link",
            )
        })
}

pub struct SourceLocator<F: Fetcher> {
    fetcher: F,
    status_url: String,
}

impl<F: Fetcher> SourceLocator<F> {
    pub fn new(fetcher: F, status_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            status_url: status_url.into(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch the status page and return the URL of the current live file
    pub fn locate(&self) -> Result<String> {
        let html = self.fetcher.fetch_text(&self.status_url)?;
        let url = extract_live_file_url(&html)?;
        info!("Current file is: '{}'", url);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockFetcher;

    const STATUS_PAGE: &str = r#"<html><body>
<p>Previous file: <a href="https://maps.nls.uk/geo/scripts/old.js">old.js</a></p>
<p>Current live file: <a href="https://maps.nls.uk/geo/scripts/explore-layers.js">explore-layers.js</a></p>
</body></html>"#;

    #[test]
    fn test_extract_live_file_url() {
        assert_eq!(
            extract_live_file_url(STATUS_PAGE).unwrap(),
            "https://maps.nls.uk/geo/scripts/explore-layers.js"
        );
    }

    #[test]
    fn test_extract_ignores_other_links() {
        let html = r#"<a href="https://elsewhere/x.js">x</a> Current live file: <a href="https://a/b.js">b</a>"#;
        assert_eq!(extract_live_file_url(html).unwrap(), "https://a/b.js");
    }

    #[test]
    fn test_missing_phrase_is_not_found() {
        let err = extract_live_file_url("<html>maintenance</html>").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_locate_fetches_status_page() {
        let fetcher = MockFetcher::new().with_response("http://status/version", STATUS_PAGE);
        let locator = SourceLocator::new(&fetcher, "http://status/version");
        assert_eq!(
            locator.locate().unwrap(),
            "https://maps.nls.uk/geo/scripts/explore-layers.js"
        );
    }

    #[test]
    fn test_locate_propagates_transport_error() {
        let fetcher = MockFetcher::new();
        let locator = SourceLocator::new(&fetcher, "http://status/version");
        assert!(matches!(
            locator.locate(),
            Err(FinderError::Transport { .. })
        ));
    }
}
