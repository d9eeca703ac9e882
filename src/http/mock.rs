use super::Fetcher;
use crate::error::{FinderError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory fetcher keyed by URL. Unknown URLs fail as transport errors.
pub struct MockFetcher {
    responses: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.add_response(url, body);
        self
    }

    pub fn add_response(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.into(), body.into());
    }

    /// Every request made so far, with its query parameters
    pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.requests.lock().unwrap().clone()
    }

    fn lookup(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push((
            url.to_string(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));

        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FinderError::transport(url, "no mock response registered"))
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for MockFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let bytes = self.lookup(url, &[])?;
        String::from_utf8(bytes).map_err(|e| FinderError::transport(url, e))
    }

    fn fetch_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>> {
        self.lookup(url, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_response() {
        let fetcher = MockFetcher::new().with_response("http://x/a", "hello");
        assert_eq!(fetcher.fetch_text("http://x/a").unwrap(), "hello");
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[test]
    fn test_unknown_url_fails() {
        let fetcher = MockFetcher::new();
        let err = fetcher.fetch_text("http://x/missing").unwrap_err();
        assert!(matches!(err, FinderError::Transport { .. }));
    }

    #[test]
    fn test_query_parameters_recorded() {
        let fetcher = MockFetcher::new().with_response("http://x/wfs", vec![1u8, 2, 3]);
        let body = fetcher
            .fetch_bytes("http://x/wfs", &[("request", "GetFeature".to_string())])
            .unwrap();
        assert_eq!(body, vec![1, 2, 3]);
        let requests = fetcher.requests();
        assert_eq!(requests[0].1, vec![("request".to_string(), "GetFeature".to_string())]);
    }
}
