//! Web Feature Service client over a [`Fetcher`]

use super::{parse_capabilities, Catalogue, FeatureRequest, FeatureService};
use crate::error::{FinderError, Result};
use crate::http::Fetcher;
use tracing::{debug, info};

pub struct WfsClient<F: Fetcher> {
    fetcher: F,
    url: String,
    version: String,
}

impl<F: Fetcher> WfsClient<F> {
    pub fn new(fetcher: F, url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
            version: version.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn capabilities_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("service", "WFS".to_string()),
            ("version", self.version.clone()),
            ("request", "GetCapabilities".to_string()),
        ]
    }

    fn feature_query(&self, request: &FeatureRequest) -> Vec<(&'static str, String)> {
        vec![
            ("service", "WFS".to_string()),
            ("version", self.version.clone()),
            ("request", "GetFeature".to_string()),
            ("typename", request.typename.clone()),
            ("bbox", request.bbox.to_query_value()),
            ("outputFormat", request.output_format.clone()),
            ("srsname", request.srs_name.clone()),
        ]
    }
}

impl<F: Fetcher> FeatureService for WfsClient<F> {
    fn catalogue(&self) -> Result<Catalogue> {
        let body = self
            .fetcher
            .fetch_bytes(&self.url, &self.capabilities_query())?;
        let xml = String::from_utf8(body).map_err(|e| FinderError::Capabilities(e.to_string()))?;

        let catalogue = parse_capabilities(&xml)?;
        info!(
            "Feature service at '{}' declares {} types",
            self.url,
            catalogue.len()
        );
        Ok(catalogue)
    }

    fn get_feature(&self, request: &FeatureRequest) -> Result<Vec<u8>> {
        debug!(typename = %request.typename, bbox = %request.bbox, "GetFeature");
        self.fetcher.fetch_bytes(&self.url, &self.feature_query(request))
    }
}
