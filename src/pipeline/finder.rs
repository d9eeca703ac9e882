//! End-to-end retrieval: status page, live configuration, extraction, cleaning

use crate::dataset::Dataset;
use crate::error::Result;
use crate::extract::parse_configuration;
use crate::http::Fetcher;
use crate::service::{Catalogue, FeatureService};
use crate::source::SourceLocator;
use crate::validation::Validator;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info};

pub struct TileLayerFinder<F: Fetcher, S: FeatureService> {
    locator: SourceLocator<F>,
    service: S,
    catalogue: Mutex<Option<Catalogue>>,
}

impl<F: Fetcher, S: FeatureService> TileLayerFinder<F, S> {
    pub fn new(fetcher: F, status_url: impl Into<String>, service: S) -> Self {
        Self {
            locator: SourceLocator::new(fetcher, status_url),
            service,
            catalogue: Mutex::new(None),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn locate_source(&self) -> Result<String> {
        self.locator.locate()
    }

    /// Download the text of the current live configuration file
    pub fn fetch_configuration(&self) -> Result<String> {
        let url = self.locate_source()?;
        let text = self.locator.fetcher().fetch_text(&url)?;
        debug!(bytes = text.len(), "Fetched configuration");
        Ok(text)
    }

    /// The service catalogue, fetched on first use
    pub fn catalogue(&self) -> Result<Catalogue> {
        let mut cached = match self.catalogue.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(catalogue) = cached.as_ref() {
            return Ok(catalogue.clone());
        }
        let catalogue = self.service.catalogue()?;
        *cached = Some(catalogue.clone());
        Ok(catalogue)
    }

    /// Build the dataset from the live configuration, cleaning it if asked
    pub fn get_data(&self, clean: bool) -> Result<Dataset> {
        let start = Instant::now();
        let text = self.fetch_configuration()?;
        let dataset = parse_configuration(&text);

        info!("Tile dataset has {} values", dataset.tiles().len());
        info!("Group dataset has {} values", dataset.groups().len());

        let dataset = if clean {
            let catalogue = self.catalogue()?;
            let cleaned = Validator::new(&catalogue).clean(dataset);
            info!(
                "After cleaning: {} tile layers, {} group layers",
                cleaned.tiles().len(),
                cleaned.groups().len()
            );
            cleaned
        } else {
            dataset
        };

        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Dataset ready");
        Ok(dataset)
    }
}
