//! Resolves a layer name to its feature document
//!
//! The record is looked up in the dataset (tiles first), its typename checked against
//! the service catalogue, and a single GetFeature request issued. The bounding box is
//! the caller's if given, otherwise the catalogue's WGS84 box for the typename,
//! otherwise the whole service area.

use super::query_log::{FeatureDocument, QueryStore};
use crate::dataset::Dataset;
use crate::error::{FinderError, Result};
use crate::service::{BoundingBox, Catalogue, FeatureRequest, FeatureService};
use tracing::{debug, info};

pub const DEFAULT_SRS_NAME: &str = "urn:x-ogc:def:crs:EPSG:4326";
pub const DEFAULT_OUTPUT_FORMAT: &str = "json";

/// Caller overrides for a metadata query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRequest {
    pub bbox: Option<BoundingBox>,
    pub srs_name: Option<String>,
}

impl MetadataRequest {
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_srs_name(mut self, srs_name: impl Into<String>) -> Self {
        self.srs_name = Some(srs_name.into());
        self
    }
}

pub struct MetadataResolver<'a, S: FeatureService> {
    service: S,
    catalogue: &'a Catalogue,
    log: &'a dyn QueryStore,
}

impl<'a, S: FeatureService> MetadataResolver<'a, S> {
    pub fn new(service: S, catalogue: &'a Catalogue, log: &'a dyn QueryStore) -> Self {
        Self {
            service,
            catalogue,
            log,
        }
    }

    fn bounding_box_for(&self, typename: &str, request: &MetadataRequest) -> BoundingBox {
        if let Some(bbox) = &request.bbox {
            return bbox.clone();
        }
        match self.catalogue.bounding_box(typename) {
            Some(bbox) => bbox.clone(),
            None => {
                debug!(typename, "No declared bounding box, using service area");
                BoundingBox::service_area()
            }
        }
    }

    /// Query the feature service for `name` and record the response in the log
    pub fn resolve(
        &self,
        dataset: &Dataset,
        name: &str,
        request: &MetadataRequest,
    ) -> Result<FeatureDocument> {
        let record = dataset
            .lookup(name)
            .ok_or_else(|| FinderError::not_found(format!("Layer '{}'", name)))?;

        let typename = match record.typename() {
            Some(t) if self.catalogue.contains(t) => t,
            other => {
                return Err(FinderError::Unavailable {
                    name: name.to_string(),
                    typename: other.map(str::to_string),
                })
            }
        };

        let feature_request = FeatureRequest {
            typename: typename.to_string(),
            bbox: self.bounding_box_for(typename, request),
            srs_name: request
                .srs_name
                .clone()
                .unwrap_or_else(|| DEFAULT_SRS_NAME.to_string()),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        };

        let body = self.service.get_feature(&feature_request)?;
        info!(
            "Retrieved {} bytes of metadata for '{}' ({})",
            body.len(),
            name,
            typename
        );

        let document = FeatureDocument {
            name: name.to_string(),
            typename: feature_request.typename,
            bbox: feature_request.bbox,
            srs_name: feature_request.srs_name,
            body,
        };
        self.log.record(document.clone());
        Ok(document)
    }

    /// Resolve several names, stopping at the first failure
    pub fn resolve_all<'n>(
        &self,
        dataset: &Dataset,
        names: impl IntoIterator<Item = &'n str>,
        request: &MetadataRequest,
    ) -> Result<Vec<FeatureDocument>> {
        names
            .into_iter()
            .map(|name| self.resolve(dataset, name, request))
            .collect()
    }
}
