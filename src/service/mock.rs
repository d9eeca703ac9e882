use super::{Catalogue, FeatureRequest, FeatureService};
use crate::error::{FinderError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Feature service backed by a fixed catalogue and canned feature documents
pub struct MockFeatureService {
    catalogue: Catalogue,
    documents: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<FeatureRequest>>,
    catalogue_calls: Mutex<usize>,
}

impl MockFeatureService {
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            catalogue,
            documents: HashMap::new(),
            requests: Mutex::new(Vec::new()),
            catalogue_calls: Mutex::new(0),
        }
    }

    /// Serve `body` for GetFeature requests on `typename`
    pub fn with_document(mut self, typename: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(typename.into(), body.into());
        self
    }

    pub fn requests(&self) -> Vec<FeatureRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn catalogue_calls(&self) -> usize {
        *self.catalogue_calls.lock().unwrap()
    }
}

impl FeatureService for MockFeatureService {
    fn catalogue(&self) -> Result<Catalogue> {
        *self.catalogue_calls.lock().unwrap() += 1;
        Ok(self.catalogue.clone())
    }

    fn get_feature(&self, request: &FeatureRequest) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());
        self.documents
            .get(&request.typename)
            .cloned()
            .ok_or_else(|| FinderError::transport("mock://wfs", "no document registered"))
    }
}
