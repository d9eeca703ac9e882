use crate::service::BoundingBox;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

/// Raw feature response for one layer, with the parameters that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureDocument {
    pub name: String,
    pub typename: String,
    pub bbox: BoundingBox,
    pub srs_name: String,
    #[serde(skip)]
    pub body: Vec<u8>,
}

impl FeatureDocument {
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Where resolved feature documents are recorded
pub trait QueryStore: Send + Sync {
    /// Store a document under its layer name, replacing any earlier one
    fn record(&self, document: FeatureDocument);

    fn get(&self, name: &str) -> Option<FeatureDocument>;

    /// Names queried so far, in the order they were first recorded
    fn names(&self) -> Vec<String>;
}

#[derive(Debug, Default)]
struct LogState {
    order: Vec<String>,
    documents: HashMap<String, FeatureDocument>,
}

/// In-memory query log shared by reference
#[derive(Debug, Default)]
pub struct QueryLog {
    state: Mutex<LogState>,
}

impl QueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.order.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueryStore for QueryLog {
    fn record(&self, document: FeatureDocument) {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !state.documents.contains_key(&document.name) {
            state.order.push(document.name.clone());
        }
        state.documents.insert(document.name.clone(), document);
    }

    fn get(&self, name: &str) -> Option<FeatureDocument> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.documents.get(name).cloned())
    }

    fn names(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.order.clone())
            .unwrap_or_default()
    }
}
