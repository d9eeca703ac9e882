//! Per-layer metadata retrieval from the feature service

pub mod query_log;
pub mod resolver;

pub use query_log::{FeatureDocument, QueryLog, QueryStore};
pub use resolver::{MetadataRequest, MetadataResolver, DEFAULT_OUTPUT_FORMAT, DEFAULT_SRS_NAME};
