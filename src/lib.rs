//! tilefinder - discovery of the tile layers published by an online historical map viewer
//!
//! The map viewer publishes a status page naming its current live configuration script.
//! That script declares every raster tile layer and every group of layers as
//! `var name = new ol.layer.Tile({...})` style statements. This library locates the
//! script, extracts the layers into a [`Dataset`], optionally cleans the dataset against
//! the feature service catalogue, and retrieves per-layer feature metadata.
//!
//! # Core Concepts
//!
//! - **Tile layer**: a raster layer with a title, typename, XYZ URL template and
//!   maximum zoom level
//! - **Group layer**: a named collection of member layer names
//! - **Catalogue**: the feature types the feature service declares, used for cleaning
//!   and for bounding box defaults
//!
//! # Example Usage
//!
//! ```ignore
//! use tilefinder::{HttpFetcher, TileLayerFinder, WfsClient};
//!
//! let fetcher = HttpFetcher::new(None)?;
//! let service = WfsClient::new(&fetcher, "https://geoserver.nls.uk/geoserver/wfs", "1.1.0");
//! let finder = TileLayerFinder::new(&fetcher, "https://maps.nls.uk/geo/version", &service);
//!
//! let dataset = finder.get_data(true)?;
//! for tile in dataset.tiles() {
//!     println!("{}: {:?}", tile.name, tile.xyz_url);
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`source`]: locating the live configuration
//! - [`extract`]: block recognition and field extraction
//! - [`validation`]: cleaning rules
//! - [`service`] and [`metadata`]: the feature service and metadata resolution
//! - [`output`]: CSV tables and metadata documents

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod http;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod service;
pub mod source;
pub mod util;
pub mod validation;

// Re-export key types for convenient access
pub use config::{ConfigError, FinderConfig};
pub use dataset::Dataset;
pub use error::{FinderError, Result};
pub use extract::{parse_configuration, GroupLayerRecord, LayerRecord, TileLayerRecord};
pub use http::{Fetcher, HttpFetcher, MockFetcher};
pub use metadata::{FeatureDocument, MetadataRequest, MetadataResolver, QueryLog, QueryStore};
pub use pipeline::TileLayerFinder;
pub use service::{BoundingBox, Catalogue, FeatureService, MockFeatureService, WfsClient};
pub use source::SourceLocator;
pub use util::{init_logging, LoggingConfig};
pub use validation::Validator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
