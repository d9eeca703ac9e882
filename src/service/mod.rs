//! The external feature service: its type catalogue and feature retrieval
//!
//! The pipeline only needs two things from the service: whether a typename exists
//! (with its declared bounding box, if any), and the raw feature document for a
//! typename. [`FeatureService`] is that seam; [`WfsClient`] talks to a real Web
//! Feature Service and [`MockFeatureService`] stands in for it in tests.

pub mod capabilities;
pub mod mock;
pub mod wfs;

pub use capabilities::parse_capabilities;
pub use mock::MockFeatureService;
pub use wfs::WfsClient;

use crate::error::{FinderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const WGS84_CRS: &str = "EPSG:4326";

/// Axis-aligned bounding box with the CRS its coordinates are expressed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub crs: String,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64, crs: impl Into<String>) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            crs: crs.into(),
        }
    }

    pub fn wgs84(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x, max_y, WGS84_CRS)
    }

    /// Covers Great Britain and its islands, the provider's whole service area
    pub fn service_area() -> Self {
        Self::wgs84(-9.26, 49.77, 2.73, 60.97)
    }

    /// `minx,miny,maxx,maxy,CRS`, as the service expects in a `bbox` parameter
    pub fn to_query_value(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.min_x, self.min_y, self.max_x, self.max_y, self.crs
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_value())
    }
}

impl FromStr for BoundingBox {
    type Err = FinderError;

    /// Parses `minx,miny,maxx,maxy` with an optional trailing CRS (default EPSG:4326)
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FinderError::InvalidBoundingBox(s.to_string());
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 && parts.len() != 5 {
            return Err(invalid());
        }

        let mut coords = [0f64; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| invalid())?;
        }
        if coords[0] > coords[2] || coords[1] > coords[3] {
            return Err(invalid());
        }

        let crs = match parts.get(4) {
            Some(crs) if !crs.is_empty() => crs.to_string(),
            Some(_) => return Err(invalid()),
            None => WGS84_CRS.to_string(),
        };

        Ok(Self::new(coords[0], coords[1], coords[2], coords[3], crs))
    }
}

/// One feature type advertised by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub typename: String,
    pub title: Option<String>,
    pub wgs84_bbox: Option<BoundingBox>,
}

/// The service's declared feature types
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
    index: HashMap<String, usize>,
}

impl Catalogue {
    pub fn new(entries: impl IntoIterator<Item = CatalogueEntry>) -> Self {
        let mut catalogue = Self::default();
        for entry in entries {
            if catalogue.index.contains_key(&entry.typename) {
                continue;
            }
            catalogue
                .index
                .insert(entry.typename.clone(), catalogue.entries.len());
            catalogue.entries.push(entry);
        }
        catalogue
    }

    /// Catalogue of bare typenames without titles or bounding boxes
    pub fn from_typenames<I, S>(typenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(typenames.into_iter().map(|t| CatalogueEntry {
            typename: t.into(),
            title: None,
            wgs84_bbox: None,
        }))
    }

    pub fn contains(&self, typename: &str) -> bool {
        self.index.contains_key(typename)
    }

    pub fn get(&self, typename: &str) -> Option<&CatalogueEntry> {
        self.index.get(typename).map(|&i| &self.entries[i])
    }

    pub fn bounding_box(&self, typename: &str) -> Option<&BoundingBox> {
        self.get(typename).and_then(|e| e.wgs84_bbox.as_ref())
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parameters of a single feature retrieval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRequest {
    pub typename: String,
    pub bbox: BoundingBox,
    pub srs_name: String,
    pub output_format: String,
}

pub trait FeatureService {
    /// Fetch the catalogue of feature types the service declares
    fn catalogue(&self) -> Result<Catalogue>;

    /// Retrieve the raw feature document for one request
    fn get_feature(&self, request: &FeatureRequest) -> Result<Vec<u8>>;
}

impl<T: FeatureService + ?Sized> FeatureService for &T {
    fn catalogue(&self) -> Result<Catalogue> {
        (**self).catalogue()
    }

    fn get_feature(&self, request: &FeatureRequest) -> Result<Vec<u8>> {
        (**self).get_feature(request)
    }
}
