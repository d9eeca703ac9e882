//! Shared fixtures for integration tests: a realistic configuration script and
//! mock collaborators wired to serve it.

#![allow(dead_code)]

use tilefinder::{BoundingBox, Catalogue, MockFeatureService, MockFetcher};
use tilefinder::service::CatalogueEntry;

pub const STATUS_URL: &str = "https://maps.example.org/geo/version";
pub const LIVE_URL: &str = "https://maps.example.org/geo/layers-2024-03.js";

/// Trimmed-down live configuration with the shapes seen in the wild: comments,
/// multi-line blocks, nested constructors, raw single-sheet layers and groups with
/// unresolved members.
pub const CONFIGURATION: &str = r#"
// Layer definitions, regenerated nightly
var map;
var attribution = new ol.control.Attribution({collapsible: true});

var oneinch2nd = new ol.layer.Tile({
    title: "Scotland, OS One-inch, 1885-1900",
    // typename: "nls:disabled",
    source: new ol.source.XYZ({
        attributions: [attribution],
        url: "https://mapseries-tilesets.s3.amazonaws.com/1inch_2nd_ed/{z}/{x}/{y}.png",
        minZ: 1,
        maxZ: 15
    }),
    typename: "nls:Scotland_1inch_2nd_ed",
    mosaic_id: '2',
    type: 'overlay'
});

var sixinch = new ol.layer.Tile({
    title: 'OS Six-inch, 1843-1882',
    source: new ol.source.XYZ({url: 'https://tiles.example.org/6inch/{z}/{x}/{y}.jpg', maxZ: 16}),
    typename: 'nls:six_inch',
});

/* var retired = new ol.layer.Tile({title: "Retired", typename: "nls:retired"}); */

var singlesheets = new ol.layer.Tile({
    title: "Single sheets",
    source: new ol.source.XYZ({url: "https://tiles.example.org/single/{z}/{x}/{y}.png", maxZ: 12}),
    typename: "nls:WFS"
});

var withdrawn = new ol.layer.Tile({
    title: "Withdrawn series",
    source: new ol.source.XYZ({url: "https://tiles.example.org/gone/{z}/{x}/{y}.png", maxZ: 10}),
    typename: "nls:withdrawn"
});

var untyped = new ol.layer.Tile({
    title: "Background",
    source: new ol.source.XYZ({url: "https://tiles.example.org/bg/{z}/{x}/{y}.png"})
});

var os_group = new ol.layer.Group({
    title: "OS maps",
    typename: "nls:os_group",
    layers: [ oneinch2nd ,sixinch,
        untyped ],
});

var broken_group = new ol.layer.Group({
    title: "Broken",
    typename: "nls:os_group",
    layers: [oneinch2nd, nonexistent],
});
"#;

pub fn status_page() -> String {
    format!(
        "<html><body><p>Version 7.2</p><p>Current live file: <a href=\"{}\">layers</a></p></body></html>",
        LIVE_URL
    )
}

pub fn fetcher() -> MockFetcher {
    MockFetcher::new()
        .with_response(STATUS_URL, status_page())
        .with_response(LIVE_URL, CONFIGURATION)
}

pub fn catalogue() -> Catalogue {
    Catalogue::new(vec![
        CatalogueEntry {
            typename: "nls:Scotland_1inch_2nd_ed".to_string(),
            title: Some("OS One-inch 2nd edition".to_string()),
            wgs84_bbox: Some(BoundingBox::wgs84(-8.65, 54.63, -0.73, 60.86)),
        },
        CatalogueEntry {
            typename: "nls:six_inch".to_string(),
            title: None,
            wgs84_bbox: None,
        },
        CatalogueEntry {
            typename: "nls:os_group".to_string(),
            title: None,
            wgs84_bbox: None,
        },
        CatalogueEntry {
            typename: "nls:WFS".to_string(),
            title: None,
            wgs84_bbox: None,
        },
    ])
}

pub fn feature_service() -> MockFeatureService {
    MockFeatureService::new(catalogue())
        .with_document(
            "nls:Scotland_1inch_2nd_ed",
            r#"{"type":"FeatureCollection","features":[]}"#,
        )
        .with_document("nls:six_inch", r#"{"type":"FeatureCollection","features":[{}]}"#)
}
