//! Parsing of WFS GetCapabilities documents into a [`Catalogue`]
//!
//! Handles the 1.1.0/2.0.0 layout (`ows:WGS84BoundingBox` with corner pairs) and the
//! 1.0.0 layout (`LatLongBoundingBox` attributes). Namespaces are ignored; elements
//! are matched by local name.

use super::{BoundingBox, Catalogue, CatalogueEntry};
use crate::error::{FinderError, Result};
use roxmltree::{Document, Node};

pub fn parse_capabilities(xml: &str) -> Result<Catalogue> {
    let doc = Document::parse(xml).map_err(|e| FinderError::Capabilities(e.to_string()))?;

    let root = doc.root_element();
    if matches!(
        root.tag_name().name(),
        "ExceptionReport" | "ServiceExceptionReport"
    ) {
        let message = root
            .descendants()
            .find(|n| matches!(n.tag_name().name(), "ExceptionText" | "ServiceException"))
            .and_then(|n| n.text())
            .unwrap_or("service returned an exception report")
            .trim()
            .to_string();
        return Err(FinderError::Capabilities(message));
    }

    let entries = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "FeatureType")
        .filter_map(parse_feature_type);

    Ok(Catalogue::new(entries))
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|c| c.tag_name().name() == name)
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn parse_feature_type(node: Node<'_, '_>) -> Option<CatalogueEntry> {
    let typename = child_text(node, "Name")?.to_string();
    let title = child_text(node, "Title").map(str::to_string);

    let wgs84_bbox = node
        .children()
        .find(|c| c.tag_name().name() == "WGS84BoundingBox")
        .and_then(parse_corner_bbox)
        .or_else(|| {
            node.children()
                .find(|c| c.tag_name().name() == "LatLongBoundingBox")
                .and_then(parse_attribute_bbox)
        });

    Some(CatalogueEntry {
        typename,
        title,
        wgs84_bbox,
    })
}

fn parse_pair(text: &str) -> Option<(f64, f64)> {
    let mut parts = text.split_whitespace().map(|p| p.parse::<f64>());
    match (parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y))) => Some((x, y)),
        _ => None,
    }
}

fn parse_corner_bbox(node: Node<'_, '_>) -> Option<BoundingBox> {
    let (min_x, min_y) = parse_pair(child_text(node, "LowerCorner")?)?;
    let (max_x, max_y) = parse_pair(child_text(node, "UpperCorner")?)?;
    Some(BoundingBox::wgs84(min_x, min_y, max_x, max_y))
}

fn parse_attribute_bbox(node: Node<'_, '_>) -> Option<BoundingBox> {
    let attr = |name: &str| node.attribute(name).and_then(|v| v.trim().parse::<f64>().ok());
    Some(BoundingBox::wgs84(
        attr("minx")?,
        attr("miny")?,
        attr("maxx")?,
        attr("maxy")?,
    ))
}
