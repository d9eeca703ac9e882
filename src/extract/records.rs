//! Record shapes and the pure builder that assembles them from extracted fields

use super::classify::ClassifiedBlock;
use super::fields::{extract_fields, ExtractedFields, GroupFields, TileFields};
use serde::{Deserialize, Serialize};

/// A single raster map layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayerRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xyz_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u32>,
}

/// A named collection of other layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLayerRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerRecord {
    Tile(TileLayerRecord),
    Group(GroupLayerRecord),
}

impl LayerRecord {
    pub fn name(&self) -> &str {
        match self {
            LayerRecord::Tile(t) => &t.name,
            LayerRecord::Group(g) => &g.name,
        }
    }
}

impl TileLayerRecord {
    pub fn from_fields(name: impl Into<String>, fields: TileFields) -> Self {
        Self {
            name: name.into(),
            title: fields.title,
            typename: fields.typename,
            xyz_url: fields.xyz_url,
            max_zoom: fields.max_zoom,
        }
    }
}

impl GroupLayerRecord {
    pub fn from_fields(name: impl Into<String>, fields: GroupFields) -> Self {
        Self {
            name: name.into(),
            title: fields.title,
            typename: fields.typename,
            members: fields.members,
        }
    }
}

/// Build the record matching the shape of `fields`
pub fn build_record(name: impl Into<String>, fields: ExtractedFields) -> LayerRecord {
    match fields {
        ExtractedFields::Tile(f) => LayerRecord::Tile(TileLayerRecord::from_fields(name, f)),
        ExtractedFields::Group(f) => LayerRecord::Group(GroupLayerRecord::from_fields(name, f)),
    }
}

/// Extract fields from each classified block and build its record, preserving order
pub fn build_records(blocks: &[ClassifiedBlock]) -> Vec<LayerRecord> {
    blocks
        .iter()
        .filter_map(|block| {
            extract_fields(block.kind, &block.body).map(|fields| build_record(&block.name, fields))
        })
        .collect()
}
