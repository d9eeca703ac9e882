//! The ordered collection of tile and group layer records

use crate::extract::{GroupLayerRecord, LayerRecord, TileLayerRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Tile and group layers keyed by name, in first-seen order
///
/// Names are unique within each collection; a later record with an existing name is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    tiles: Vec<TileLayerRecord>,
    groups: Vec<GroupLayerRecord>,
}

/// A record borrowed from either collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef<'a> {
    Tile(&'a TileLayerRecord),
    Group(&'a GroupLayerRecord),
}

impl<'a> RecordRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            RecordRef::Tile(t) => &t.name,
            RecordRef::Group(g) => &g.name,
        }
    }

    pub fn typename(&self) -> Option<&'a str> {
        match self {
            RecordRef::Tile(t) => t.typename.as_deref(),
            RecordRef::Group(g) => g.typename.as_deref(),
        }
    }
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = LayerRecord>) -> Self {
        let mut dataset = Self::new();
        for record in records {
            let name = record.name().to_string();
            let inserted = match record {
                LayerRecord::Tile(t) => dataset.insert_tile(t),
                LayerRecord::Group(g) => dataset.insert_group(g),
            };
            if !inserted {
                debug!(name, "Duplicate layer name ignored");
            }
        }
        dataset
    }

    /// Insert a tile layer unless one with the same name exists. Returns whether it was added.
    pub fn insert_tile(&mut self, record: TileLayerRecord) -> bool {
        if self.contains_tile(&record.name) {
            return false;
        }
        self.tiles.push(record);
        true
    }

    /// Insert a group layer unless one with the same name exists. Returns whether it was added.
    pub fn insert_group(&mut self, record: GroupLayerRecord) -> bool {
        if self.contains_group(&record.name) {
            return false;
        }
        self.groups.push(record);
        true
    }

    pub fn tiles(&self) -> &[TileLayerRecord] {
        &self.tiles
    }

    pub fn groups(&self) -> &[GroupLayerRecord] {
        &self.groups
    }

    pub fn tile(&self, name: &str) -> Option<&TileLayerRecord> {
        self.tiles.iter().find(|t| t.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&GroupLayerRecord> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn contains_tile(&self, name: &str) -> bool {
        self.tile(name).is_some()
    }

    pub fn contains_group(&self, name: &str) -> bool {
        self.group(name).is_some()
    }

    /// Look a name up in the tile layers first, then the group layers
    pub fn lookup(&self, name: &str) -> Option<RecordRef<'_>> {
        self.tile(name)
            .map(RecordRef::Tile)
            .or_else(|| self.group(name).map(RecordRef::Group))
    }

    pub fn tile_names(&self) -> Vec<&str> {
        self.tiles.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tiles.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.groups.is_empty()
    }

    /// Keep only the records the predicates accept; order is preserved
    pub fn filter<T, G>(self, mut keep_tile: T, mut keep_group: G) -> Self
    where
        T: FnMut(&TileLayerRecord) -> bool,
        G: FnMut(&GroupLayerRecord) -> bool,
    {
        Self {
            tiles: self.tiles.into_iter().filter(|t| keep_tile(t)).collect(),
            groups: self.groups.into_iter().filter(|g| keep_group(g)).collect(),
        }
    }

    /// Tile layer names reachable from a group, following nested groups
    ///
    /// Members that name neither a tile nor a group are skipped, as are cycles.
    /// Returns `None` if `group` is not a group layer.
    pub fn resolve_members(&self, group: &str) -> Option<Vec<String>> {
        let root = self.group(group)?;
        let mut visited = HashSet::new();
        let mut resolved = Vec::new();
        visited.insert(root.name.as_str());
        self.collect_members(root, &mut visited, &mut resolved);
        Some(resolved)
    }

    fn collect_members<'a>(
        &'a self,
        group: &'a GroupLayerRecord,
        visited: &mut HashSet<&'a str>,
        resolved: &mut Vec<String>,
    ) {
        for member in &group.members {
            if self.contains_tile(member) {
                if !resolved.contains(member) {
                    resolved.push(member.clone());
                }
            } else if let Some(nested) = self.group(member) {
                if visited.insert(nested.name.as_str()) {
                    self.collect_members(nested, visited, resolved);
                }
            }
        }
    }
}
