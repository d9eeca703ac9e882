use crate::dataset::Dataset;
use crate::extract::{GroupLayerRecord, TileLayerRecord};
use crate::service::Catalogue;

/// Typename the service uses for single-sheet map entries rather than layers
pub const RAW_MAP_TYPENAME: &str = "nls:WFS";

/// One step of the cleaning pass. Rules only decide what to keep; they never
/// modify a record.
pub trait CleaningRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// `dataset` is the state before this rule runs
    fn retain_tile(&self, _tile: &TileLayerRecord, _dataset: &Dataset) -> bool {
        true
    }

    fn retain_group(&self, _group: &GroupLayerRecord, _dataset: &Dataset) -> bool {
        true
    }
}

/// Drops groups with a member that is not a tile layer
pub struct MissingMembersRule;

impl CleaningRule for MissingMembersRule {
    fn name(&self) -> &'static str {
        "MissingMembers"
    }

    fn retain_group(&self, group: &GroupLayerRecord, dataset: &Dataset) -> bool {
        group.members.iter().all(|m| dataset.contains_tile(m))
    }
}

/// Drops records typed as raw single maps
pub struct RawMapTypenameRule {
    sentinel: String,
}

impl RawMapTypenameRule {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    fn keeps(&self, typename: Option<&str>) -> bool {
        typename != Some(self.sentinel.as_str())
    }
}

impl Default for RawMapTypenameRule {
    fn default() -> Self {
        Self::new(RAW_MAP_TYPENAME)
    }
}

impl CleaningRule for RawMapTypenameRule {
    fn name(&self) -> &'static str {
        "RawMapTypename"
    }

    fn retain_tile(&self, tile: &TileLayerRecord, _dataset: &Dataset) -> bool {
        self.keeps(tile.typename.as_deref())
    }

    fn retain_group(&self, group: &GroupLayerRecord, _dataset: &Dataset) -> bool {
        self.keeps(group.typename.as_deref())
    }
}

/// Drops records whose typename the feature service does not declare.
/// Records without a typename are kept.
pub struct CatalogueTypenameRule<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> CatalogueTypenameRule<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    fn keeps(&self, typename: Option<&str>) -> bool {
        typename.map_or(true, |t| self.catalogue.contains(t))
    }
}

impl CleaningRule for CatalogueTypenameRule<'_> {
    fn name(&self) -> &'static str {
        "CatalogueTypename"
    }

    fn retain_tile(&self, tile: &TileLayerRecord, _dataset: &Dataset) -> bool {
        self.keeps(tile.typename.as_deref())
    }

    fn retain_group(&self, group: &GroupLayerRecord, _dataset: &Dataset) -> bool {
        self.keeps(group.typename.as_deref())
    }
}
