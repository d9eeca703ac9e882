use crate::dataset::Dataset;
use crate::service::Catalogue;
use crate::validation::rules::{
    CatalogueTypenameRule, CleaningRule, MissingMembersRule, RawMapTypenameRule,
};
use tracing::{debug, info};

/// Applies cleaning rules in order, each to the output of the previous one
pub struct Validator<'a> {
    rules: Vec<Box<dyn CleaningRule + 'a>>,
}

impl<'a> Validator<'a> {
    /// The standard cleaning pass: member links, raw-map entries, then catalogue membership
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self {
            rules: vec![
                Box::new(MissingMembersRule),
                Box::new(RawMapTypenameRule::default()),
                Box::new(CatalogueTypenameRule::new(catalogue)),
            ],
        }
    }

    pub fn with_rules(rules: Vec<Box<dyn CleaningRule + 'a>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule in order. Each rule judges records against the dataset left by
    /// the rules before it, so the member check sees the tile layers as built: a group
    /// keeps a member that a later rule removes.
    pub fn clean(&self, dataset: Dataset) -> Dataset {
        let before = dataset.len();

        let cleaned = self.rules.iter().fold(dataset, |current, rule| {
            let snapshot = current.clone();
            let filtered = current.filter(
                |t| {
                    let keep = rule.retain_tile(t, &snapshot);
                    if !keep {
                        debug!(rule = rule.name(), name = %t.name, "Dropped tile layer");
                    }
                    keep
                },
                |g| {
                    let keep = rule.retain_group(g, &snapshot);
                    if !keep {
                        debug!(rule = rule.name(), name = %g.name, "Dropped group layer");
                    }
                    keep
                },
            );
            debug!(
                rule = rule.name(),
                removed = snapshot.len() - filtered.len(),
                "Cleaning rule applied"
            );
            filtered
        });

        info!(
            "Cleaning removed {} of {} records",
            before - cleaned.len(),
            before
        );
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{GroupLayerRecord, LayerRecord, TileLayerRecord};

    fn tile(name: &str, typename: Option<&str>) -> LayerRecord {
        LayerRecord::Tile(TileLayerRecord {
            name: name.to_string(),
            title: None,
            typename: typename.map(str::to_string),
            xyz_url: None,
            max_zoom: None,
        })
    }

    fn group(name: &str, typename: Option<&str>, members: &[&str]) -> LayerRecord {
        LayerRecord::Group(GroupLayerRecord {
            name: name.to_string(),
            title: None,
            typename: typename.map(str::to_string),
            members: members.iter().map(|m| m.to_string()).collect(),
        })
    }

    #[test]
    fn test_rule_order() {
        let catalogue = Catalogue::default();
        let validator = Validator::new(&catalogue);
        assert_eq!(
            validator.rule_names(),
            vec!["MissingMembers", "RawMapTypename", "CatalogueTypename"]
        );
    }

    #[test]
    fn test_clean_applies_all_rules() {
        let catalogue = Catalogue::from_typenames(["nls:a", "nls:g", "nls:WFS"]);
        let dataset = Dataset::from_records(vec![
            tile("a", Some("nls:a")),
            tile("raw", Some("nls:WFS")),
            tile("gone", Some("nls:gone")),
            tile("untyped", None),
            group("g", Some("nls:g"), &["a"]),
            group("broken", Some("nls:g"), &["a", "nope"]),
        ]);

        let cleaned = Validator::new(&catalogue).clean(dataset);
        assert_eq!(cleaned.tile_names(), vec!["a", "untyped"]);
        assert_eq!(cleaned.group_names(), vec!["g"]);
    }

    #[test]
    fn test_member_check_uses_tiles_before_later_rules() {
        // "raw" is removed by a later rule, but the group referencing it was
        // already judged against the full tile set.
        let catalogue = Catalogue::from_typenames(["nls:g"]);
        let dataset = Dataset::from_records(vec![
            tile("raw", Some("nls:WFS")),
            group("g", Some("nls:g"), &["raw"]),
        ]);

        let cleaned = Validator::new(&catalogue).clean(dataset);
        assert!(cleaned.tile_names().is_empty());
        assert_eq!(cleaned.group_names(), vec!["g"]);
    }

    #[test]
    fn test_surviving_records_are_unchanged() {
        let catalogue = Catalogue::from_typenames(["nls:a"]);
        let original = Dataset::from_records(vec![tile("a", Some("nls:a"))]);
        let cleaned = Validator::new(&catalogue).clean(original.clone());
        assert_eq!(cleaned, original);
    }
}
