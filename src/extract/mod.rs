// Extraction of layer records from the provider's configuration script
//
// Two phases: a block recognizer isolates each `var name = new Ctor(...)` statement,
// then independent field extractors read the isolated block text. Misses at any
// stage drop a block or leave a field empty; nothing here returns an error.

pub mod blocks;
pub mod classify;
pub mod fields;
pub mod records;
pub mod scan;

pub use blocks::{extract_blocks, RawBlock};
pub use classify::{classify, classify_blocks, BlockKind, ClassifiedBlock};
pub use fields::{extract_fields, ExtractedFields, GroupFields, TileFields};
pub use records::{build_record, build_records, GroupLayerRecord, LayerRecord, TileLayerRecord};

use crate::dataset::Dataset;
use tracing::debug;

/// Run the whole extraction over a configuration script
pub fn parse_configuration(text: &str) -> Dataset {
    let blocks = extract_blocks(text);
    debug!(blocks = blocks.len(), "Extracted constructor blocks");

    let classified = classify_blocks(blocks);
    Dataset::from_records(build_records(&classified))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_configuration_mixed_script() {
        let text = r#"
var map;
var view = new ol.View({center: [0, 0], zoom: 6});
var foo = new ol.layer.Tile({title: "Foo Layer", source: new ol.source.XYZ({url: "http://x/{z}/{x}/{y}.png", maxZ: 12}), typename: "nls:foo"});
var bar = new ol.layer.Group({title: "Bar Group", typename: "nls:bar", layers: [foo],});
"#;
        let dataset = parse_configuration(text);
        assert_eq!(dataset.tile_names(), vec!["foo"]);
        assert_eq!(dataset.group_names(), vec!["bar"]);
        assert_eq!(dataset.group("bar").unwrap().members, vec!["foo"]);
    }

    #[test]
    fn test_parse_empty_script() {
        assert!(parse_configuration("").is_empty());
    }
}
