//! Output formatting for the `list`, `metadata` and `config` commands
//!
//! Every formatter renders JSON, YAML or human-readable text from the same data.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::FinderConfig;
use crate::extract::{GroupLayerRecord, TileLayerRecord};
use crate::metadata::FeatureDocument;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_tiles(&self, tiles: &[TileLayerRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(tiles, "tile layers"),
            OutputFormat::Yaml => to_yaml(tiles, "tile layers"),
            OutputFormat::Human => Ok(self.format_tiles_human(tiles)),
        }
    }

    pub fn format_groups(&self, groups: &[GroupLayerRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(groups, "group layers"),
            OutputFormat::Yaml => to_yaml(groups, "group layers"),
            OutputFormat::Human => Ok(self.format_groups_human(groups)),
        }
    }

    pub fn format_documents(&self, documents: &[FeatureDocument]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(documents, "metadata summary"),
            OutputFormat::Yaml => to_yaml(documents, "metadata summary"),
            OutputFormat::Human => Ok(self.format_documents_human(documents)),
        }
    }

    pub fn format_config(&self, config: &FinderConfig) -> Result<String> {
        let map = config.to_display_map();
        match self.format {
            OutputFormat::Json => to_json(&map, "configuration"),
            OutputFormat::Yaml => to_yaml(&map, "configuration"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_tiles_human(&self, tiles: &[TileLayerRecord]) -> String {
        let mut output = format!("Tile Layers ({})\n{}\n", tiles.len(), RULE);
        for tile in tiles {
            output.push_str(&format!("{}\n", tile.name));
            output.push_str(&format!(
                "\u{251C}\u{2500} Title:    {}\n",
                tile.title.as_deref().unwrap_or("-")
            ));
            output.push_str(&format!(
                "\u{251C}\u{2500} Typename: {}\n",
                tile.typename.as_deref().unwrap_or("-")
            ));
            output.push_str(&format!(
                "\u{251C}\u{2500} URL:      {}\n",
                tile.xyz_url.as_deref().unwrap_or("-")
            ));
            match tile.max_zoom {
                Some(z) => output.push_str(&format!("\u{2514}\u{2500} Max Z:    {}\n", z)),
                None => output.push_str("\u{2514}\u{2500} Max Z:    -\n"),
            }
        }
        output
    }

    fn format_groups_human(&self, groups: &[GroupLayerRecord]) -> String {
        let mut output = format!("Group Layers ({})\n{}\n", groups.len(), RULE);
        for group in groups {
            output.push_str(&format!("{}\n", group.name));
            output.push_str(&format!(
                "\u{251C}\u{2500} Title:    {}\n",
                group.title.as_deref().unwrap_or("-")
            ));
            output.push_str(&format!(
                "\u{251C}\u{2500} Typename: {}\n",
                group.typename.as_deref().unwrap_or("-")
            ));
            if group.members.is_empty() {
                output.push_str("\u{2514}\u{2500} Layers:   (none)\n");
            } else {
                output.push_str(&format!(
                    "\u{2514}\u{2500} Layers:   {}\n",
                    group.members.join(", ")
                ));
            }
        }
        output
    }

    fn format_documents_human(&self, documents: &[FeatureDocument]) -> String {
        let mut output = String::from("Queried layers:\n");
        for doc in documents {
            output.push_str(&format!(
                "  {} ({}, {} bytes, bbox {})\n",
                doc.name,
                doc.typename,
                doc.body.len(),
                doc.bbox
            ));
        }
        output
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::BoundingBox;

    fn tiles() -> Vec<TileLayerRecord> {
        vec![
            TileLayerRecord {
                name: "os_one_inch".to_string(),
                title: Some("OS One-Inch".to_string()),
                typename: Some("nls:one_inch".to_string()),
                xyz_url: Some("https://t/{z}/{x}/{y}.png".to_string()),
                max_zoom: Some(15),
            },
            TileLayerRecord {
                name: "bare".to_string(),
                title: None,
                typename: None,
                xyz_url: None,
                max_zoom: None,
            },
        ]
    }

    #[test]
    fn test_json_format() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_tiles(&tiles())
            .unwrap();
        let parsed: Vec<TileLayerRecord> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, tiles());
    }

    #[test]
    fn test_yaml_format() {
        let output = OutputFormatter::new(OutputFormat::Yaml)
            .format_tiles(&tiles())
            .unwrap();
        assert!(output.contains("os_one_inch"));
        let parsed: Vec<TileLayerRecord> = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_human_format() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_tiles(&tiles())
            .unwrap();
        assert!(output.starts_with("Tile Layers (2)"));
        assert!(output.contains("Typename: nls:one_inch"));
        assert!(output.contains("Max Z:    15"));
        assert!(output.contains("Max Z:    -"));
    }

    #[test]
    fn test_human_groups() {
        let groups = vec![GroupLayerRecord {
            name: "g".to_string(),
            title: None,
            typename: None,
            members: vec!["a".to_string(), "b".to_string()],
        }];
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_groups(&groups)
            .unwrap();
        assert!(output.contains("Layers:   a, b"));
    }

    #[test]
    fn test_documents_summary() {
        let docs = vec![FeatureDocument {
            name: "foo".to_string(),
            typename: "nls:foo".to_string(),
            bbox: BoundingBox::service_area(),
            srs_name: "EPSG:4326".to_string(),
            body: vec![b'x'; 10],
        }];
        let human = OutputFormatter::new(OutputFormat::Human)
            .format_documents(&docs)
            .unwrap();
        assert!(human.contains("foo (nls:foo, 10 bytes"));

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_documents(&docs)
            .unwrap();
        assert!(!json.contains("body"));
    }
}
