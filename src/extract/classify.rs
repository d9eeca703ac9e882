//! Tags raw blocks by constructor and blanks out comments

use super::blocks::RawBlock;
use super::scan;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

pub const TILE_LAYER_CONSTRUCTOR: &str = "ol.layer.Tile";
pub const GROUP_LAYER_CONSTRUCTOR: &str = "ol.layer.Group";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    TileLayer,
    GroupLayer,
    Unclassified,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::TileLayer => write!(f, "tile layer"),
            BlockKind::GroupLayer => write!(f, "group layer"),
            BlockKind::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// A block that survived classification, with its comments blanked to spaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedBlock {
    pub name: String,
    pub kind: BlockKind,
    pub body: String,
}

fn tile_regex() -> &'static Regex {
    static TILE_REGEX: OnceLock<Regex> = OnceLock::new();
    TILE_REGEX.get_or_init(|| Regex::new(r"new\s*ol\.layer\.Tile\(").expect("Invalid tile regex"))
}

fn group_regex() -> &'static Regex {
    static GROUP_REGEX: OnceLock<Regex> = OnceLock::new();
    GROUP_REGEX
        .get_or_init(|| Regex::new(r"new\s*ol\.layer\.Group\(").expect("Invalid group regex"))
}

fn outer_constructor_regex() -> &'static Regex {
    static OUTER_REGEX: OnceLock<Regex> = OnceLock::new();
    OUTER_REGEX.get_or_init(|| {
        Regex::new(r"^\s*new\s*([A-Za-z_$][\w$.]*)\s*\(").expect("Invalid constructor regex")
    })
}

/// Classify a block by the constructor it calls
///
/// The block's own (outermost) constructor decides. If the block does not start
/// with a recognised constructor, the first library constructor found anywhere in
/// the text is used, tile before group.
pub fn classify(text: &str) -> BlockKind {
    if let Some(path) = outer_constructor_regex()
        .captures(text)
        .and_then(|cap| cap.get(1))
    {
        match path.as_str() {
            TILE_LAYER_CONSTRUCTOR => return BlockKind::TileLayer,
            GROUP_LAYER_CONSTRUCTOR => return BlockKind::GroupLayer,
            _ => {}
        }
    }

    if tile_regex().is_match(text) {
        BlockKind::TileLayer
    } else if group_regex().is_match(text) {
        BlockKind::GroupLayer
    } else {
        BlockKind::Unclassified
    }
}

/// Classify every block, dropping the ones that are neither tile nor group layers
pub fn classify_blocks(blocks: Vec<RawBlock>) -> Vec<ClassifiedBlock> {
    blocks
        .into_iter()
        .filter_map(|block| {
            let kind = classify(&block.text);
            if kind == BlockKind::Unclassified {
                debug!(name = %block.name, "Unclassified block dropped");
                return None;
            }
            debug!(name = %block.name, %kind, "Classified block");
            Some(ClassifiedBlock {
                name: block.name,
                kind,
                body: scan::mask_comments(&block.text),
            })
        })
        .collect()
}
