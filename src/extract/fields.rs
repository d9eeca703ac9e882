//! Named field extractors over an isolated block body
//!
//! Each extractor is independent: one field's pattern never consumes text another
//! field needs, and a miss yields `None` (or an empty member list) rather than an
//! error. Values end at the first closing quote or bracket as written by the
//! provider; a value that contains its own terminator is truncated there.

use super::classify::BlockKind;
use super::scan;
use regex::Regex;
use std::sync::OnceLock;

/// Fields recovered from a tile layer block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileFields {
    pub title: Option<String>,
    pub typename: Option<String>,
    pub xyz_url: Option<String>,
    pub max_zoom: Option<u32>,
}

/// Fields recovered from a group layer block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFields {
    pub title: Option<String>,
    pub typename: Option<String>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedFields {
    Tile(TileFields),
    Group(GroupFields),
}

// A quoted value closed by its own quote and followed by `,`, `}`, a line end or the
// end of the block. The trailing context is what separates `title: "A", x` from
// `title: "A" + b`. Inside single quotes an apostrophe followed by a word character
// (`'King's Map'`) is part of the value.
fn quoted_field_regex(key: &str, suffix: &str) -> Regex {
    let pattern = format!(
        r#"\b{key}\s*:\s*(?:"([^"\n]*{suffix})"|'((?:[^'\n]|'\w)*{suffix})')[ \t]*(?:,|\}}|\r?\n|\z)"#,
        key = key,
        suffix = suffix,
    );
    Regex::new(&pattern).expect("Invalid field regex")
}

fn title_regex() -> &'static Regex {
    static TITLE_REGEX: OnceLock<Regex> = OnceLock::new();
    TITLE_REGEX.get_or_init(|| quoted_field_regex("title", ""))
}

fn typename_regex() -> &'static Regex {
    static TYPENAME_REGEX: OnceLock<Regex> = OnceLock::new();
    TYPENAME_REGEX.get_or_init(|| quoted_field_regex("typename", ""))
}

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| quoted_field_regex("url", r"\.(?i:png|jpe?g)"))
}

fn max_zoom_regex() -> &'static Regex {
    static MAX_ZOOM_REGEX: OnceLock<Regex> = OnceLock::new();
    MAX_ZOOM_REGEX.get_or_init(|| Regex::new(r"\bmaxZ\s*:\s*(\d+)").expect("Invalid maxZ regex"))
}

fn xyz_source_regex() -> &'static Regex {
    static XYZ_SOURCE_REGEX: OnceLock<Regex> = OnceLock::new();
    XYZ_SOURCE_REGEX.get_or_init(|| {
        Regex::new(r"\bsource\s*:\s*new\s+ol\.source\.XYZ\s*\(\s*\{")
            .expect("Invalid XYZ source regex")
    })
}

fn layers_regex() -> &'static Regex {
    static LAYERS_REGEX: OnceLock<Regex> = OnceLock::new();
    LAYERS_REGEX
        .get_or_init(|| Regex::new(r"\blayers\s*:\s*\[").expect("Invalid layers regex"))
}

// An empty quoted value reads as absent, the same way an empty table cell loads.
fn first_quoted(re: &Regex, text: &str) -> Option<String> {
    let cap = re.captures(text)?;
    cap.get(1)
        .or_else(|| cap.get(2))
        .map(|m| m.as_str())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn extract_title(body: &str) -> Option<String> {
    first_quoted(title_regex(), body)
}

pub fn extract_typename(body: &str) -> Option<String> {
    first_quoted(typename_regex(), body)
}

/// XYZ URL template, which must end in an image extension
pub fn extract_url(scope: &str) -> Option<String> {
    first_quoted(url_regex(), scope)
}

pub fn extract_max_zoom(scope: &str) -> Option<u32> {
    max_zoom_regex()
        .captures(scope)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Contents of the `source: new ol.source.XYZ({ ... })` object, without its braces
pub fn xyz_source_block(body: &str) -> Option<&str> {
    let m = xyz_source_regex().find(body)?;
    let open = m.end() - 1;
    let close = scan::matching_close(body, open, b'{', b'}')?;
    Some(&body[open + 1..close])
}

/// Member identifiers of a `layers: [a, b, c]` list
///
/// A missing keyword or an unterminated list yields an empty list. Empty elements
/// (from a trailing comma) are dropped.
pub fn extract_members(body: &str) -> Vec<String> {
    let Some(m) = layers_regex().find(body) else {
        return Vec::new();
    };
    let open = m.end() - 1;
    let Some(close) = scan::matching_close(body, open, b'[', b']') else {
        return Vec::new();
    };

    body[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|member| !member.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn extract_tile_fields(body: &str) -> TileFields {
    let source = xyz_source_block(body);
    let scope = source.unwrap_or(body);

    // Some providers put the zoom limit on the layer rather than the source
    let max_zoom = extract_max_zoom(scope).or_else(|| {
        source.and_then(|_| extract_max_zoom(body))
    });

    TileFields {
        title: extract_title(body),
        typename: extract_typename(body),
        xyz_url: extract_url(scope),
        max_zoom,
    }
}

pub fn extract_group_fields(body: &str) -> GroupFields {
    GroupFields {
        title: extract_title(body),
        typename: extract_typename(body),
        members: extract_members(body),
    }
}

/// Run the extractors that apply to `kind`. Unclassified blocks yield nothing.
pub fn extract_fields(kind: BlockKind, body: &str) -> Option<ExtractedFields> {
    match kind {
        BlockKind::TileLayer => Some(ExtractedFields::Tile(extract_tile_fields(body))),
        BlockKind::GroupLayer => Some(ExtractedFields::Group(extract_group_fields(body))),
        BlockKind::Unclassified => None,
    }
}
