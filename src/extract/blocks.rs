//! Splits the configuration script into named constructor blocks
//!
//! Grammar recognised (everything else is ignored):
//!
//! ```text
//! statement   := keyword identifier "=" constructor
//! keyword     := "var" | "let" | "const"
//! constructor := "new" path "(" balanced ")"
//! path        := identifier ("." identifier)*
//! ```
//!
//! The captured block is the text from `new` up to, but not including, the `)` that
//! closes the constructor call.

use super::scan;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

/// Raw text of one constructor call, keyed by the variable it is assigned to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub name: String,
    pub text: String,
}

fn declaration_regex() -> &'static Regex {
    static DECLARATION_REGEX: OnceLock<Regex> = OnceLock::new();
    DECLARATION_REGEX.get_or_init(|| {
        Regex::new(r"\b(?:var|let|const)\s+([A-Za-z_$][\w$]*)\s*=\s*new\b")
            .expect("Invalid declaration regex")
    })
}

fn constructor_regex() -> &'static Regex {
    static CONSTRUCTOR_REGEX: OnceLock<Regex> = OnceLock::new();
    CONSTRUCTOR_REGEX.get_or_init(|| {
        Regex::new(r"^\s*new\s+[A-Za-z_$][\w$]*(?:\s*\.\s*[A-Za-z_$][\w$]*)*\s*\(")
            .expect("Invalid constructor regex")
    })
}

/// Variable names assigned a `new` expression, in first-seen order without repeats
pub fn layer_variable_names(text: &str) -> Vec<String> {
    let masked = scan::mask_comments(text);
    let mut seen = HashSet::new();

    declaration_regex()
        .captures_iter(&masked)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Capture the constructor block assigned to `name`
///
/// Every `keyword name =` statement is tried in order and the first one whose
/// right-hand side is a complete constructor call wins.
pub fn capture_block(text: &str, name: &str) -> Option<String> {
    let masked = scan::mask_comments(text);
    capture_in_masked(text, &masked, name)
}

fn capture_in_masked(text: &str, masked: &str, name: &str) -> Option<String> {
    let pattern = format!(r"\b(?:var|let|const)\s+{}\b\s*=", regex::escape(name));
    let assignment = Regex::new(&pattern).ok()?;

    let found = assignment.find_iter(masked).find_map(|m| {
        let rhs = &masked[m.end()..];
        let ctor = constructor_regex().find(rhs)?;

        let start = m.end() + (ctor.as_str().len() - ctor.as_str().trim_start().len());
        let open = m.end() + ctor.end() - 1;
        let close = scan::matching_close(masked, open, b'(', b')')?;

        Some(text[start..close].to_string())
    });
    found
}

/// Split the whole script into raw blocks, one per resolvable layer variable
pub fn extract_blocks(text: &str) -> Vec<RawBlock> {
    let masked = scan::mask_comments(text);

    layer_variable_names(text)
        .into_iter()
        .filter_map(|name| match capture_in_masked(text, &masked, &name) {
            Some(block) => Some(RawBlock { name, text: block }),
            None => {
                debug!(name, "No resolvable constructor block; skipping");
                None
            }
        })
        .collect()
}
