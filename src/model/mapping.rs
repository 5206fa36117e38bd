//! LDraw to BrickLink identifier mapping.
//!
//! A mapping document is a JSON object with two fields:
//!
//! ```json
//! {
//!     "colors": { "4": "5", "15": "1" },
//!     "parts": { "^3001$": "3001old", "p(\\d+)$": "pb\\1" }
//! }
//! ```
//!
//! Colors are translated by exact match. Parts are rewritten by every rule in
//! `parts`, in the order the document lists them, each rule substituting all
//! matches of its pattern in the result of the previous one.

use crate::error::MappingError;
use regex::Regex;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A regular expression substitution applied to part identifiers.
#[derive(Debug, Clone)]
pub struct PartRule {
    pattern: Regex,
    replacement: String,
}

impl PartRule {
    /// Compiles a rule. Backslash group references in `replacement`
    /// (`\1`, `\g<1>`, `\g<name>`) are accepted alongside `$1` style ones.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, MappingError> {
        let compiled = Regex::new(pattern).map_err(|source| MappingError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: compiled,
            replacement: translate_replacement(replacement),
        })
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Replaces every match of the pattern in `part`.
    #[must_use]
    pub fn apply<'a>(&self, part: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(part, self.replacement.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Mapping {
    colors: HashMap<String, String>,
    parts: Vec<PartRule>,
}

#[derive(Deserialize)]
struct MappingDocument {
    colors: HashMap<String, String>,
    #[serde(deserialize_with = "ordered_pairs")]
    parts: Vec<(String, String)>,
}

impl Mapping {
    #[must_use]
    pub fn new(colors: HashMap<String, String>, parts: Vec<PartRule>) -> Self {
        Self { colors, parts }
    }

    /// Loads a mapping document from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let content = std::fs::read_to_string(&path).map_err(|source| MappingError::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let mapping = Self::from_json(&content)?;
        debug!(
            colors = mapping.colors.len(),
            part_rules = mapping.parts.len(),
            "loaded mapping document"
        );
        Ok(mapping)
    }

    pub fn from_json(content: &str) -> Result<Self, MappingError> {
        let document: MappingDocument = serde_json::from_str(content)?;
        let parts = document
            .parts
            .iter()
            .map(|(pattern, replacement)| PartRule::new(pattern, replacement))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(document.colors, parts))
    }

    /// Returns the BrickLink color for an LDraw color, if one is mapped.
    #[must_use]
    pub fn color(&self, color: &str) -> Option<&str> {
        self.colors.get(color).map(String::as_str)
    }

    /// Applies every part rule in order. Parts no rule matches come back unchanged.
    #[must_use]
    pub fn part(&self, part: &str) -> String {
        self.parts
            .iter()
            .fold(part.to_string(), |current, rule| rule.apply(&current).into_owned())
    }

    #[must_use]
    pub fn part_rules(&self) -> &[PartRule] {
        &self.parts
    }
}

// serde_json hands object entries to the visitor in document order; collecting
// them straight into a Vec keeps that order.
fn ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object of pattern to replacement strings")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(pair) = map.next_entry::<String, String>()? {
                pairs.push(pair);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

/// Rewrites a backslash style replacement into `regex` replacement syntax.
fn translate_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut rest = replacement;
    while let Some(ch) = rest.chars().next() {
        rest = &rest[ch.len_utf8()..];
        match ch {
            '$' => out.push_str("$$"),
            '\\' => rest = translate_escape(rest, &mut out),
            _ => out.push(ch),
        }
    }
    out
}

/// Handles the text after a backslash and returns what is left unconsumed.
fn translate_escape<'a>(rest: &'a str, out: &mut String) -> &'a str {
    let digits = rest.bytes().take(2).take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        push_group(out, &rest[..digits]);
        return &rest[digits..];
    }
    if let Some(group) = rest.strip_prefix("g<") {
        if let Some(end) = group.find('>') {
            push_group(out, &group[..end]);
            return &group[end + 1..];
        }
    }
    match rest.as_bytes().first() {
        Some(b'\\') => out.push('\\'),
        Some(b'n') => out.push('\n'),
        Some(b't') => out.push('\t'),
        _ => {
            out.push('\\');
            return rest;
        }
    }
    &rest[1..]
}

fn push_group(out: &mut String, group: &str) {
    out.push_str("${");
    out.push_str(group);
    out.push('}');
}
