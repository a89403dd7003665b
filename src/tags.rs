//! Field tag parsing.
//!
//! Struct members may carry a tag string of space-separated `key:"value"`
//! pairs, one per dialect (`json:"name,omitempty" yaml:"-"`). Each value is
//! parsed into a [`FieldTag`]:
//! - `-` ignores the field for that dialect
//! - `alias` renames it
//! - `alias,opt,key=val` renames it and attaches options

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^ *([^\x00-\x20:"\x7f]+):"((?:[^"\\]|\\.)*)""#).expect("valid tag regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTag {
    pub ignore: bool,
    pub alias: String,
    /// Ordered `(key, value)` options; flag options have an empty value.
    pub options: Vec<(String, String)>,
}

impl FieldTag {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        let mut tag = FieldTag::default();
        if value == "-" {
            tag.ignore = true;
            return tag;
        }
        let (alias, rest) = match value.split_once(',') {
            Some((alias, rest)) => (alias, Some(rest)),
            None => (value, None),
        };
        tag.alias = alias.trim().to_string();
        for opt in rest.into_iter().flat_map(|r| r.split(',')) {
            let opt = opt.trim();
            if opt.is_empty() {
                continue;
            }
            let (k, v) = opt.split_once('=').unwrap_or((opt, ""));
            tag.options.push((k.trim().to_string(), v.trim().to_string()));
        }
        tag
    }

    pub fn is_empty(&self) -> bool {
        !self.ignore && self.alias.is_empty() && self.options.is_empty()
    }
}

/// Parse a raw tag string into per-dialect tags, in order of appearance.
/// Parsing stops at the first malformed pair; empty values are skipped.
pub fn parse_tags(raw: &str) -> IndexMap<String, FieldTag> {
    let mut out = IndexMap::new();
    let mut rest = raw;
    while let Some(caps) = TAG_PAIR.captures(rest) {
        let (Some(whole), Some(key), Some(value)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            break;
        };
        let tag = FieldTag::parse(&unescape(value.as_str()));
        if !tag.is_empty() {
            out.insert(key.as_str().to_string(), tag);
        }
        rest = &rest[whole.end()..];
    }
    out
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            },
            other => out.push(other),
        }
    }
    out
}
