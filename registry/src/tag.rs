//! Struct tag parsing.
//!
//! Tags use the conventional `key:"value"` syntax, space separated:
//! `automap:"Foo" json:"foo,omitempty"`. Only the value under the registry's
//! tag key is interpreted; other keys are kept for lookup but ignored.

use regex_lite::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"([A-Za-z_][A-Za-z0-9_.\-]*):"((?:[^"\\]|\\.)*)""#).ok())
        .as_ref()
}

/// A parsed struct tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
    entries: Vec<(String, String)>,
}

impl StructTag {
    /// Parse a raw tag. Returns None if the tag is malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut entries = Vec::new();
        let mut last_end = 0;

        for caps in tag_pattern()?.captures_iter(raw) {
            let whole = caps.get(0)?;
            if !raw[last_end..whole.start()].trim().is_empty() {
                return None;
            }
            // Keys must be separated from the previous entry.
            if last_end > 0 && whole.start() == last_end {
                return None;
            }
            let key = caps.get(1)?.as_str().to_string();
            let value = unescape(caps.get(2)?.as_str());
            entries.push((key, value));
            last_end = whole.end();
        }

        if !raw[last_end..].trim().is_empty() {
            return None;
        }
        Some(Self { entries })
    }

    /// Get the value stored under `key`. The first occurrence wins.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Mapping directive under `key`, if any.
    pub fn directive(&self, key: &str) -> Option<Directive> {
        match self.lookup(key)? {
            "" => None,
            "-" => Some(Directive::Skip),
            name => Some(Directive::Rename(name.to_string())),
        }
    }
}

/// Per-field mapping directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Never read or write this field.
    Skip,
    /// Search the opposite side for this name instead of the declared one.
    Rename(String),
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
