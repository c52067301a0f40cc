//! Front-matter parsing for Markdown content documents.
//!
//! A content document optionally starts with a `---`-delimited metadata
//! block:
//!
//! ```text
//! ---
//! title: GhostRush
//! tech: [C++, Unreal Engine 5]
//! links:
//!   video: https://youtu.be/demo
//! ---
//! # Overview
//! ...
//! ```
//!
//! Parsing is best-effort and total: it never fails, never panics, and never
//! returns an error for any input. Malformed lines are skipped, malformed
//! list literals stay plain strings, and a missing delimiter pair means the
//! whole input is body text. The input is trusted, author-controlled content;
//! there is deliberately no strict mode.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A metadata value: plain string, list, or one level of nested mapping.
///
/// Values that fail richer interpretation always degrade to [`MetaValue::Scalar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// A plain string value.
    Scalar(String),
    /// A bracketed list value, e.g. `tech: [C++, Unreal]`.
    List(Vec<String>),
    /// A one-level nested mapping collected from indented sub-keys.
    Map(BTreeMap<String, String>),
}

impl MetaValue {
    /// Get the scalar string value, if this is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Get the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the nested mapping, if this is a map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            MetaValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Parsed metadata block: unique keys in source order.
///
/// Re-inserting an existing key replaces its value in place, so iteration
/// order always reflects first appearance in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, MetaValue)>,
}

impl FrontMatter {
    /// Create an empty front-matter block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of metadata keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the block has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a scalar value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_str)
    }

    /// Look up a list value by key.
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(MetaValue::as_list)
    }

    /// Look up a nested mapping by key.
    pub fn get_map(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        self.get(key).and_then(MetaValue::as_map)
    }

    /// Iterate entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert a value, replacing any existing entry for the key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl Serialize for FrontMatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A document split into metadata and body text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedDocument {
    /// Metadata from the delimited header, empty when no header was found.
    pub meta: FrontMatter,
    /// Body text following the header (or the whole input without one).
    pub body: String,
}

/// Parse a content document into front matter and body.
///
/// Never fails: if the input does not start with a `---` line, or the closing
/// delimiter is missing, the entire input becomes the body and `meta` is
/// empty.
///
/// # Example
///
/// ```
/// let doc = cvpress::content::parse("---\ntitle: Foo\n---\nBody");
/// assert_eq!(doc.meta.get_str("title"), Some("Foo"));
/// assert_eq!(doc.body, "Body");
/// ```
pub fn parse(raw: &str) -> ParsedDocument {
    match split_header(raw) {
        Some((header, body)) => ParsedDocument {
            meta: parse_header(header),
            body: body.to_string(),
        },
        None => ParsedDocument {
            meta: FrontMatter::new(),
            body: raw.to_string(),
        },
    }
}

/// Split off the `---`-delimited header, returning `(header, body)`.
///
/// The opening line must be exactly `---` (a trailing `\r` is tolerated) and
/// a matching closing line must exist.
fn split_header(raw: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    let mut lines = raw.split_inclusive('\n');

    let first = lines.next()?;
    if !is_delimiter(first) {
        return None;
    }
    offset += first.len();
    let header_start = offset;

    for line in lines {
        if is_delimiter(line) {
            let body_start = offset + line.len();
            return Some((&raw[header_start..offset], &raw[body_start..]));
        }
        offset += line.len();
    }
    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == "---"
}

/// Parse the metadata lines between the delimiters.
fn parse_header(header: &str) -> FrontMatter {
    let mut meta = FrontMatter::new();
    let mut lines = header.lines().peekable();

    while let Some(line) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();

        if value.is_empty() {
            meta.insert(key, MetaValue::Map(collect_nested(&mut lines)));
        } else {
            meta.insert(key, coerce_scalar(value));
        }
    }

    log::debug!("parsed front matter: {} keys", meta.len());
    meta
}

/// Collect an indented `key: value` block into a flat mapping.
///
/// Ends at the first non-indented, non-blank line, which is left unconsumed.
fn collect_nested<'a, I>(lines: &mut std::iter::Peekable<I>) -> BTreeMap<String, String>
where
    I: Iterator<Item = &'a str>,
{
    let mut map = BTreeMap::new();
    while let Some(&line) = lines.peek() {
        if !line.trim().is_empty() && !is_indented(line) {
            break;
        }
        lines.next();
        if line.trim().is_empty() {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                map.insert(key.to_string(), value.trim().to_string());
            }
        }
    }
    map
}

fn is_indented(line: &str) -> bool {
    line.starts_with("  ")
}

/// Interpret a scalar value, attempting list coercion for bracketed input.
fn coerce_scalar(value: &str) -> MetaValue {
    if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
        return MetaValue::List(parse_list(value));
    }
    MetaValue::Scalar(value.to_string())
}

/// Parse a bracketed list: strict JSON first, then a lenient comma split.
///
/// `[C++, Unreal]` is not valid JSON but is still a two-item list; only an
/// unterminated bracket keeps a value scalar (handled by the caller).
fn parse_list(value: &str) -> Vec<String> {
    if let Ok(items) = serde_json::from_str::<Vec<serde_json::Value>>(value) {
        return items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect();
    }

    log::debug!("list literal is not JSON, splitting on commas: {value}");
    value[1..value.len() - 1]
        .split(',')
        .map(|item| item.trim().trim_matches(['"', '\'']).to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_front_matter() {
        let doc = parse("Just some text\nwith lines");
        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, "Just some text\nwith lines");
    }

    #[test]
    fn test_delimiter_must_open_document() {
        let doc = parse("intro\n---\ntitle: Foo\n---\nbody");
        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, "intro\n---\ntitle: Foo\n---\nbody");
    }

    #[test]
    fn test_unclosed_header_is_body() {
        let input = "---\ntitle: Foo\nno closing line";
        let doc = parse(input);
        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, input);
    }

    #[test]
    fn test_simple_metadata() {
        let doc = parse("---\ntitle: Foo\nyear: 2024\n---\nBody text");
        assert_eq!(doc.meta.get_str("title"), Some("Foo"));
        assert_eq!(doc.meta.get_str("year"), Some("2024"));
        assert_eq!(doc.body, "Body text");
    }

    #[test]
    fn test_crlf_input() {
        let doc = parse("---\r\ntitle: Foo\r\n---\r\nBody");
        assert_eq!(doc.meta.get_str("title"), Some("Foo"));
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_value_with_colons() {
        let doc = parse("---\nvideo: https://youtu.be/demo\n---\n");
        assert_eq!(doc.meta.get_str("video"), Some("https://youtu.be/demo"));
    }

    #[test]
    fn test_lenient_list() {
        let doc = parse("---\ntech: [C++, Unreal]\n---\n");
        assert_eq!(
            doc.meta.get_list("tech"),
            Some(&["C++".to_string(), "Unreal".to_string()][..])
        );
    }

    #[test]
    fn test_json_list() {
        let doc = parse("---\ntech: [\"C++\", \"GAS\", 5]\n---\n");
        assert_eq!(
            doc.meta.get_list("tech"),
            Some(&["C++".to_string(), "GAS".to_string(), "5".to_string()][..])
        );
    }

    #[test]
    fn test_unterminated_list_stays_scalar() {
        let doc = parse("---\ntech: [C++, Unreal\n---\n");
        assert_eq!(doc.meta.get_str("tech"), Some("[C++, Unreal"));
    }

    #[test]
    fn test_nested_block() {
        let doc = parse("---\nlinks:\n  video: http://x\n  github: http://y\n---\n");
        let links = doc.meta.get_map("links").expect("nested map");
        assert_eq!(links.get("video").map(String::as_str), Some("http://x"));
        assert_eq!(links.get("github").map(String::as_str), Some("http://y"));
    }

    #[test]
    fn test_nested_block_ends_at_unindented_line() {
        let doc = parse("---\nlinks:\n  video: http://x\nrole: Dev\n---\n");
        assert_eq!(doc.meta.get_map("links").map(BTreeMap::len), Some(1));
        assert_eq!(doc.meta.get_str("role"), Some("Dev"));
    }

    #[test]
    fn test_empty_nested_block() {
        let doc = parse("---\nlinks:\nrole: Dev\n---\n");
        assert_eq!(doc.meta.get_map("links").map(BTreeMap::len), Some(0));
        assert_eq!(doc.meta.get_str("role"), Some("Dev"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let doc = parse("---\n???\ntitle: Foo\n: nothing\n\n---\nbody");
        assert_eq!(doc.meta.len(), 1);
        assert_eq!(doc.meta.get_str("title"), Some("Foo"));
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let doc = parse("---\na: 1\nb: 2\na: 3\n---\n");
        let keys: Vec<&str> = doc.meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(doc.meta.get_str("a"), Some("3"));
    }

    #[test]
    fn test_meta_serializes_as_map() {
        let doc = parse("---\ntitle: Foo\ntech: [a, b]\n---\n");
        let json = serde_json::to_string(&doc.meta).unwrap();
        assert_eq!(json, r#"{"title":"Foo","tech":["a","b"]}"#);
    }
}
