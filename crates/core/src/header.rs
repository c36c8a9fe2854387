//! Typed view over a post's front matter mapping.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_yaml::{Mapping, Value as YamlValue};

/// Header key holding the access level.
pub const ACCESS_LEVEL_KEY: &str = "access_level";
/// Header key holding the published flag.
pub const PUBLISHED_KEY: &str = "published";
/// Header key flagging a post for inclusion in the book.
pub const BOOK_CHAPTER_KEY: &str = "book_chapter";
/// Header key holding the post title.
pub const TITLE_KEY: &str = "title";
/// Header key holding the publish date.
pub const DATE_KEY: &str = "date";
/// Header key holding the post categories.
pub const CATEGORIES_KEY: &str = "categories";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Front matter of a post.
///
/// Wraps the raw mapping so unrelated fields survive a rewrite untouched and
/// in their original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    fields: Mapping,
}

impl Header {
    /// Creates an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the underlying mapping.
    pub fn as_mapping(&self) -> &Mapping {
        &self.fields
    }

    /// Looks up a raw field.
    pub fn get(&self, key: &str) -> Option<&YamlValue> {
        self.fields.get(key)
    }

    /// Returns true when the field is present, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns true when the field is present and not `null`.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_null())
    }

    /// Sets a field, keeping its position when it already exists.
    pub fn set(&mut self, key: &str, value: impl Into<YamlValue>) {
        self.fields.insert(YamlValue::from(key), value.into());
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the header has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Post title, when it is a string.
    pub fn title(&self) -> Option<&str> {
        self.get(TITLE_KEY).and_then(YamlValue::as_str)
    }

    /// Post title for display; numbers and booleans are written out as text.
    pub fn title_text(&self) -> Option<String> {
        self.get(TITLE_KEY).and_then(scalar_text)
    }

    /// Raw access level string, which may name an unknown level.
    pub fn access_level(&self) -> Option<&str> {
        self.get(ACCESS_LEVEL_KEY).and_then(YamlValue::as_str)
    }

    /// Access level field as written, whatever its type.
    ///
    /// `None` only when the key is absent. Non-string values come back in
    /// their textual form (`3`, `null`, `["premium"]`) so they never parse as
    /// a known level.
    pub fn access_level_text(&self) -> Option<String> {
        self.get(ACCESS_LEVEL_KEY).map(|value| {
            scalar_text(value).unwrap_or_else(|| {
                serde_json::to_string(value).unwrap_or_else(|_| "?".to_string())
            })
        })
    }

    /// Published flag, when it is a boolean.
    pub fn published(&self) -> Option<bool> {
        self.get(PUBLISHED_KEY).and_then(YamlValue::as_bool)
    }

    /// Book-chapter flag; anything but a literal `true` counts as unset.
    pub fn book_chapter(&self) -> bool {
        self.get(BOOK_CHAPTER_KEY)
            .and_then(YamlValue::as_bool)
            .unwrap_or(false)
    }

    /// Publish date parsed from the `date` field.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]`, ISO-8601 with or without
    /// an offset. Returns `None` for anything else.
    pub fn date(&self) -> Option<NaiveDateTime> {
        self.get(DATE_KEY).and_then(YamlValue::as_str).and_then(parse_date)
    }

    /// Categories flattened to a single display string.
    ///
    /// Sequences are joined with `", "`; nested sequences (hexo-style
    /// hierarchies) are flattened in order.
    pub fn category(&self) -> Option<String> {
        let value = self.get(CATEGORIES_KEY)?;
        let mut parts = Vec::new();
        collect_category_parts(value, &mut parts);
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

impl From<Mapping> for Header {
    fn from(fields: Mapping) -> Self {
        Self { fields }
    }
}

fn scalar_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn collect_category_parts(value: &YamlValue, parts: &mut Vec<String>) {
    match value {
        YamlValue::String(s) if !s.trim().is_empty() => parts.push(s.trim().to_string()),
        YamlValue::Number(n) => parts.push(n.to_string()),
        YamlValue::Sequence(items) => {
            for item in items {
                collect_category_parts(item, parts);
            }
        }
        _ => {}
    }
}

/// Parses a front matter date string.
///
/// # Examples
///
/// ```
/// use postbook_core::header::parse_date;
///
/// let date = parse_date("2024-01-05 12:30:00").unwrap();
/// assert_eq!(date.to_string(), "2024-01-05 12:30:00");
/// assert!(parse_date("yesterday").is_none());
/// ```
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
