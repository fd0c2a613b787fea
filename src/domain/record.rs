//! The record abstraction shared by every list view.
//!
//! A [`Record`] is anything with a stable string id whose fields can be read
//! by key as a [`FieldValue`]. Table columns, the free-text filter and the
//! sort comparator all work through this trait, so the view layer never needs
//! to know which concrete entity it is showing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Synthetic column keys that do not correspond to a record field.
pub const SYNTHETIC_KEYS: &[&str] = &["select", "actions"];

/// A single cell value as seen by filtering and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Numeric value (prices, quantities, stock).
    Number(f64),
    /// Free text. ISO dates are carried as text and recognised on demand.
    Text(String),
    /// Field exists on the record type but has no value on this record.
    Empty,
}

impl FieldValue {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Wraps an optional string, mapping `None` to [`FieldValue::Empty`].
    #[must_use]
    pub fn optional(value: Option<&str>) -> Self {
        value.map_or(Self::Empty, Self::text)
    }

    /// Renders the value as plain text for matching and display.
    ///
    /// Whole numbers print without a fractional part.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{n:.0}"),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Empty => String::new(),
        }
    }

    /// Interprets a text value as an ISO-8601 date or timestamp.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive
    /// `YYYY-MM-DDTHH:MM:SS` timestamps. Date-only values map to midnight.
    ///
    /// ```
    /// use shopdash::domain::FieldValue;
    ///
    /// assert!(FieldValue::text("2024-01-15").as_date().is_some());
    /// assert!(FieldValue::text("2024-01-15T10:30:00Z").as_date().is_some());
    /// assert!(FieldValue::text("Blue Widget").as_date().is_none());
    /// ```
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        let Self::Text(raw) = self else {
            return None;
        };
        parse_iso_date(raw)
    }
}

/// Parses the ISO-8601 shapes used by the store.
#[must_use]
pub fn parse_iso_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Formats an ISO date for display ("Jan 15, 2024"), falling back to the raw text.
#[must_use]
pub fn display_date(raw: &str) -> String {
    parse_iso_date(raw).map_or_else(|| raw.to_string(), |d| d.format("%b %-d, %Y").to_string())
}

/// A row that can be shown, filtered and sorted by a data view.
pub trait Record: Clone + std::fmt::Debug {
    /// Every key [`Record::field`] understands. Used to validate column definitions.
    const FIELD_KEYS: &'static [&'static str];

    /// Stable unique identifier.
    fn id(&self) -> &str;

    /// Reads a field by key. Returns `None` for keys the type does not have.
    fn field(&self, key: &str) -> Option<FieldValue>;

    /// Whether `key` is a valid column key for this record type.
    fn has_key(key: &str) -> bool {
        Self::FIELD_KEYS.contains(&key) || SYNTHETIC_KEYS.contains(&key)
    }
}
