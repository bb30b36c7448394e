//! Typed cell values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The kind tag of a [`Cell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Unset,
    Integer,
    Float,
    String,
    Date,
    DateTime,
}

/// A single typed value within a row.
///
/// The variant decides how the value is formatted: numbers go through the
/// column's print mask, dates through the date format, strings are wrapped by
/// the text renderer and emitted verbatim elsewhere. An `Unset` cell renders
/// as blank space in fixed-width output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Unset,
    Integer(i64),
    Float(f64),
    #[serde(rename = "string")]
    Text(String),
    Date(NaiveDate),
    #[serde(rename = "datetime")]
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Returns the kind tag for this cell.
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Unset => CellKind::Unset,
            Cell::Integer(_) => CellKind::Integer,
            Cell::Float(_) => CellKind::Float,
            Cell::Text(_) => CellKind::String,
            Cell::Date(_) => CellKind::Date,
            Cell::DateTime(_) => CellKind::DateTime,
        }
    }

    /// Returns true for string cells, the only kind that wraps.
    pub fn is_text(&self) -> bool {
        matches!(self, Cell::Text(_))
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float payload, if any.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::Date(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::DateTime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        assert_eq!(Cell::default(), Cell::Unset);
        assert_eq!(Cell::default().kind(), CellKind::Unset);
    }

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(Cell::from(3_i64).kind(), CellKind::Integer);
        assert_eq!(Cell::from(1.5_f64).kind(), CellKind::Float);
        assert_eq!(Cell::from("x").kind(), CellKind::String);
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Cell::from(date).kind(), CellKind::Date);
        let dt = date.and_hms_opt(13, 5, 0).unwrap();
        assert_eq!(Cell::from(dt).kind(), CellKind::DateTime);
    }

    #[test]
    fn accessors() {
        assert_eq!(Cell::from("abc").as_str(), Some("abc"));
        assert_eq!(Cell::from(7_i64).as_int(), Some(7));
        assert_eq!(Cell::from(2.5_f64).as_float(), Some(2.5));
        assert_eq!(Cell::Unset.as_str(), None);
        assert!(Cell::from("s").is_text());
        assert!(!Cell::from(1_i64).is_text());
    }

    #[test]
    fn serde_tagging() {
        let json = serde_json::to_string(&Cell::Integer(5)).unwrap();
        assert_eq!(json, r#"{"kind":"integer","value":5}"#);
        let parsed: Cell = serde_json::from_str(r#"{"kind":"string","value":"hi"}"#).unwrap();
        assert_eq!(parsed, Cell::Text("hi".into()));
    }
}
