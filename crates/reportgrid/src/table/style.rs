//! Style map: CSS-like properties keyed by style class.
//!
//! Keys are plain strings derived from a cell's position (see [`keys`]); the
//! HTML renderer uses the same key as element class and selector. Property
//! names are kept in a `BTreeMap`, so iteration is lexicographic and the
//! generated stylesheet is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single `name: value` CSS declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssProperty {
    pub name: String,
    pub value: String,
}

impl CssProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        CssProperty {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Property set for one style key, ordered by property name.
pub type Declarations = BTreeMap<String, String>;

/// Mapping from style key to its declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    entries: BTreeMap<String, Declarations>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets properties on `key`, overwriting properties of the same name.
    pub fn set<I>(&mut self, key: impl Into<String>, props: I)
    where
        I: IntoIterator<Item = CssProperty>,
    {
        let entry = self.entries.entry(key.into()).or_default();
        for prop in props {
            entry.insert(prop.name, prop.value);
        }
    }

    /// Returns the declarations for `key`, if any were registered.
    pub fn get(&self, key: &str) -> Option<&Declarations> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Copies every entry of `other` into this map; `other` wins on conflicts.
    pub fn merge(&mut self, other: &StyleMap) {
        for (key, decls) in &other.entries {
            let entry = self.entries.entry(key.clone()).or_default();
            for (name, value) in decls {
                entry.insert(name.clone(), value.clone());
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Declarations)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Declarations)> for StyleMap {
    fn from_iter<T: IntoIterator<Item = (String, Declarations)>>(iter: T) -> Self {
        StyleMap {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Deterministic style keys.
pub mod keys {
    pub const TITLE: &str = "title";
    pub const SECTION1: &str = "section1";
    pub const SECTION2: &str = "section2";
    pub const SECTION3: &str = "section3";
    pub const NO_HEADERS: &str = "no-headers";
    pub const NO_ROWS: &str = "no-rows";

    /// Key of the header cell of column `col`.
    pub fn header(col: usize) -> String {
        format!("header-col-{}", col)
    }

    /// Key of the body cell at (`row`, `col`).
    pub fn cell(row: usize, col: usize) -> String {
        format!("cell-row-{}-col-{}", row, col)
    }

    /// Key applied to every body cell of column `col`.
    pub fn column(col: usize) -> String {
        format!("col-{}", col)
    }

    /// Key of the `<tr>` of row `row`.
    pub fn row(row: usize) -> String {
        format!("row-{}", row)
    }

    /// Key of caption `n` (1..=3).
    pub fn section(n: usize) -> Option<&'static str> {
        match n {
            1 => Some(SECTION1),
            2 => Some(SECTION2),
            3 => Some(SECTION3),
            _ => None,
        }
    }
}
