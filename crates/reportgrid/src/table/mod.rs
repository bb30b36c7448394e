//! The table data model.
//!
//! A [`Table`] is built once and rendered any number of times:
//!
//! 1. columns are added with [`Table::add_column`];
//! 2. rows are appended with [`Table::add_row`] (all cells unset) or
//!    [`Table::push_row`] (cells supplied), after which the column set is frozen;
//! 3. cells are filled through the typed `put_*` setters, addressing rows with
//!    a [`RowRef`] so that "the last row" can be written without tracking
//!    indices.
//!
//! Renderers only borrow the table. Structural problems (no columns, no rows)
//! are reported by [`Table::has_headers`] and [`Table::has_data`] and turned
//! into in-band diagnostics by each renderer.
//!
//! ```rust
//! use reportgrid::{ColumnDefinition, RowRef, Table};
//!
//! let mut table = Table::new();
//! table.add_column(ColumnDefinition::new("Item", 10)).unwrap();
//! table.add_column(ColumnDefinition::new("Qty", 5).right()).unwrap();
//! table.add_row();
//! table.put_str(RowRef::Last, 0, "Widget").unwrap();
//! table.put_int(RowRef::Last, 1, 3).unwrap();
//!
//! assert_eq!(table.row_count(), 1);
//! assert_eq!(table.get(0, 1).and_then(|c| c.as_int()), Some(3));
//! ```

mod cell;
mod column;
mod style;

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::format::{validate_date_format, validate_datetime_format, FormatContext, Layout};

pub use cell::{Cell, CellKind};
pub use column::{ColumnDefinition, Justify};
pub use style::{keys, CssProperty, Declarations, StyleMap};

/// Default strftime format for date cells.
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";
/// Default strftime format for date-time cells.
pub const DEFAULT_DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Addresses a row: an explicit index or the most recently appended row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowRef {
    Last,
    Index(usize),
}

impl From<usize> for RowRef {
    fn from(index: usize) -> Self {
        RowRef::Index(index)
    }
}

/// One row of cells, always as long as the column list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Typed rows under column definitions, with captions, separator rules and
/// a style map.
///
/// Deserialization goes through the same checks as the builder methods, so a
/// loaded table always satisfies the row/column invariant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableData")]
pub struct Table {
    title: Option<String>,
    sections: [Option<String>; 3],
    columns: Vec<ColumnDefinition>,
    rows: Vec<Row>,
    line_before: BTreeSet<usize>,
    line_after: BTreeSet<usize>,
    styles: StyleMap,
    date_format: String,
    datetime_format: String,
}

impl Default for Table {
    fn default() -> Self {
        Table {
            title: None,
            sections: [None, None, None],
            columns: Vec::new(),
            rows: Vec::new(),
            line_before: BTreeSet::new(),
            line_after: BTreeSet::new(),
            styles: StyleMap::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    // --- captions ---

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Sets section caption `n` (1, 2 or 3).
    pub fn set_section(&mut self, n: usize, text: impl Into<String>) -> Result<(), TableError> {
        let slot = n
            .checked_sub(1)
            .and_then(|i| self.sections.get_mut(i))
            .ok_or(TableError::SectionOutOfRange(n))?;
        *slot = Some(text.into());
        Ok(())
    }

    pub fn section(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.sections.get(i))
            .and_then(|s| s.as_deref())
    }

    /// Captions in display order with their style keys: title, then sections.
    pub fn captions(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(title) = self.title() {
            out.push((keys::TITLE, title));
        }
        for n in 1..=3 {
            if let (Some(key), Some(text)) = (keys::section(n), self.section(n)) {
                out.push((key, text));
            }
        }
        out
    }

    // --- structure ---

    /// Appends a column. Rejected once any row exists.
    pub fn add_column(&mut self, column: ColumnDefinition) -> Result<(), TableError> {
        if column.width == 0 {
            return Err(TableError::ZeroWidth {
                title: column.title,
            });
        }
        if !self.rows.is_empty() {
            return Err(TableError::ColumnsFrozen {
                title: column.title,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Appends a row of unset cells and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(Row {
            cells: vec![Cell::Unset; self.columns.len()],
        });
        self.rows.len() - 1
    }

    /// Appends a row with the given cells; the count must match the columns.
    pub fn push_row(&mut self, cells: Vec<Cell>) -> Result<usize, TableError> {
        if cells.len() != self.columns.len() {
            return Err(TableError::CellCountMismatch {
                expected: self.columns.len(),
                found: cells.len(),
            });
        }
        self.rows.push(Row { cells });
        Ok(self.rows.len() - 1)
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Fails with [`TableError::NoHeaders`] when no column exists.
    pub fn has_headers(&self) -> Result<(), TableError> {
        if self.columns.is_empty() {
            return Err(TableError::NoHeaders);
        }
        Ok(())
    }

    /// Fails with [`TableError::NoData`] when no row exists.
    pub fn has_data(&self) -> Result<(), TableError> {
        if self.rows.is_empty() {
            return Err(TableError::NoData);
        }
        Ok(())
    }

    /// Turns a [`RowRef`] into a concrete index.
    pub fn resolve_row(&self, row: RowRef) -> Result<usize, TableError> {
        match row {
            RowRef::Last => self.rows.len().checked_sub(1).ok_or(TableError::NoLastRow),
            RowRef::Index(i) if i < self.rows.len() => Ok(i),
            RowRef::Index(i) => Err(TableError::RowOutOfRange {
                row: i,
                rows: self.rows.len(),
            }),
        }
    }

    // --- cells ---

    /// Stores `cell` at (`row`, `col`).
    pub fn put_cell(
        &mut self,
        row: impl Into<RowRef>,
        col: usize,
        cell: Cell,
    ) -> Result<(), TableError> {
        let row = self.resolve_row(row.into())?;
        let cols = self.columns.len();
        let slot = self.rows[row]
            .cells
            .get_mut(col)
            .ok_or(TableError::ColumnOutOfRange { col, cols })?;
        *slot = cell;
        Ok(())
    }

    pub fn put_int(
        &mut self,
        row: impl Into<RowRef>,
        col: usize,
        value: i64,
    ) -> Result<(), TableError> {
        self.put_cell(row, col, Cell::Integer(value))
    }

    pub fn put_float(
        &mut self,
        row: impl Into<RowRef>,
        col: usize,
        value: f64,
    ) -> Result<(), TableError> {
        self.put_cell(row, col, Cell::Float(value))
    }

    pub fn put_str(
        &mut self,
        row: impl Into<RowRef>,
        col: usize,
        value: impl Into<String>,
    ) -> Result<(), TableError> {
        self.put_cell(row, col, Cell::Text(value.into()))
    }

    pub fn put_date(
        &mut self,
        row: impl Into<RowRef>,
        col: usize,
        value: NaiveDate,
    ) -> Result<(), TableError> {
        self.put_cell(row, col, Cell::Date(value))
    }

    pub fn put_datetime(
        &mut self,
        row: impl Into<RowRef>,
        col: usize,
        value: NaiveDateTime,
    ) -> Result<(), TableError> {
        self.put_cell(row, col, Cell::DateTime(value))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    // --- separator rules ---

    /// Registers a separator rule before `row`.
    pub fn set_line_before(&mut self, row: impl Into<RowRef>) -> Result<(), TableError> {
        let row = self.resolve_row(row.into())?;
        self.line_before.insert(row);
        Ok(())
    }

    /// Registers a separator rule after `row`.
    pub fn set_line_after(&mut self, row: impl Into<RowRef>) -> Result<(), TableError> {
        let row = self.resolve_row(row.into())?;
        self.line_after.insert(row);
        Ok(())
    }

    /// Whether `row` is marked with a rule before it.
    pub fn has_line_before(&self, row: usize) -> bool {
        self.line_before.contains(&row)
    }

    /// Whether `row` is marked with a rule after it.
    pub fn has_line_after(&self, row: usize) -> bool {
        self.line_after.contains(&row)
    }

    /// Whether a rule is actually drawn before `row`: a rule after the
    /// previous row already separates the two.
    pub fn draws_line_before(&self, row: usize) -> bool {
        self.has_line_before(row) && !(row > 0 && self.has_line_after(row - 1))
    }

    // --- formats ---

    /// Sets the default strftime format for date cells.
    pub fn set_date_format(&mut self, fmt: &str) -> Result<(), TableError> {
        validate_date_format(fmt)?;
        self.date_format = fmt.to_string();
        Ok(())
    }

    /// Sets the default strftime format for date-time cells.
    pub fn set_datetime_format(&mut self, fmt: &str) -> Result<(), TableError> {
        validate_datetime_format(fmt)?;
        self.datetime_format = fmt.to_string();
        Ok(())
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    pub(crate) fn format_context(&self, layout: Layout) -> FormatContext<'_> {
        FormatContext {
            date_format: &self.date_format,
            datetime_format: &self.datetime_format,
            layout,
        }
    }

    // --- styles ---

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Sets properties on an arbitrary style key, e.g. [`keys::NO_ROWS`].
    pub fn set_css<I>(&mut self, key: impl Into<String>, props: I)
    where
        I: IntoIterator<Item = CssProperty>,
    {
        self.styles.set(key, props);
    }

    pub fn set_title_css<I: IntoIterator<Item = CssProperty>>(&mut self, props: I) {
        self.styles.set(keys::TITLE, props);
    }

    /// Styles section caption `n` (1, 2 or 3).
    pub fn set_section_css<I: IntoIterator<Item = CssProperty>>(
        &mut self,
        n: usize,
        props: I,
    ) -> Result<(), TableError> {
        let key = keys::section(n).ok_or(TableError::SectionOutOfRange(n))?;
        self.styles.set(key, props);
        Ok(())
    }

    pub fn set_header_cell_css<I: IntoIterator<Item = CssProperty>>(
        &mut self,
        col: usize,
        props: I,
    ) -> Result<(), TableError> {
        self.check_col(col)?;
        self.styles.set(keys::header(col), props);
        Ok(())
    }

    /// Styles every body cell of column `col`.
    pub fn set_col_css<I: IntoIterator<Item = CssProperty>>(
        &mut self,
        col: usize,
        props: I,
    ) -> Result<(), TableError> {
        self.check_col(col)?;
        self.styles.set(keys::column(col), props);
        Ok(())
    }

    pub fn set_row_css<I: IntoIterator<Item = CssProperty>>(
        &mut self,
        row: impl Into<RowRef>,
        props: I,
    ) -> Result<(), TableError> {
        let row = self.resolve_row(row.into())?;
        self.styles.set(keys::row(row), props);
        Ok(())
    }

    pub fn set_cell_css<I: IntoIterator<Item = CssProperty>>(
        &mut self,
        row: impl Into<RowRef>,
        col: usize,
        props: I,
    ) -> Result<(), TableError> {
        let row = self.resolve_row(row.into())?;
        self.check_col(col)?;
        self.styles.set(keys::cell(row, col), props);
        Ok(())
    }

    /// Merges a prepared style map; entries in `other` win.
    pub fn merge_styles(&mut self, other: &StyleMap) {
        self.styles.merge(other);
    }

    fn check_col(&self, col: usize) -> Result<(), TableError> {
        if col >= self.columns.len() {
            return Err(TableError::ColumnOutOfRange {
                col,
                cols: self.columns.len(),
            });
        }
        Ok(())
    }
}

/// Unchecked serialized form of a [`Table`].
#[derive(Deserialize)]
struct TableData {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    sections: [Option<String>; 3],
    #[serde(default)]
    columns: Vec<ColumnDefinition>,
    #[serde(default)]
    rows: Vec<Row>,
    #[serde(default)]
    line_before: BTreeSet<usize>,
    #[serde(default)]
    line_after: BTreeSet<usize>,
    #[serde(default)]
    styles: StyleMap,
    #[serde(default)]
    date_format: Option<String>,
    #[serde(default)]
    datetime_format: Option<String>,
}

impl TryFrom<TableData> for Table {
    type Error = TableError;

    fn try_from(data: TableData) -> Result<Self, Self::Error> {
        let mut table = Table::new();
        table.title = data.title;
        table.sections = data.sections;
        for column in data.columns {
            table.add_column(column)?;
        }
        for row in data.rows {
            table.push_row(row.cells)?;
        }
        for row in data.line_before {
            table.set_line_before(row)?;
        }
        for row in data.line_after {
            table.set_line_after(row)?;
        }
        if let Some(fmt) = data.date_format {
            table.set_date_format(&fmt)?;
        }
        if let Some(fmt) = data.datetime_format {
            table.set_datetime_format(&fmt)?;
        }
        table.styles = data.styles;
        Ok(table)
    }
}

impl fmt::Display for Table {
    /// The text rendering with default options.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::TextRenderer::new().render_string(self))
    }
}
