//! # reportgrid - Typed Tables as Text, CSV and HTML
//!
//! `reportgrid` renders one typed table model into several formats: a
//! fixed-width text grid with word-wrapped cells, CSV records, and a styled
//! HTML document. PDF output lives in the companion `reportgrid-pdf` crate,
//! which converts the HTML document with an external program.
//!
//! ## Core Concepts
//!
//! - [`Table`]: captions, [`ColumnDefinition`]s, rows of [`Cell`]s,
//!   separator rules and a [`StyleMap`]
//! - [`TableRenderer`]: implemented by [`TextRenderer`], [`CsvRenderer`] and
//!   [`HtmlRenderer`]; all of them only borrow the table
//! - [`Report`]: several tables rendered back to back
//! - [`RenderOptions`]: serde-friendly renderer settings
//!
//! ## Quick Start
//!
//! ```rust
//! use reportgrid::{ColumnDefinition, RowRef, Table, TextRenderer};
//!
//! let mut table = Table::new();
//! table.set_title("Inventory");
//! table.add_column(ColumnDefinition::new("Item", 10)).unwrap();
//! table.add_column(ColumnDefinition::new("Qty", 5).right()).unwrap();
//!
//! table.add_row();
//! table.put_str(RowRef::Last, 0, "Widget").unwrap();
//! table.put_int(RowRef::Last, 1, 42).unwrap();
//!
//! let text = TextRenderer::new().render_string(&table);
//! assert_eq!(
//!     text,
//!     "Inventory\nItem          Qty\n----------  -----\nWidget         42\n"
//! );
//! ```
//!
//! ## Missing Data
//!
//! A table without columns or rows is not an error for the renderers. The
//! missing section is replaced by a diagnostic in the output format (a text
//! line, a CSV record, an HTML element with the `no-headers` or `no-rows`
//! class). Only infrastructure failures come back as [`RenderError`].
//!
//! ## Logging
//!
//! The crate logs through `tracing` and never installs a subscriber. Without
//! one, logging is a no-op.

pub mod error;
pub mod format;
pub mod options;
pub mod render;
pub mod report;
pub mod resource;
pub mod table;
pub mod template;
pub mod util;

pub use error::{RenderError, TableError};
pub use format::{humanize_float, Layout, PrintMask};
pub use options::{FontUnit, HtmlOptions, RenderOptions, TextOptions};
pub use render::html::{HtmlFragment, StyleOverlay};
pub use render::{CsvRenderer, HtmlRenderer, TableRenderer, TextRenderer};
pub use report::{PositionTemplates, Report};
pub use table::{
    keys, Cell, CellKind, ColumnDefinition, CssProperty, Justify, Row, RowRef, StyleMap, Table,
};
