//! PDF output for `reportgrid` tables.
//!
//! PDF is produced by an external converter (by default `wkhtmltopdf`). The
//! table is rendered as a complete HTML document, written to a temporary
//! file, and the converter writes the PDF bytes to its standard output.
//!
//! ```rust,no_run
//! use reportgrid::{ColumnDefinition, HtmlOptions, Table};
//! use reportgrid_pdf::{render_pdf, PdfProperty};
//!
//! let mut table = Table::new();
//! table.add_column(ColumnDefinition::new("Item", 10)).unwrap();
//!
//! let props = [
//!     PdfProperty::flag("--quiet"),
//!     PdfProperty::new("--page-size", "A4"),
//! ];
//! let pdf = render_pdf(&table, &HtmlOptions::default(), &props).unwrap();
//! std::fs::write("table.pdf", pdf).unwrap();
//! ```

pub mod args;
pub mod converter;

pub use args::{build_args, PdfProperty};
pub use converter::{render_pdf, PdfConverter, PdfError, DEFAULT_PROGRAM};
