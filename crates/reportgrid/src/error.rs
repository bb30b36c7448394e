//! Error types for table construction and rendering.
//!
//! Two families are kept apart:
//!
//! - [`TableError`] covers structural problems with a [`Table`](crate::Table)
//!   and rejected mutations. The renderers never propagate `NoHeaders` or
//!   `NoData`; they embed the message in the output instead.
//! - [`RenderError`] covers infrastructure failures (I/O, CSV writer, template
//!   compilation, resource lookup). These abort the render call.

use std::path::PathBuf;

/// Structural and mutation errors raised by the table model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The table has no column definitions.
    #[error("no headers found in table")]
    NoHeaders,

    /// The table has columns but no rows.
    #[error("no data found in table")]
    NoData,

    /// A column was added after the first row was appended.
    #[error("cannot add column '{title}': table already has rows")]
    ColumnsFrozen { title: String },

    /// Row index does not address an existing row.
    #[error("row {row} is out of range (table has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// `RowRef::Last` was used on a table without rows.
    #[error("table has no rows to address")]
    NoLastRow,

    /// Column index does not address an existing column.
    #[error("column {col} is out of range (table has {cols} columns)")]
    ColumnOutOfRange { col: usize, cols: usize },

    /// A row was appended with the wrong number of cells.
    #[error("row has {found} cells but the table has {expected} columns")]
    CellCountMismatch { expected: usize, found: usize },

    /// Only three section captions exist.
    #[error("section {0} does not exist (expected 1, 2 or 3)")]
    SectionOutOfRange(usize),

    /// A column was declared with zero width.
    #[error("column '{title}' must have a positive width")]
    ZeroWidth { title: String },

    /// A print mask could not be parsed.
    #[error("invalid print mask '{mask}': {reason}")]
    InvalidPrintMask { mask: String, reason: String },

    /// A strftime-style format string contains an unknown specifier.
    #[error("invalid date format '{0}'")]
    InvalidDateFormat(String),
}

/// Infrastructure errors that abort a render call.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing the output or reading a resource failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV writer reported an error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Template compilation or execution failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// A custom resource path could not be used.
    #[error("resource error at {}: {message}", path.display())]
    Resource { path: PathBuf, message: String },
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for RenderError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        RenderError::Io(err.into_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_error_display() {
        assert_eq!(TableError::NoHeaders.to_string(), "no headers found in table");
        assert_eq!(TableError::NoData.to_string(), "no data found in table");

        let err = TableError::CellCountMismatch {
            expected: 3,
            found: 2,
        };
        assert!(err.to_string().contains("2 cells"));
        assert!(err.to_string().contains("3 columns"));
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let render_err: RenderError = io_err.into();
        assert!(matches!(render_err, RenderError::Io(_)));
    }

    #[test]
    fn from_minijinja_error() {
        let mj_err = minijinja::Error::new(
            minijinja::ErrorKind::SyntaxError,
            "unexpected end of input",
        );
        let render_err: RenderError = mj_err.into();
        assert!(matches!(render_err, RenderError::Template(_)));
        assert!(render_err.to_string().starts_with("template error"));
    }

    #[test]
    fn structural_errors_stay_in_band() {
        use crate::TableRenderer;

        // Every render error is an infrastructure failure.
        let err = RenderError::Resource {
            path: PathBuf::from("/styles/print.css"),
            message: "not a file".into(),
        };
        assert_eq!(
            err.to_string(),
            "resource error at /styles/print.css: not a file"
        );

        let table = crate::Table::new();
        let out = crate::CsvRenderer::new().render(&table).unwrap();
        assert_eq!(out, b"no headers found in table\n");
    }
}
