//! Output renderers.
//!
//! Every renderer borrows a [`Table`] and produces a complete byte buffer.
//! Tables without columns or rows still render: the missing section is
//! replaced by a diagnostic in the renderer's own format. Only
//! infrastructure failures are returned as [`RenderError`].

pub mod csv;
pub mod html;
pub mod text;

use std::io::Write;

use crate::error::RenderError;
use crate::table::Table;

pub use self::csv::CsvRenderer;
pub use self::html::HtmlRenderer;
pub use self::text::TextRenderer;

/// A format a table can be rendered into.
pub trait TableRenderer {
    /// Renders the whole table into a buffer.
    fn render(&self, table: &Table) -> Result<Vec<u8>, RenderError>;

    /// Renders and writes to `out`. Nothing is written if rendering fails.
    fn write_to(&self, table: &Table, out: &mut dyn Write) -> Result<(), RenderError> {
        let bytes = self.render(table)?;
        out.write_all(&bytes).map_err(|e| {
            tracing::error!(error = %e, "failed to write rendered table");
            RenderError::Io(e)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Write for Failing {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_to_propagates_io_errors() {
        let table = Table::new();
        let err = TextRenderer::new()
            .write_to(&table, &mut Failing)
            .unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
