//! CSV output.
//!
//! Captions come first as single-field records, then the header record and
//! one record per row. Strings are emitted whole (no wrapping) and numbers
//! drop their mask width, since CSV fields have no display width. A table
//! without columns or rows gets a single-field record holding the
//! diagnostic instead of the missing section.

use crate::error::RenderError;
use crate::format::{format_cell, Layout};
use crate::render::TableRenderer;
use crate::table::Table;

/// Renders a table as CSV with standard quoting.
#[derive(Clone, Debug)]
pub struct CsvRenderer {
    delimiter: u8,
}

impl Default for CsvRenderer {
    fn default() -> Self {
        CsvRenderer { delimiter: b',' }
    }
}

impl CsvRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The header record: one field per column title.
    pub fn header_record(&self, table: &Table) -> Vec<String> {
        table.columns().iter().map(|c| c.title.clone()).collect()
    }

    /// The record for `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not a valid row index.
    pub fn row_record(&self, table: &Table, row: usize) -> Vec<String> {
        let ctx = table.format_context(Layout::Free);
        table
            .columns()
            .iter()
            .zip(table.rows()[row].cells())
            .map(|(col, cell)| format_cell(cell, col, &ctx))
            .collect()
    }

    fn write_records(&self, table: &Table) -> Result<Vec<u8>, RenderError> {
        // Caption and diagnostic records have one field, data records have N.
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_writer(Vec::new());

        for (_, caption) in table.captions() {
            wtr.write_record([caption])?;
        }

        match table.has_headers() {
            Err(err) => wtr.write_record([err.to_string()])?,
            Ok(()) => {
                wtr.write_record(self.header_record(table))?;
                match table.has_data() {
                    Err(err) => wtr.write_record([err.to_string()])?,
                    Ok(()) => {
                        for row in 0..table.row_count() {
                            wtr.write_record(self.row_record(table, row))?;
                        }
                    }
                }
            }
        }

        Ok(wtr.into_inner()?)
    }
}

impl TableRenderer for CsvRenderer {
    fn render(&self, table: &Table) -> Result<Vec<u8>, RenderError> {
        tracing::debug!(
            rows = table.row_count(),
            cols = table.col_count(),
            "rendering csv table"
        );
        self.write_records(table).map_err(|err| {
            tracing::error!(error = %err, "csv rendering failed");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnDefinition, RowRef};
    use chrono::NaiveDate;

    fn render(table: &Table) -> String {
        String::from_utf8(CsvRenderer::new().render(table).unwrap()).unwrap()
    }

    fn sample() -> Table {
        let mut table = Table::new();
        table.add_column(ColumnDefinition::new("Name", 4)).unwrap();
        table
            .add_column(ColumnDefinition::new("Amount", 4).right())
            .unwrap();
        table
    }

    #[test]
    fn header_and_rows() {
        let mut table = sample();
        table.add_row();
        table.put_str(RowRef::Last, 0, "a much longer name").unwrap();
        table.put_float(RowRef::Last, 1, 12345.678).unwrap();

        assert_eq!(render(&table), "Name,Amount\na much longer name,\"12,345.68\"\n");
    }

    #[test]
    fn captions_are_single_field_records() {
        let mut table = sample();
        table.set_title("Sales");
        table.set_section(1, "Q1").unwrap();
        table.add_row();
        table.put_int(0, 1, 7).unwrap();

        assert_eq!(render(&table), "Sales\nQ1\nName,Amount\n,7\n");
    }

    #[test]
    fn quoting() {
        let mut table = sample();
        table.add_row();
        table.put_str(0, 0, "say \"hi\"\nnow").unwrap();
        table.put_int(0, 1, 1).unwrap();

        assert_eq!(render(&table), "Name,Amount\n\"say \"\"hi\"\"\nnow\",1\n");
    }

    #[test]
    fn dates_are_not_truncated() {
        let mut table = sample();
        table.add_row();
        table
            .put_date(0, 0, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap())
            .unwrap();

        assert_eq!(render(&table), "Name,Amount\n12/01/2023,\n");
    }

    #[test]
    fn degrades_without_headers() {
        let mut table = Table::new();
        table.set_title("T");
        assert_eq!(render(&table), "T\nno headers found in table\n");
    }

    #[test]
    fn degrades_without_rows() {
        assert_eq!(render(&sample()), "Name,Amount\nno data found in table\n");
    }

    #[test]
    fn custom_delimiter() {
        let mut table = sample();
        table.add_row();
        table.put_str(0, 0, "x").unwrap();
        table.put_int(0, 1, 2).unwrap();
        let out = CsvRenderer::new().delimiter(b';').render(&table).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Name;Amount\nx;2\n");
    }
}
