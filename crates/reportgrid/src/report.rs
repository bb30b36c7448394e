//! Reports: several tables rendered one after another.
//!
//! Each table is rendered independently and the outputs are concatenated.
//! The first table that fails aborts the report.

use std::path::PathBuf;

use crate::error::RenderError;
use crate::render::{CsvRenderer, HtmlRenderer, TableRenderer};
use crate::table::Table;

/// Document templates chosen by a table's position in a report.
///
/// The first table usually opens the document, the last one closes it and
/// the ones in between only contribute their container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionTemplates {
    pub first: PathBuf,
    pub middle: PathBuf,
    pub last: PathBuf,
}

impl PositionTemplates {
    /// `firstTable.tmpl`, `middleTable.tmpl` and `lastTable.tmpl` in `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        PositionTemplates {
            first: dir.join("firstTable.tmpl"),
            middle: dir.join("middleTable.tmpl"),
            last: dir.join("lastTable.tmpl"),
        }
    }

    fn for_index(&self, index: usize, count: usize) -> &PathBuf {
        if index == 0 {
            &self.first
        } else if index + 1 == count {
            &self.last
        } else {
            &self.middle
        }
    }
}

/// An ordered list of tables.
#[derive(Clone, Debug, Default)]
pub struct Report {
    tables: Vec<Table>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(tables: Vec<Table>) -> Self {
        Report { tables }
    }

    pub fn push(&mut self, table: Table) {
        self.tables.push(table);
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Renders every table with `renderer` and concatenates the output.
    pub fn render_with(&self, renderer: &dyn TableRenderer) -> Result<Vec<u8>, RenderError> {
        self.render_each(|_, table| renderer.render(table))
    }

    /// CSV for every table, each followed by a blank line.
    pub fn render_csv(&self, renderer: &CsvRenderer) -> Result<Vec<u8>, RenderError> {
        self.render_each(|_, table| {
            let mut out = renderer.render(table)?;
            out.push(b'\n');
            Ok(out)
        })
    }

    /// HTML for every table, optionally with position-dependent templates.
    pub fn render_html(
        &self,
        renderer: &HtmlRenderer,
        templates: Option<&PositionTemplates>,
    ) -> Result<Vec<u8>, RenderError> {
        let count = self.tables.len();
        self.render_each(|index, table| match templates {
            Some(t) => renderer
                .clone()
                .template_path(t.for_index(index, count))
                .render(table),
            None => renderer.render(table),
        })
    }

    fn render_each<F>(&self, mut render: F) -> Result<Vec<u8>, RenderError>
    where
        F: FnMut(usize, &Table) -> Result<Vec<u8>, RenderError>,
    {
        let mut out = Vec::new();
        for (index, table) in self.tables.iter().enumerate() {
            let bytes = render(index, table).map_err(|err| {
                tracing::error!(
                    title = table.title().unwrap_or_default(),
                    error = %err,
                    "error while rendering report table"
                );
                err
            })?;
            out.extend_from_slice(&bytes);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextRenderer;
    use crate::table::ColumnDefinition;
    use std::fs;
    use tempfile::TempDir;

    fn table(title: &str, value: i64) -> Table {
        let mut t = Table::new();
        t.set_title(title);
        t.add_column(ColumnDefinition::new("N", 3).right()).unwrap();
        t.add_row();
        t.put_int(0, 0, value).unwrap();
        t
    }

    #[test]
    fn text_report_concatenates() {
        let report = Report::with_tables(vec![table("A", 1), table("B", 2)]);
        let out = String::from_utf8(report.render_with(&TextRenderer::new()).unwrap()).unwrap();
        assert_eq!(out, "A\n  N\n---\n  1\nB\n  N\n---\n  2\n");
    }

    #[test]
    fn csv_report_separates_with_blank_line() {
        let report = Report::with_tables(vec![table("A", 1), table("B", 2)]);
        let out = String::from_utf8(report.render_csv(&CsvRenderer::new()).unwrap()).unwrap();
        assert_eq!(out, "A\nN\n1\n\nB\nN\n2\n\n");
    }

    #[test]
    fn html_report_uses_position_templates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("firstTable.tmpl"), "FIRST{{ table_html }}").unwrap();
        fs::write(dir.path().join("middleTable.tmpl"), "MID{{ table_html }}").unwrap();
        fs::write(dir.path().join("lastTable.tmpl"), "LAST{{ table_html }}").unwrap();

        let report = Report::with_tables(vec![table("A", 1), table("B", 2), table("C", 3)]);
        let templates = PositionTemplates::in_dir(dir.path());
        let renderer = HtmlRenderer::new().search_exe_dir(false);
        let out = String::from_utf8(report.render_html(&renderer, Some(&templates)).unwrap()).unwrap();

        let first = out.find("FIRST").unwrap();
        let mid = out.find("MID").unwrap();
        let last = out.find("LAST").unwrap();
        assert!(first < mid && mid < last);
        assert_eq!(out.matches(r#"<div class="rpt-table-container">"#).count(), 3);
    }

    #[test]
    fn failing_table_aborts_report() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("firstTable.tmpl"), "{{ table_html }}").unwrap();
        fs::write(dir.path().join("lastTable.tmpl"), "{% if %}").unwrap();

        let report = Report::with_tables(vec![table("A", 1), table("B", 2)]);
        let templates = PositionTemplates::in_dir(dir.path());
        let renderer = HtmlRenderer::new().search_exe_dir(false);
        let err = report.render_html(&renderer, Some(&templates)).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }
}
