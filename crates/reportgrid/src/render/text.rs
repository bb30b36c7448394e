//! Fixed-width text grid.
//!
//! Each row becomes a block of lines. String cells are word-wrapped to their
//! column width; the block is as tall as the tallest wrapped cell, and every
//! other column is filled with blank runs on the continuation lines. Columns
//! are joined with a spacer of `col_space` blanks and every column fragment
//! is exactly its column's width, so the output stays a rectangular grid.
//!
//! ```text
//! Report title
//!      Index  Value  Description
//! ----------  -----  --------------------
//!          1     10  lorem ipsum dolor
//!                    sit amet
//! ```
//!
//! Separator rules are drawn from the table's `line_before`/`line_after`
//! sets. The header block always closes with a rule, so a rule requested
//! before the first row is already there, and a rule after row `i` stands in
//! for a rule before row `i + 1`.

use crate::error::RenderError;
use crate::format::{fit_to_column, format_cell, format_text_line, Layout};
use crate::options::TextOptions;
use crate::render::TableRenderer;
use crate::table::{Cell, ColumnDefinition, Table};
use crate::util::{repeat_char, wrap};

/// Renders a table as a fixed-width text grid.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    col_space: usize,
    fill: char,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::from_options(&TextOptions::default())
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &TextOptions) -> Self {
        TextRenderer {
            col_space: options.col_space,
            fill: options.fill,
        }
    }

    /// Sets the number of blanks between columns.
    pub fn col_space(mut self, n: usize) -> Self {
        self.col_space = n;
        self
    }

    /// Sets the separator fill character.
    pub fn fill(mut self, c: char) -> Self {
        self.fill = c;
        self
    }

    /// Renders the table, each line terminated by `\n`.
    pub fn render_string(&self, table: &Table) -> String {
        tracing::debug!(
            rows = table.row_count(),
            cols = table.col_count(),
            "rendering text table"
        );
        let mut lines: Vec<String> = table
            .captions()
            .into_iter()
            .map(|(_, text)| text.to_string())
            .collect();

        match table.has_headers() {
            Err(err) => lines.push(err.to_string()),
            Ok(()) => {
                lines.extend(self.header_lines(table));
                match table.has_data() {
                    Err(err) => lines.push(err.to_string()),
                    Ok(()) => {
                        for row in 0..table.row_count() {
                            lines.extend(self.row_lines(table, row));
                        }
                    }
                }
            }
        }

        let mut out = String::new();
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// The header block: wrapped titles followed by one separator rule.
    pub fn header_lines(&self, table: &Table) -> Vec<String> {
        let columns = table.columns();
        let wrapped: Vec<Vec<String>> = columns
            .iter()
            .map(|col| wrap(&col.title, col.width))
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        let mut lines = Vec::with_capacity(height + 1);
        for k in 0..height {
            let parts = columns.iter().zip(&wrapped).map(|(col, fragments)| {
                let fragment = fragments.get(k).map(String::as_str).unwrap_or("");
                fit_to_column(fragment, col)
            });
            lines.push(self.join(parts));
        }
        lines.push(self.separator_line(table));
        lines
    }

    /// A rule of the fill character under every column.
    pub fn separator_line(&self, table: &Table) -> String {
        self.join(table.columns().iter().map(|col| repeat_char(self.fill, col.width)))
    }

    /// All output lines for `row`, including its separator rules.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not a valid row index.
    pub fn row_lines(&self, table: &Table, row: usize) -> Vec<String> {
        let columns = table.columns();
        let cells = table.rows()[row].cells();
        let ctx = table.format_context(Layout::Fixed);

        let blocks: Vec<CellBlock> = columns
            .iter()
            .zip(cells)
            .map(|(col, cell)| match cell {
                Cell::Text(s) => CellBlock::Wrapped(wrap(s, col.width)),
                other => CellBlock::Single(format_cell(other, col, &ctx)),
            })
            .collect();
        let height = row_height(&blocks);

        let mut lines = Vec::with_capacity(height + 2);
        if row > 0 && table.draws_line_before(row) {
            lines.push(self.separator_line(table));
        }
        for k in 0..height {
            let parts = columns
                .iter()
                .zip(&blocks)
                .map(|(col, block)| block.line(k, col));
            lines.push(self.join(parts));
        }
        if table.has_line_after(row) {
            lines.push(self.separator_line(table));
        }
        lines
    }

    fn join(&self, parts: impl Iterator<Item = String>) -> String {
        parts
            .collect::<Vec<_>>()
            .join(&repeat_char(' ', self.col_space))
    }
}

impl TableRenderer for TextRenderer {
    fn render(&self, table: &Table) -> Result<Vec<u8>, RenderError> {
        Ok(self.render_string(table).into_bytes())
    }
}

/// Formatted content of one cell before it is laid out in lines.
enum CellBlock {
    /// Word-wrapped fragments of a string cell.
    Wrapped(Vec<String>),
    /// A value that only occupies the first line.
    Single(String),
}

impl CellBlock {
    fn height(&self) -> usize {
        match self {
            CellBlock::Wrapped(fragments) => fragments.len(),
            CellBlock::Single(_) => 1,
        }
    }

    /// Line `k` of this cell, exactly `col.width` wide.
    fn line(&self, k: usize, col: &ColumnDefinition) -> String {
        match self {
            CellBlock::Wrapped(fragments) => match fragments.get(k) {
                Some(fragment) => format_text_line(fragment, col),
                None => repeat_char(' ', col.width),
            },
            CellBlock::Single(text) if k == 0 => text.clone(),
            CellBlock::Single(_) => repeat_char(' ', col.width),
        }
    }
}

/// Number of lines a row needs: its tallest wrapped cell, at least one.
fn row_height(blocks: &[CellBlock]) -> usize {
    blocks.iter().map(CellBlock::height).max().unwrap_or(1).max(1)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::util::display_width;
    use proptest::prelude::*;

    fn cell_strategy() -> impl Strategy<Value = Cell> {
        prop_oneof![
            Just(Cell::Unset),
            any::<i64>().prop_map(Cell::Integer),
            (-1.0e9f64..1.0e9).prop_map(Cell::Float),
            "[a-z]{1,15}( [a-z]{1,15}){0,8}".prop_map(Cell::Text),
            (1970i32..2100, 1u32..13, 1u32..29).prop_map(|(y, m, d)| {
                Cell::Date(chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
            }),
            (1970i32..2100, 1u32..13, 1u32..29, 0u32..24, 0u32..60).prop_map(
                |(y, mo, d, h, mi)| {
                    let date = chrono::NaiveDate::from_ymd_opt(y, mo, d).unwrap_or_default();
                    Cell::DateTime(date.and_hms_opt(h, mi, 0).unwrap_or_default())
                }
            ),
        ]
    }

    proptest! {
        #[test]
        fn every_grid_line_is_full_width(
            widths in proptest::collection::vec(1usize..20, 1..5),
            right in proptest::collection::vec(any::<bool>(), 5),
            rows in proptest::collection::vec(proptest::collection::vec(cell_strategy(), 5), 1..6),
            col_space in 0usize..4,
        ) {
            let mut table = Table::new();
            for (i, w) in widths.iter().enumerate() {
                let col = ColumnDefinition::new(format!("Column {}", i), *w);
                let col = if right[i] { col.right() } else { col };
                table.add_column(col).unwrap();
            }
            for row in &rows {
                table.push_row(row[..widths.len()].to_vec()).unwrap();
            }

            let renderer = TextRenderer::new().col_space(col_space);
            let total = widths.iter().sum::<usize>() + col_space * (widths.len() - 1);

            let mut lines = renderer.header_lines(&table);
            for row in 0..table.row_count() {
                lines.extend(renderer.row_lines(&table, row));
            }
            for line in lines {
                prop_assert_eq!(display_width(&line), total, "line {:?}", line);
            }
        }

        #[test]
        fn text_rendering_is_deterministic(
            rows in proptest::collection::vec(proptest::collection::vec(cell_strategy(), 2), 0..5),
        ) {
            let mut table = Table::new();
            table.add_column(ColumnDefinition::new("A", 7)).unwrap();
            table.add_column(ColumnDefinition::new("B", 9).right()).unwrap();
            for row in rows {
                table.push_row(row).unwrap();
            }
            let r = TextRenderer::new();
            prop_assert_eq!(r.render_string(&table), r.render_string(&table));
        }
    }
}
