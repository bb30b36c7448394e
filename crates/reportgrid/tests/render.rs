//! End-to-end rendering of one table through every format.

use chrono::NaiveDate;
use reportgrid::{
    keys, CellKind, ColumnDefinition, CssProperty, CsvRenderer, HtmlRenderer, RowRef, Table,
    TableRenderer, TextRenderer,
};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                     tempor incididunt ut labore et dolore magna aliqua. Ut enim ad";

fn lorem_table() -> Table {
    let mut table = Table::new();
    table
        .add_column(ColumnDefinition::new("Index", 10).right())
        .unwrap();
    table
        .add_column(ColumnDefinition::new("Value", 10).right())
        .unwrap();
    table
        .add_column(ColumnDefinition::new("Description", 80))
        .unwrap();
    for i in 0..3 {
        table.add_row();
        table.put_int(RowRef::Last, 0, i).unwrap();
        table.put_int(RowRef::Last, 1, i * 100).unwrap();
        table.put_str(RowRef::Last, 2, LOREM).unwrap();
    }
    table
}

fn html() -> HtmlRenderer {
    HtmlRenderer::new().search_exe_dir(false)
}

#[test]
fn lorem_rows_wrap_with_blank_numeric_columns() {
    assert!(LOREM.len() >= 120);
    let table = lorem_table();
    let r = TextRenderer::new();

    for row in 0..3 {
        let lines = r.row_lines(&table, row);
        assert!(lines.len() >= 2, "row {} has {} lines", row, lines.len());
        assert!(lines[0].starts_with(&format!("{:>10}", row)));
        for continuation in &lines[1..] {
            assert!(continuation.starts_with(&" ".repeat(22)));
            assert_eq!(continuation.len(), 10 + 2 + 10 + 2 + 80);
        }
    }

    let out = r.render_string(&table);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines[0],
        format!("{:>10}  {:>10}  {:<80}", "Index", "Value", "Description")
    );
    assert_eq!(lines[1], format!("{}  {}  {}", "-".repeat(10), "-".repeat(10), "-".repeat(80)));
    assert_eq!(lines.len(), 2 + 3 * 2);
}

#[test]
fn zero_columns_degrade_in_every_format() {
    let mut table = Table::new();
    table.set_title("Nothing here");
    assert!(table.has_headers().is_err());

    let text = TextRenderer::new().render_string(&table);
    assert_eq!(text, "Nothing here\nno headers found in table\n");

    let csv = String::from_utf8(CsvRenderer::new().render(&table).unwrap()).unwrap();
    assert_eq!(csv, "Nothing here\nno headers found in table\n");

    let frag = html().fragment(&table);
    assert!(frag
        .html
        .contains(r#"<p class="no-headers">no headers found in table</p>"#));
    assert!(!frag.html.contains("<table>"));
    assert!(html().render(&table).is_ok());
}

#[test]
fn zero_rows_keep_header_and_one_diagnostic() {
    let mut table = Table::new();
    table.add_column(ColumnDefinition::new("A", 4)).unwrap();
    table.add_column(ColumnDefinition::new("B", 4)).unwrap();

    let text = TextRenderer::new().render_string(&table);
    assert_eq!(text, "A     B   \n----  ----\nno data found in table\n");

    let csv = String::from_utf8(CsvRenderer::new().render(&table).unwrap()).unwrap();
    assert_eq!(csv, "A,B\nno data found in table\n");

    let frag = html().fragment(&table);
    assert_eq!(frag.html.matches("<td").count(), 1);
    assert!(frag.html.contains(r#"class="no-rows""#));
}

#[test]
fn csv_record_and_field_counts() {
    let table = lorem_table();
    let bytes = CsvRenderer::new().render(&table).unwrap();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());

    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), table.col_count());

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), table.row_count());
    for record in &records {
        assert_eq!(record.len(), table.col_count());
        assert_eq!(&record[2], LOREM);
    }
}

#[test]
fn separator_rule_in_text_and_html() {
    let mut table = lorem_table();
    table.set_line_before(2).unwrap();

    let r = TextRenderer::new();
    let rule = r.separator_line(&table);
    let lines = r.row_lines(&table, 2);
    assert_eq!(lines[0], rule);
    assert_ne!(lines[1], rule);

    let frag = html().fragment(&table);
    assert_eq!(frag.html.matches(r#"<tr class="top-line">"#).count(), 1);
}

#[test]
fn rendering_is_repeatable() {
    let mut table = lorem_table();
    table.set_title("Repeat");
    table
        .set_col_css(2, [CssProperty::new("font-style", "italic")])
        .unwrap();

    let text = TextRenderer::new();
    let csv = CsvRenderer::new();
    let html = html();
    assert_eq!(text.render(&table).unwrap(), text.render(&table).unwrap());
    assert_eq!(csv.render(&table).unwrap(), csv.render(&table).unwrap());
    assert_eq!(html.render(&table).unwrap(), html.render(&table).unwrap());
}

#[test]
fn rendering_html_leaves_style_map_untouched() {
    let mut table = lorem_table();
    table.set_css(keys::NO_ROWS, [CssProperty::new("color", "red")]);
    let before = table.styles().clone();

    html().render(&table).unwrap();
    assert_eq!(table.styles(), &before);
    assert!(table.styles().get(&keys::header(0)).is_none());
}

#[test]
fn mixed_cell_kinds() {
    let mut table = Table::new();
    table.set_date_format("%Y-%m-%d").unwrap();
    table.add_column(ColumnDefinition::new("When", 10)).unwrap();
    table
        .add_column(ColumnDefinition::new("Amount", 12).right())
        .unwrap();
    table
        .add_column(ColumnDefinition::new("Count", 6).right().print_mask("%06d").unwrap())
        .unwrap();

    table.add_row();
    table
        .put_date(RowRef::Last, 0, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        .unwrap();
    table.put_float(RowRef::Last, 1, -98765.4321).unwrap();
    table.put_int(RowRef::Last, 2, 42).unwrap();
    assert_eq!(table.get(0, 0).map(|c| c.kind()), Some(CellKind::Date));

    let text = TextRenderer::new().render_string(&table);
    assert!(text.ends_with("2024-01-31    -98,765.43  000042\n"));

    let csv = String::from_utf8(CsvRenderer::new().render(&table).unwrap()).unwrap();
    // Mask widths only pad in fixed layout.
    assert!(csv.ends_with("2024-01-31,\"-98,765.43\",42\n"));
}

#[test]
fn datetime_cells_in_text_and_csv() {
    let mut table = Table::new();
    table.add_column(ColumnDefinition::new("Stamp", 10)).unwrap();
    table
        .add_column(ColumnDefinition::new("Time", 7).datetime_format("%H:%M").unwrap())
        .unwrap();
    let at = NaiveDate::from_ymd_opt(2024, 1, 31)
        .unwrap()
        .and_hms_opt(13, 45, 0)
        .unwrap();
    table.add_row();
    table.put_datetime(RowRef::Last, 0, at).unwrap();
    table.put_datetime(RowRef::Last, 1, at).unwrap();
    assert_eq!(table.get(0, 0).map(|c| c.kind()), Some(CellKind::DateTime));

    // The default "%m/%d/%Y %H:%M" is cut to the 10-column grid.
    let text = TextRenderer::new().render_string(&table);
    assert!(text.ends_with("01/31/2024    13:45\n"), "{text:?}");

    let csv = String::from_utf8(CsvRenderer::new().render(&table).unwrap()).unwrap();
    assert_eq!(csv, "Stamp,Time\n01/31/2024 13:45,13:45\n");
}

#[test]
fn display_matches_default_text_renderer() {
    let table = lorem_table();
    assert_eq!(table.to_string(), TextRenderer::new().render_string(&table));
}
