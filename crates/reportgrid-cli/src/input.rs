//! Table input: a YAML or JSON file, or the built-in sample.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reportgrid::{keys, ColumnDefinition, CssProperty, RowRef, Table};
use serde::Deserialize;

/// A single table or a list of tables.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Many(Vec<Table>),
    One(Box<Table>),
}

/// Reads tables from `path`. `.json` files are JSON, everything else YAML.
pub fn load_tables(path: &Path) -> Result<Vec<Table>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading tables {}", path.display()))?;
    let json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    parse_tables(&text, json).with_context(|| format!("parsing tables {}", path.display()))
}

pub fn parse_tables(text: &str, json: bool) -> Result<Vec<Table>> {
    let doc: Document = if json {
        serde_json::from_str(text)?
    } else {
        serde_yaml::from_str(text)?
    };
    Ok(match doc {
        Document::Many(tables) => tables,
        Document::One(table) => vec![*table],
    })
}

const DESCRIPTION: &str = "Lorem ipsum dolor sit amet, elementum fermentum suspendisse";

/// Demo table with captions, all cell kinds, a separator and some styling.
pub fn sample_table(rows: usize) -> Result<Table> {
    let mut table = Table::new();
    table.set_title("Sample Table");
    table.set_section(1, "Sample Table Section One")?;
    table.set_section(2, "Sample Table Section Two")?;

    table.add_column(ColumnDefinition::new("Index", 8).right())?;
    table.add_column(ColumnDefinition::new("Value", 12).right().print_mask("%8d")?)?;
    table.add_column(ColumnDefinition::new("Amount", 14).right())?;
    table.add_column(ColumnDefinition::new("Since", 10))?;
    table.add_column(ColumnDefinition::new("Description", 30))?;

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("sample start date")?;
    for i in 0..rows {
        let n = i64::try_from(i)?;
        table.add_row();
        table.put_int(RowRef::Last, 0, n)?;
        table.put_int(RowRef::Last, 1, n * 10)?;
        table.put_float(RowRef::Last, 2, n as f64 * 1234.5)?;
        if let Some(date) = start.checked_add_days(chrono::Days::new(i as u64 * 31)) {
            table.put_date(RowRef::Last, 3, date)?;
        }
        table.put_str(RowRef::Last, 4, DESCRIPTION)?;
    }
    if rows > 1 {
        table.set_line_before(rows - 1)?;
    }

    table.set_title_css([CssProperty::new("font-weight", "bold")]);
    table.set_css(keys::NO_ROWS, [CssProperty::new("color", "#a00")]);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportgrid::CellKind;

    #[test]
    fn sample_has_every_kind() {
        let table = sample_table(3).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.col_count(), 5);
        assert_eq!(table.get(1, 2).map(|c| c.kind()), Some(CellKind::Float));
        assert_eq!(table.get(1, 3).map(|c| c.kind()), Some(CellKind::Date));
        assert!(table.has_line_before(2));
    }

    #[test]
    fn empty_sample_still_renders() {
        let table = sample_table(0).unwrap();
        assert!(table.to_string().ends_with("no data found in table\n"));
    }

    #[test]
    fn single_table_yaml() {
        let yaml = r#"
title: Stock
columns:
  - title: Item
    width: 10
  - title: Qty
    width: 5
    justify: right
rows:
  - [{kind: string, value: bolt}, {kind: integer, value: 4}]
"#;
        let tables = parse_tables(yaml, false).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title(), Some("Stock"));
        assert_eq!(tables[0].row_count(), 1);
    }

    #[test]
    fn round_trips_a_list_through_json() {
        let tables = vec![sample_table(2).unwrap(), sample_table(1).unwrap()];
        let json = serde_json::to_string(&tables).unwrap();
        let back = parse_tables(&json, true).unwrap();
        assert_eq!(back, tables);
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("t.json");
        fs::write(&path, serde_json::to_string(&sample_table(1).unwrap()).unwrap()).unwrap();
        let tables = load_tables(&path).unwrap();
        assert_eq!(tables[0].title(), Some("Sample Table"));
    }
}
