//! HTML output.
//!
//! The renderer produces a `div.rpt-table-container` fragment plus a
//! stylesheet generated from the table's style map, then merges both into a
//! document template resolved through the [`resource`](crate::resource)
//! chain.
//!
//! Styling works on a [`StyleOverlay`]: a copy of the table's declared
//! styles layered over computed defaults (each column's `text-align` on its
//! header and body cells, and the column width on the header only). The table
//! itself is never modified, so rendering order does not matter.
//!
//! Every rule is scoped under the container:
//!
//! | element     | selector                                                 |
//! |-------------|----------------------------------------------------------|
//! | caption     | `div.rpt-table-container p.title`                        |
//! | header cell | `div.rpt-table-container table thead tr th.header-col-0` |
//! | column      | `div.rpt-table-container table tbody tr td:nth-child(1)` |
//! | row         | `div.rpt-table-container table tbody tr.row-0`           |
//! | body cell   | `div.rpt-table-container table tbody tr td.cell-row-0-col-0` |

use std::path::PathBuf;

use crate::error::RenderError;
use crate::format::{format_cell, Layout};
use crate::options::{FontUnit, HtmlOptions};
use crate::render::TableRenderer;
use crate::resource::{ResourceChain, ResourceKind};
use crate::table::{keys, CssProperty, Declarations, StyleMap, Table};
use crate::template::{style_block, DocumentContext, DocumentTemplate};
use html_escape::encode_text;

/// Class of the wrapping element.
pub const CONTAINER_CLASS: &str = "rpt-table-container";
/// Row class for a separator rule above the row.
pub const TOP_LINE_CLASS: &str = "top-line";
/// Row class for a separator rule below the row.
pub const BOTTOM_LINE_CLASS: &str = "bottom-line";

const CAPTION_SELECTOR: &str = "div.rpt-table-container p";
const HEADER_SELECTOR: &str = "div.rpt-table-container table thead tr th";
const ROW_SELECTOR: &str = "div.rpt-table-container table tbody tr";
const CELL_SELECTOR: &str = "div.rpt-table-container table tbody tr td";

/// Declared table styles over computed alignment and width defaults.
#[derive(Clone, Debug)]
pub struct StyleOverlay {
    styles: StyleMap,
}

impl StyleOverlay {
    pub fn build(table: &Table, options: &HtmlOptions) -> Self {
        let mut styles = StyleMap::new();
        for (c, col) in table.columns().iter().enumerate() {
            let align = CssProperty::new("text-align", col.justify.css_value());
            let width = column_width(col.effective_html_width(), options);
            let width = CssProperty::new("width", width);
            styles.set(keys::header(c), [align.clone(), width]);
            styles.set(keys::column(c), [align]);
        }
        styles.merge(table.styles());
        StyleOverlay { styles }
    }

    pub fn get(&self, key: &str) -> Option<&Declarations> {
        self.styles.get(key)
    }

    /// `{selector}.{key}{name:value;...}`, or `None` when `key` is unstyled.
    fn class_rule(&self, selector: &str, key: &str) -> Option<String> {
        self.get(key)
            .map(|decls| format!("{}.{}{}", selector, key, declaration_block(decls)))
    }
}

/// CSS width for a column of `width` characters.
fn column_width(width: usize, options: &HtmlOptions) -> String {
    let value = match options.font_unit {
        FontUnit::Px => width * options.font_size as usize,
        FontUnit::Ch | FontUnit::Em => width,
    };
    format!("{}{}", value, options.font_unit.suffix())
}

fn declaration_block(decls: &Declarations) -> String {
    let mut block = String::from("{");
    for (name, value) in decls {
        block.push_str(name);
        block.push(':');
        block.push_str(value);
        block.push(';');
    }
    block.push('}');
    block
}

/// Markup and generated stylesheet for one table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlFragment {
    pub html: String,
    pub css: String,
}

/// Renders a table as a styled HTML document.
#[derive(Clone, Debug, Default)]
pub struct HtmlRenderer {
    options: HtmlOptions,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: HtmlOptions) -> Self {
        HtmlRenderer { options }
    }

    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// Uses a custom document template file first.
    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.template_path = Some(path.into());
        self
    }

    /// Uses a custom default stylesheet file first.
    pub fn css_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.css_path = Some(path.into());
        self
    }

    /// Enables or disables the lookup next to the executable.
    pub fn search_exe_dir(mut self, search: bool) -> Self {
        self.options.search_exe_dir = search;
        self
    }

    pub fn font_unit(mut self, unit: FontUnit) -> Self {
        self.options.font_unit = unit;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.options.font_size = size;
        self
    }

    pub fn head_title(mut self, title: impl Into<String>) -> Self {
        self.options.head_title = Some(title.into());
        self
    }

    /// Builds the container markup and its generated stylesheet.
    pub fn fragment(&self, table: &Table) -> HtmlFragment {
        let overlay = StyleOverlay::build(table, &self.options);
        let mut html = format!(r#"<div class="{}">"#, CONTAINER_CLASS);
        let mut rules: Vec<String> = Vec::new();

        for (key, text) in table.captions() {
            html.push_str(&format!(r#"<p class="{}">{}</p>"#, key, encode_text(text)));
            rules.extend(overlay.class_rule(CAPTION_SELECTOR, key));
        }

        match table.has_headers() {
            Err(err) => {
                html.push_str(&format!(
                    r#"<p class="{}">{}</p>"#,
                    keys::NO_HEADERS,
                    encode_text(&err.to_string())
                ));
                rules.extend(overlay.class_rule(CAPTION_SELECTOR, keys::NO_HEADERS));
            }
            Ok(()) => {
                html.push_str("<table>");
                self.push_header(table, &overlay, &mut html, &mut rules);
                match table.has_data() {
                    Err(err) => {
                        html.push_str(&format!(
                            r#"<tbody><tr><td colspan="{}" class="{}">{}</td></tr></tbody>"#,
                            table.col_count(),
                            keys::NO_ROWS,
                            encode_text(&err.to_string())
                        ));
                        rules.extend(overlay.class_rule(CELL_SELECTOR, keys::NO_ROWS));
                    }
                    Ok(()) => {
                        html.push_str("<tbody>");
                        for row in 0..table.row_count() {
                            self.push_row(table, row, &overlay, &mut html, &mut rules);
                        }
                        html.push_str("</tbody>");
                    }
                }
                html.push_str("</table>");
            }
        }

        html.push_str("</div>");
        HtmlFragment {
            html,
            css: rules.join("\n"),
        }
    }

    fn push_header(
        &self,
        table: &Table,
        overlay: &StyleOverlay,
        html: &mut String,
        rules: &mut Vec<String>,
    ) {
        html.push_str("<thead><tr>");
        for (c, col) in table.columns().iter().enumerate() {
            let key = keys::header(c);
            html.push_str(&format!(
                r#"<th class="{}">{}</th>"#,
                key,
                encode_text(&col.title)
            ));
            rules.extend(overlay.class_rule(HEADER_SELECTOR, &key));
        }
        html.push_str("</tr></thead>");

        for c in 0..table.col_count() {
            if let Some(decls) = overlay.get(&keys::column(c)) {
                rules.push(format!(
                    "{}:nth-child({}){}",
                    CELL_SELECTOR,
                    c + 1,
                    declaration_block(decls)
                ));
            }
        }
    }

    fn push_row(
        &self,
        table: &Table,
        row: usize,
        overlay: &StyleOverlay,
        html: &mut String,
        rules: &mut Vec<String>,
    ) {
        let mut classes: Vec<String> = Vec::new();
        let row_key = keys::row(row);
        if let Some(rule) = overlay.class_rule(ROW_SELECTOR, &row_key) {
            rules.push(rule);
            classes.push(row_key);
        }
        if table.draws_line_before(row) {
            classes.push(TOP_LINE_CLASS.to_string());
        }
        if table.has_line_after(row) {
            classes.push(BOTTOM_LINE_CLASS.to_string());
        }

        if classes.is_empty() {
            html.push_str("<tr>");
        } else {
            html.push_str(&format!(r#"<tr class="{}">"#, classes.join(" ")));
        }

        let ctx = table.format_context(Layout::Free);
        for (c, (col, cell)) in table
            .columns()
            .iter()
            .zip(table.rows()[row].cells())
            .enumerate()
        {
            let value = format_cell(cell, col, &ctx);
            let text = encode_text(&value);
            let key = keys::cell(row, c);
            match overlay.class_rule(CELL_SELECTOR, &key) {
                Some(rule) => {
                    rules.push(rule);
                    html.push_str(&format!(r#"<td class="{}">{}</td>"#, key, text));
                }
                None => html.push_str(&format!("<td>{}</td>", text)),
            }
        }
        html.push_str("</tr>");
    }

    /// Renders the full document through the resolved template.
    pub fn render_document(&self, table: &Table) -> Result<String, RenderError> {
        tracing::debug!(
            rows = table.row_count(),
            cols = table.col_count(),
            "rendering html table"
        );
        let template_src =
            ResourceChain::for_options(ResourceKind::Template, &self.options)?.resolve()?;
        let default_css =
            ResourceChain::for_options(ResourceKind::Stylesheet, &self.options)?.resolve()?;
        let template = DocumentTemplate::compile(template_src.content)?;

        let fragment = self.fragment(table);
        let ctx = DocumentContext {
            head_title: self
                .options
                .head_title
                .clone()
                .or_else(|| table.title().map(str::to_string))
                .unwrap_or_default(),
            default_css: style_block(&default_css.content),
            custom_css: style_block(&fragment.css),
            table_html: fragment.html,
            font_size: self.options.font_size,
        };
        let out = template.render(&ctx)?;
        tracing::info!("html output rendered");
        Ok(out)
    }
}

impl TableRenderer for HtmlRenderer {
    fn render(&self, table: &Table) -> Result<Vec<u8>, RenderError> {
        Ok(self.render_document(table)?.into_bytes())
    }
}
