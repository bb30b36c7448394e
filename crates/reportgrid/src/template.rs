//! HTML document assembly.
//!
//! The resolved document template is a MiniJinja template that receives a
//! [`DocumentContext`]. Values are inserted raw (auto-escaping is off) since
//! the stylesheet and table markup are already HTML; templates should pipe
//! `head_title` through `| e`.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use crate::error::RenderError;

const DOCUMENT: &str = "document";

/// Substitution points available to document templates.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DocumentContext {
    /// Document title text.
    pub head_title: String,
    /// The default stylesheet wrapped in a `<style>` element.
    pub default_css: String,
    /// The generated per-table stylesheet wrapped in a `<style>` element.
    pub custom_css: String,
    /// The `div.rpt-table-container` fragment.
    pub table_html: String,
    /// Pixel character width used for `px` column sizing.
    pub font_size: u32,
}

/// A compiled document template.
pub struct DocumentTemplate {
    env: Environment<'static>,
}

impl DocumentTemplate {
    /// Compiles `source`. Syntax errors are returned, not recovered from.
    pub fn compile(source: impl Into<String>) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template_owned(DOCUMENT, source.into()).map_err(|e| {
            tracing::error!(error = %e, "document template does not compile");
            RenderError::Template(e)
        })?;
        Ok(DocumentTemplate { env })
    }

    pub fn render(&self, ctx: &DocumentContext) -> Result<String, RenderError> {
        let render = || -> Result<String, minijinja::Error> {
            self.env.get_template(DOCUMENT)?.render(ctx)
        };
        render().map_err(|e| {
            tracing::error!(error = %e, "document template failed to render");
            RenderError::Template(e)
        })
    }
}

/// Wraps CSS text in a `<style>` element.
pub fn style_block(css: &str) -> String {
    format!("<style>{}</style>", css)
}
