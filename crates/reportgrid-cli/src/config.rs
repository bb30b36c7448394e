//! YAML configuration file.
//!
//! ```yaml
//! log_level: info
//! text:
//!   col_space: 3
//! html:
//!   font_unit: px
//!   css_path: ./print.css
//! styles:
//!   title:
//!     font-weight: bold
//! converter: wkhtmltopdf
//! temp_dir: /tmp
//! pdf:
//!   - option: --quiet
//!   - option: --page-size
//!     value: A4
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reportgrid::{RenderOptions, StyleMap};
use reportgrid_pdf::PdfProperty;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    #[serde(flatten)]
    pub render: RenderOptions,
    /// Merged into every table's style map before rendering.
    pub styles: StyleMap,
    pub converter: Option<String>,
    /// Directory for the converter's input file; the working directory if unset.
    pub temp_dir: Option<PathBuf>,
    pub pdf: Vec<PdfProperty>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Filter directive for a configured level. Unknown levels log errors only.
pub fn level_directive(level: Option<&str>) -> &'static str {
    match level.map(str::to_ascii_lowercase).as_deref() {
        Some("debug") => "debug",
        Some("info") => "info",
        _ => "error",
    }
}
