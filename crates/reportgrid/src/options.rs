//! Renderer options.
//!
//! All option structs deserialize with defaults for missing fields, so a
//! config file only needs to name what it changes:
//!
//! ```yaml
//! text:
//!   col_space: 3
//! html:
//!   font_unit: px
//!   css_path: ./report.css
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default spacer width between text columns.
pub const DEFAULT_COL_SPACE: usize = 2;
/// Default separator fill character.
pub const DEFAULT_FILL: char = '-';
/// Default pixel width of one character for `px` sizing.
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// Options for every renderer, as read from a config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub text: TextOptions,
    pub html: HtmlOptions,
}

/// Text grid options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Spaces between adjacent columns.
    pub col_space: usize,
    /// Character separator rules are drawn with.
    pub fill: char,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            col_space: DEFAULT_COL_SPACE,
            fill: DEFAULT_FILL,
        }
    }
}

/// Unit used for HTML column widths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontUnit {
    #[default]
    Ch,
    Px,
    Em,
}

impl FontUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            FontUnit::Ch => "ch",
            FontUnit::Px => "px",
            FontUnit::Em => "em",
        }
    }
}

impl fmt::Display for FontUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// HTML renderer options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlOptions {
    /// Custom document template, tried before any other source.
    pub template_path: Option<PathBuf>,
    /// Custom default stylesheet, tried before any other source.
    pub css_path: Option<PathBuf>,
    /// Look for `tmpl/reportgrid.tmpl` and `reportgrid.css` next to the
    /// running executable.
    pub search_exe_dir: bool,
    pub font_unit: FontUnit,
    /// Pixel width of a character; multiplies column widths in `px` mode.
    pub font_size: u32,
    /// Document title; defaults to the table title.
    pub head_title: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            template_path: None,
            css_path: None,
            search_exe_dir: true,
            font_unit: FontUnit::Ch,
            font_size: DEFAULT_FONT_SIZE,
            head_title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = RenderOptions::default();
        assert_eq!(opts.text.col_space, 2);
        assert_eq!(opts.text.fill, '-');
        assert_eq!(opts.html.font_unit, FontUnit::Ch);
        assert_eq!(opts.html.font_size, 14);
        assert!(opts.html.search_exe_dir);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "text:\n  col_space: 4\nhtml:\n  font_unit: px\n";
        let opts: RenderOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(opts.text.col_space, 4);
        assert_eq!(opts.text.fill, '-');
        assert_eq!(opts.html.font_unit, FontUnit::Px);
        assert_eq!(opts.html.font_size, 14);
    }

    #[test]
    fn unit_suffix() {
        assert_eq!(FontUnit::Px.to_string(), "px");
        assert_eq!(FontUnit::Em.suffix(), "em");
    }
}
