//! Column definitions.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::format::{validate_date_format, validate_datetime_format, PrintMask};

/// Horizontal alignment of a column's content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
}

impl Justify {
    /// The CSS `text-align` value for this justification.
    pub fn css_value(self) -> &'static str {
        match self {
            Justify::Left => "left",
            Justify::Right => "right",
        }
    }
}

/// Layout and formatting metadata for one column.
///
/// Built fluently:
///
/// ```rust
/// use reportgrid::{ColumnDefinition, Justify};
///
/// let col = ColumnDefinition::new("Amount", 12)
///     .right()
///     .print_mask("%12d")
///     .unwrap();
/// assert_eq!(col.justify, Justify::Right);
/// assert_eq!(col.mask().source(), "%12d");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColumnRaw", into = "ColumnRaw")]
pub struct ColumnDefinition {
    /// Header text.
    pub title: String,
    /// Width in display columns.
    pub width: usize,
    pub justify: Justify,
    /// Width used by the HTML renderer instead of `width`.
    pub html_width: Option<usize>,
    /// Overrides the table's date format for this column.
    pub date_format: Option<String>,
    /// Overrides the table's date-time format for this column.
    pub datetime_format: Option<String>,
    mask: Option<PrintMask>,
}

impl ColumnDefinition {
    /// Creates a left-justified column with the default mask.
    pub fn new(title: impl Into<String>, width: usize) -> Self {
        ColumnDefinition {
            title: title.into(),
            width,
            justify: Justify::Left,
            html_width: None,
            date_format: None,
            datetime_format: None,
            mask: None,
        }
    }

    /// Sets the justification.
    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Right-justify (shorthand for `.justify(Justify::Right)`).
    pub fn right(self) -> Self {
        self.justify(Justify::Right)
    }

    /// Left-justify (shorthand for `.justify(Justify::Left)`).
    pub fn left(self) -> Self {
        self.justify(Justify::Left)
    }

    /// Sets an explicit printf-style mask for numeric values.
    pub fn print_mask(mut self, mask: &str) -> Result<Self, TableError> {
        self.mask = Some(PrintMask::parse(mask)?);
        Ok(self)
    }

    /// Sets a strftime-style format for date cells in this column.
    pub fn date_format(mut self, fmt: &str) -> Result<Self, TableError> {
        validate_date_format(fmt)?;
        self.date_format = Some(fmt.to_string());
        Ok(self)
    }

    /// Sets a strftime-style format for date-time cells in this column.
    pub fn datetime_format(mut self, fmt: &str) -> Result<Self, TableError> {
        validate_datetime_format(fmt)?;
        self.datetime_format = Some(fmt.to_string());
        Ok(self)
    }

    /// Sets the HTML width.
    pub fn html_width(mut self, width: usize) -> Self {
        self.html_width = Some(width);
        self
    }

    /// The effective mask: the explicit one, or `%-Ws`/`%Ws` from justify.
    pub fn mask(&self) -> Cow<'_, PrintMask> {
        match &self.mask {
            Some(mask) => Cow::Borrowed(mask),
            None => Cow::Owned(PrintMask::for_column(self.justify, self.width)),
        }
    }

    /// Whether a mask was set explicitly.
    pub fn has_custom_mask(&self) -> bool {
        self.mask.is_some()
    }

    /// The width the HTML renderer uses.
    pub fn effective_html_width(&self) -> usize {
        self.html_width.unwrap_or(self.width)
    }
}

/// Serialized form; the mask travels as its source text.
#[derive(Serialize, Deserialize)]
struct ColumnRaw {
    title: String,
    width: usize,
    #[serde(default)]
    justify: Justify,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    print_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    datetime_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    html_width: Option<usize>,
}

impl From<ColumnDefinition> for ColumnRaw {
    fn from(col: ColumnDefinition) -> Self {
        ColumnRaw {
            print_mask: col.mask.map(|m| m.source().to_string()),
            title: col.title,
            width: col.width,
            justify: col.justify,
            date_format: col.date_format,
            datetime_format: col.datetime_format,
            html_width: col.html_width,
        }
    }
}

impl TryFrom<ColumnRaw> for ColumnDefinition {
    type Error = TableError;

    fn try_from(raw: ColumnRaw) -> Result<Self, Self::Error> {
        let mut col = ColumnDefinition::new(raw.title, raw.width).justify(raw.justify);
        if let Some(mask) = raw.print_mask {
            col = col.print_mask(&mask)?;
        }
        if let Some(fmt) = raw.date_format {
            col = col.date_format(&fmt)?;
        }
        if let Some(fmt) = raw.datetime_format {
            col = col.datetime_format(&fmt)?;
        }
        col.html_width = raw.html_width;
        Ok(col)
    }
}
