//! Cell formatting shared by every renderer.
//!
//! [`format_cell`] is the single dispatch point from a typed [`Cell`] to its
//! text. Only string cells differ between renderers: the text renderer wraps
//! them (see [`crate::render::text`]), CSV and HTML use them verbatim.
//!
//! Numbers are placed into the column's [`PrintMask`], a parsed printf-style
//! directive such as `%-10s`, `%8d` or `$%.1f`. The sign of the width decides
//! justification, so a left-justified column gets `%-Ws` and a right-justified
//! one `%Ws` unless the caller supplies a mask.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::TableError;
use crate::table::{Cell, ColumnDefinition, Justify};
use crate::util::{clip_to_width, display_width, pad_left, pad_right, repeat_char};

/// Whether values are fitted to the column width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Fixed-width grid: masks pad to width, dates are truncated to width,
    /// unset cells become blank runs.
    Fixed,
    /// Width-independent fields (CSV, HTML): no padding, no truncation.
    Free,
}

/// Table-level formatting inputs.
#[derive(Clone, Copy, Debug)]
pub struct FormatContext<'a> {
    pub date_format: &'a str,
    pub datetime_format: &'a str,
    pub layout: Layout,
}

/// Conversion verb of a print mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Decimal,
    Float,
    Str,
}

/// A parsed printf-style directive with optional literal text around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintMask {
    source: String,
    prefix: String,
    suffix: String,
    left: bool,
    zero: bool,
    plus: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: Verb,
}

/// Argument handed to a mask.
#[derive(Clone, Copy, Debug)]
pub enum MaskArg<'a> {
    Int(i64),
    Text(&'a str),
}

impl PrintMask {
    /// Parses a mask holding exactly one `%` directive; `%%` is a literal `%`.
    ///
    /// Supported: flags `-`, `+`, `0`, a width, a `.precision`, and the verbs
    /// `d`, `f`, `s` and `v` (`v` behaves like `s`).
    pub fn parse(mask: &str) -> Result<Self, TableError> {
        let invalid = |reason: &str| TableError::InvalidPrintMask {
            mask: mask.to_string(),
            reason: reason.to_string(),
        };

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut directive: Option<(bool, bool, bool, Option<usize>, Option<usize>, Verb)> = None;
        let mut chars = mask.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                if directive.is_some() {
                    suffix.push(c);
                } else {
                    prefix.push(c);
                }
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                if directive.is_some() {
                    suffix.push('%');
                } else {
                    prefix.push('%');
                }
                continue;
            }
            if directive.is_some() {
                return Err(invalid("more than one directive"));
            }

            let (mut left, mut zero, mut plus) = (false, false, false);
            while let Some(&flag) = chars.peek() {
                match flag {
                    '-' => left = true,
                    '0' => zero = true,
                    '+' => plus = true,
                    _ => break,
                }
                chars.next();
            }

            let width = take_number(&mut chars);
            let precision = if chars.peek() == Some(&'.') {
                chars.next();
                Some(take_number(&mut chars).unwrap_or(0))
            } else {
                None
            };

            let verb = match chars.next() {
                Some('d') => Verb::Decimal,
                Some('f') => Verb::Float,
                Some('s') | Some('v') => Verb::Str,
                Some(other) => return Err(invalid(&format!("unsupported verb '{}'", other))),
                None => return Err(invalid("directive has no verb")),
            };
            directive = Some((left, zero, plus, width, precision, verb));
        }

        let (left, zero, plus, width, precision, verb) =
            directive.ok_or_else(|| invalid("no directive"))?;

        Ok(PrintMask {
            source: mask.to_string(),
            prefix,
            suffix,
            left,
            zero,
            plus,
            width,
            precision,
            verb,
        })
    }

    /// The default mask for a column: `%-Ws` or `%Ws` depending on justify.
    pub fn for_column(justify: Justify, width: usize) -> Self {
        let left = justify == Justify::Left;
        PrintMask {
            source: format!("%{}{}s", if left { "-" } else { "" }, width),
            prefix: String::new(),
            suffix: String::new(),
            left,
            zero: false,
            plus: false,
            width: Some(width),
            precision: None,
            verb: Verb::Str,
        }
    }

    /// The mask text as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Formats `arg`. Under [`Layout::Free`] the width is ignored.
    pub fn apply(&self, arg: MaskArg<'_>, layout: Layout) -> String {
        let (sign, body) = match (self.verb, arg) {
            (Verb::Decimal, MaskArg::Int(i)) => {
                let mut digits = i.unsigned_abs().to_string();
                if let Some(p) = self.precision {
                    if digits.len() < p {
                        digits = format!("{}{}", "0".repeat(p - digits.len()), digits);
                    }
                }
                (self.sign_for(i < 0), digits)
            }
            (Verb::Float, MaskArg::Int(i)) => {
                let p = self.precision.unwrap_or(6);
                let value = i as f64;
                (self.sign_for(value < 0.0), format!("{:.*}", p, value.abs()))
            }
            (Verb::Str, MaskArg::Int(i)) => ("", i.to_string()),
            (_, MaskArg::Text(s)) => {
                let text = match (self.verb, self.precision) {
                    (Verb::Str, Some(p)) => clip_to_width(s, p),
                    _ => s.to_string(),
                };
                ("", text)
            }
        };

        let numeric = matches!(arg, MaskArg::Int(_));
        let field = match (layout, self.width) {
            (Layout::Fixed, Some(width)) => {
                let content_width = sign.len() + display_width(&body);
                if self.zero && !self.left && numeric && content_width < width {
                    format!("{}{}{}", sign, "0".repeat(width - content_width), body)
                } else if self.left {
                    pad_right(&format!("{}{}", sign, body), width)
                } else {
                    pad_left(&format!("{}{}", sign, body), width)
                }
            }
            _ => format!("{}{}", sign, body),
        };

        format!("{}{}{}", self.prefix, field, self.suffix)
    }

    fn sign_for(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else {
            ""
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits.parse().ok()
}

/// Thousands-grouped, two-decimal rendering of a float (`#,###.##`).
///
/// ```rust
/// use reportgrid::format::humanize_float;
///
/// assert_eq!(humanize_float(1234567.891), "1,234,567.89");
/// assert_eq!(humanize_float(-1234.5), "-1,234.50");
/// ```
pub fn humanize_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((&rounded, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let is_zero = int_part.chars().chain(frac_part.chars()).all(|c| c == '0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Checks that a strftime-style format can render a date.
///
/// Unknown specifiers are rejected, and so are time fields, which a date
/// has no value for.
pub fn validate_date_format(fmt: &str) -> Result<(), TableError> {
    check_specifiers(fmt)?;
    check_renders(NaiveDate::default().format(fmt), fmt)
}

/// Checks that a strftime-style format can render a date-time.
pub fn validate_datetime_format(fmt: &str) -> Result<(), TableError> {
    check_specifiers(fmt)?;
    check_renders(NaiveDateTime::default().format(fmt), fmt)
}

fn check_specifiers(fmt: &str) -> Result<(), TableError> {
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(TableError::InvalidDateFormat(fmt.to_string()));
    }
    Ok(())
}

fn check_renders<T: std::fmt::Display>(value: T, fmt: &str) -> Result<(), TableError> {
    let mut out = String::new();
    write!(out, "{}", value).map_err(|_| TableError::InvalidDateFormat(fmt.to_string()))
}

fn format_temporal<T: std::fmt::Display>(value: T, fmt: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", value).is_err() {
        tracing::error!(format = fmt, "date value cannot be rendered with this format");
        out.clear();
    }
    out
}

/// Formats a single cell for `column`.
///
/// String cells come back verbatim (text-mode wrapping is done by the grid
/// engine, which calls [`format_text_line`] per fragment).
pub fn format_cell(cell: &Cell, column: &ColumnDefinition, ctx: &FormatContext<'_>) -> String {
    let mask = column.mask();
    match cell {
        Cell::Float(f) => fit_number(
            mask.apply(MaskArg::Text(&humanize_float(*f)), ctx.layout),
            column,
            ctx.layout,
        ),
        Cell::Integer(i) => {
            fit_number(mask.apply(MaskArg::Int(*i), ctx.layout), column, ctx.layout)
        }
        Cell::Text(s) => s.clone(),
        Cell::Date(d) => {
            let fmt = column.date_format.as_deref().unwrap_or(ctx.date_format);
            fit_temporal(format_temporal(d.format(fmt), fmt), column.width, ctx.layout)
        }
        Cell::DateTime(dt) => {
            let fmt = column.datetime_format.as_deref().unwrap_or(ctx.datetime_format);
            fit_temporal(format_temporal(dt.format(fmt), fmt), column.width, ctx.layout)
        }
        Cell::Unset => match ctx.layout {
            Layout::Fixed => repeat_char(' ', column.width),
            Layout::Free => String::new(),
        },
    }
}

/// A number that does not fit a fixed grid is shown as a run of `#`.
/// A narrower mask is padded out to the column per its justification.
fn fit_number(text: String, column: &ColumnDefinition, layout: Layout) -> String {
    let width = column.width;
    match (layout, column.justify) {
        (Layout::Free, _) => text,
        (Layout::Fixed, _) if display_width(&text) > width => repeat_char('#', width),
        (Layout::Fixed, Justify::Left) => pad_right(&text, width),
        (Layout::Fixed, Justify::Right) => pad_left(&text, width),
    }
}

/// Places one wrapped fragment of a string cell into the column mask.
///
/// The result is exactly the column width even when a custom mask is
/// narrower or carries literal text.
pub fn format_text_line(fragment: &str, column: &ColumnDefinition) -> String {
    let text = column.mask().apply(MaskArg::Text(fragment), Layout::Fixed);
    fit_to_column(&text, column)
}

/// Clips `text` to the column width and pads it per the column's justify.
pub fn fit_to_column(text: &str, column: &ColumnDefinition) -> String {
    let clipped = clip_to_width(text, column.width);
    match column.justify {
        Justify::Left => pad_right(&clipped, column.width),
        Justify::Right => pad_left(&clipped, column.width),
    }
}

/// Dates are right-aligned and cut to the column width in a fixed grid.
fn fit_temporal(text: String, width: usize, layout: Layout) -> String {
    match layout {
        Layout::Fixed => pad_left(&clip_to_width(&text, width), width),
        Layout::Free => text,
    }
}
