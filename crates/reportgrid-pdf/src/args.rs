//! Converter command lines.

use std::ffi::OsString;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Marker asking the converter to write the PDF to standard output.
pub const STDOUT_MARKER: &str = "-";

/// One converter option, with or without a value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfProperty {
    pub option: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl PdfProperty {
    pub fn new(option: impl Into<String>, value: impl Into<String>) -> Self {
        PdfProperty {
            option: option.into(),
            value: Some(value.into()),
        }
    }

    /// An option that takes no value, such as `--quiet`.
    pub fn flag(option: impl Into<String>) -> Self {
        PdfProperty {
            option: option.into(),
            value: None,
        }
    }

    /// The value, if any. An empty value makes the option a flag.
    fn pair_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Builds the converter arguments for `input`.
///
/// Valueless flags come first, then option/value pairs, each group in the
/// order given. Properties with an empty option are skipped. The input path
/// and [`STDOUT_MARKER`] close the list.
pub fn build_args(props: &[PdfProperty], input: &Path) -> Vec<OsString> {
    let props = props.iter().filter(|p| !p.option.is_empty());
    let mut args: Vec<OsString> = props
        .clone()
        .filter(|p| p.pair_value().is_none())
        .map(|p| OsString::from(&p.option))
        .collect();
    for prop in props {
        if let Some(value) = prop.pair_value() {
            args.push(OsString::from(&prop.option));
            args.push(OsString::from(value));
        }
    }
    args.push(input.as_os_str().to_os_string());
    args.push(OsString::from(STDOUT_MARKER));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_before_valued_options() {
        let props = [
            PdfProperty::new("--page-size", "A4"),
            PdfProperty::flag("--quiet"),
            PdfProperty::new("--orientation", "Landscape"),
            PdfProperty::flag("--grayscale"),
        ];
        let args = build_args(&props, Path::new("/tmp/in.html"));
        assert_eq!(
            args,
            [
                "--quiet",
                "--grayscale",
                "--page-size",
                "A4",
                "--orientation",
                "Landscape",
                "/tmp/in.html",
                "-",
            ]
            .map(OsString::from)
        );
    }

    #[test]
    fn no_properties() {
        let args = build_args(&[], Path::new("in.html"));
        assert_eq!(args, [OsString::from("in.html"), OsString::from("-")]);
    }

    #[test]
    fn empty_value_is_a_flag_and_empty_option_is_dropped() {
        let props = [
            PdfProperty::new("--page-size", "A4"),
            PdfProperty::new("--quiet", ""),
            PdfProperty::flag(""),
            PdfProperty::new("", "ignored"),
        ];
        let args = build_args(&props, Path::new("in.html"));
        assert_eq!(
            args,
            ["--quiet", "--page-size", "A4", "in.html", "-"].map(OsString::from)
        );
    }

    #[test]
    fn deserializes_flag_without_value() {
        let props: Vec<PdfProperty> = serde_json::from_str(
            r#"[{"option":"--quiet"},{"option":"--dpi","value":"300"}]"#,
        )
        .unwrap();
        assert_eq!(props[0], PdfProperty::flag("--quiet"));
        assert_eq!(props[1], PdfProperty::new("--dpi", "300"));
    }
}
