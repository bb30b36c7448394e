use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use reportgrid::{FontUnit, HtmlOptions, HtmlRenderer, RenderError, Table};
use thiserror::Error;

use crate::args::{build_args, PdfProperty};

/// Converter used when none is configured.
pub const DEFAULT_PROGRAM: &str = "wkhtmltopdf";

const TEMP_PREFIX: &str = "tablePDF_";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("converter failed with {status}: {stderr}")]
    ConverterFailed { status: ExitStatus, stderr: String },
}

/// Runs an external HTML to PDF converter.
///
/// The HTML is written to a temporary file in `temp_dir`; the file is removed
/// when conversion returns, whether it succeeded or not.
#[derive(Clone, Debug)]
pub struct PdfConverter {
    program: String,
    temp_dir: PathBuf,
}

impl Default for PdfConverter {
    fn default() -> Self {
        PdfConverter {
            program: DEFAULT_PROGRAM.to_string(),
            temp_dir: PathBuf::from("."),
        }
    }
}

impl PdfConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Converts a complete HTML document and returns the PDF bytes.
    pub fn convert(&self, html: &str, props: &[PdfProperty]) -> Result<Vec<u8>, PdfError> {
        let mut input = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".html")
            .tempfile_in(&self.temp_dir)
            .map_err(|e| {
                tracing::error!(dir = %self.temp_dir.display(), error = %e, "cannot create converter input file");
                PdfError::Io(e)
            })?;
        write_document(&mut input, html)?;

        let args = build_args(props, input.path());
        tracing::debug!(program = %self.program, ?args, "converter command line");

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| {
                tracing::error!(program = %self.program, error = %source, "converter did not start");
                PdfError::Spawn {
                    program: self.program.clone(),
                    source,
                }
            })?;

        // Both pipes are read to the end before the exit status is collected.
        let output = child
            .wait_with_output()
            .map_err(io_failure("reading converter output"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(status = %output.status, %stderr, "converter failed");
            return Err(PdfError::ConverterFailed {
                status: output.status,
                stderr,
            });
        }

        tracing::info!(bytes = output.stdout.len(), "pdf output rendered");
        Ok(output.stdout)
    }

    /// Renders `table` as HTML with pixel widths and converts it.
    pub fn render_table(
        &self,
        table: &Table,
        options: &HtmlOptions,
        props: &[PdfProperty],
    ) -> Result<Vec<u8>, PdfError> {
        let mut options = options.clone();
        options.font_unit = FontUnit::Px;
        let html = HtmlRenderer::from_options(options).render_document(table)?;
        self.convert(&html, props)
    }
}

fn write_document(out: &mut impl Write, html: &str) -> Result<(), PdfError> {
    out.write_all(html.as_bytes())
        .and_then(|()| out.flush())
        .map_err(io_failure("writing converter input"))
}

/// Logs an IO failure during `step` before it is returned.
fn io_failure(step: &'static str) -> impl FnOnce(std::io::Error) -> PdfError {
    move |err| {
        tracing::error!(error = %err, "{step} failed");
        PdfError::Io(err)
    }
}

/// [`PdfConverter::render_table`] with the default converter.
pub fn render_pdf(
    table: &Table,
    options: &HtmlOptions,
    props: &[PdfProperty],
) -> Result<Vec<u8>, PdfError> {
    PdfConverter::default().render_table(table, options, props)
}
