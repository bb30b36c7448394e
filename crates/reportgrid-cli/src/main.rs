//! `reportgrid`: render tables from a YAML/JSON file as text, CSV, HTML or PDF.

mod config;
mod input;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use reportgrid::{
    CsvRenderer, FontUnit, HtmlRenderer, PositionTemplates, Report, TextRenderer,
};
use reportgrid_pdf::PdfConverter;
use tracing_subscriber::EnvFilter;

use crate::config::{level_directive, Config};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Html,
    Pdf,
}

#[derive(Parser, Debug)]
#[command(name = "reportgrid", version, about = "Render report tables")]
struct Cli {
    /// Table file (YAML, or JSON with a .json extension). Without it a sample
    /// table is rendered.
    input: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// YAML config with render options, styles and converter flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// debug, info or error (anything else means error)
    #[arg(long)]
    log_level: Option<String>,

    /// Directory with firstTable.tmpl, middleTable.tmpl and lastTable.tmpl
    #[arg(long)]
    position_templates: Option<PathBuf>,

    /// Rows in the sample table
    #[arg(long, default_value_t = 10)]
    sample_rows: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_tracing(cli.log_level.as_deref().or(config.log_level.as_deref()));

    let bytes = run(&cli, &config).map_err(|err| {
        tracing::error!("rendering failed: {err:#}");
        err
    })?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?
        }
        None => io::stdout().lock().write_all(&bytes)?,
    }
    Ok(())
}

fn init_tracing(level: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level_directive(level)))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli, config: &Config) -> Result<Vec<u8>> {
    let mut tables = match &cli.input {
        Some(path) => input::load_tables(path)?,
        None => vec![input::sample_table(cli.sample_rows)?],
    };
    for table in &mut tables {
        table.merge_styles(&config.styles);
    }
    tracing::info!(tables = tables.len(), format = ?cli.format, "rendering");

    let report = Report::with_tables(tables);
    let positions = cli.position_templates.as_ref().map(PositionTemplates::in_dir);
    let html_renderer = |unit: Option<FontUnit>| {
        let renderer = HtmlRenderer::from_options(config.render.html.clone());
        match unit {
            Some(unit) => renderer.font_unit(unit),
            None => renderer,
        }
    };

    let bytes = match cli.format {
        OutputFormat::Text => {
            report.render_with(&TextRenderer::from_options(&config.render.text))?
        }
        // A lone table gets no trailing blank record.
        OutputFormat::Csv if report.tables().len() == 1 => {
            report.render_with(&CsvRenderer::new())?
        }
        OutputFormat::Csv => report.render_csv(&CsvRenderer::new())?,
        OutputFormat::Html => report.render_html(&html_renderer(None), positions.as_ref())?,
        OutputFormat::Pdf => {
            let html = report.render_html(&html_renderer(Some(FontUnit::Px)), positions.as_ref())?;
            let html = String::from_utf8(html).context("html output is not UTF-8")?;
            let mut converter = PdfConverter::new();
            if let Some(program) = &config.converter {
                converter = converter.program(program);
            }
            if let Some(dir) = &config.temp_dir {
                converter = converter.temp_dir(dir);
            }
            converter.convert(&html, &config.pdf)?
        }
    };
    Ok(bytes)
}
