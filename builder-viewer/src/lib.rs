//! # Page Builder Viewer
//!
//! Read-only viewer for saved designs. Loads a design document, runs the
//! renderer over its elements and writes a standalone HTML page (or the
//! rendered tree as JSON).
//!
//! ## Usage
//!
//! ```bash
//! builder-viewer --input design.json --output site/index.html
//! builder-viewer --input design.json --viewport mobile --title "Preview"
//! cat design.json | builder-viewer --input - --format tree
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use builder_core::{DesignDocument, DesignPersistence, JsonFilePersistence, ViewportClass};
use builder_renderer::{ExportConfig, HtmlExporter};
use clap::{Parser, ValueEnum};

/// Command-line arguments for builder-viewer.
#[derive(Debug, Clone, Parser)]
#[command(name = "builder-viewer")]
#[command(about = "Render a saved page design to HTML")]
#[command(version)]
pub struct CliArgs {
    /// Design document to render (`-` reads standard input)
    #[arg(long, short, env = "BUILDER_DESIGN")]
    pub input: PathBuf,

    /// Output file (defaults to standard output)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Viewport class to render at (desktop, tablet, mobile); defaults to the
    /// class saved in the document
    #[arg(long)]
    pub viewport: Option<ViewportClass>,

    /// Page title
    #[arg(long, default_value = "Page preview")]
    pub title: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Log format
    #[arg(long, value_enum, env = "RUST_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// What the viewer writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page.
    #[default]
    Html,
    /// Rendered canvas tree as JSON.
    Tree,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Viewer configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Design source; `-` is standard input.
    pub input: PathBuf,
    /// Destination; `None` is standard output.
    pub output: Option<PathBuf>,
    /// Viewport override.
    pub viewport: Option<ViewportClass>,
    /// Page title.
    pub title: String,
    /// Output format.
    pub format: OutputFormat,
}

impl From<CliArgs> for ViewerConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            input: args.input,
            output: args.output,
            viewport: args.viewport,
            title: args.title,
            format: args.format,
        }
    }
}

impl ViewerConfig {
    /// Whether the design is read from standard input.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    fn exporter(&self) -> HtmlExporter {
        HtmlExporter::new(ExportConfig {
            title: self.title.clone(),
            viewport: self.viewport,
            ..ExportConfig::default()
        })
    }
}

/// Load a design document from a file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not a valid design.
pub fn load_design(path: &Path) -> anyhow::Result<DesignDocument> {
    let persistence = JsonFilePersistence::new(path);
    match persistence
        .load()
        .with_context(|| format!("failed to load design from {}", path.display()))?
    {
        Some(document) => Ok(document),
        None => bail!("design file {} does not exist", path.display()),
    }
}

/// Parse a design document from standard input.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or is not a valid design.
pub fn read_design_stdin() -> anyhow::Result<DesignDocument> {
    let mut json = String::new();
    std::io::stdin()
        .read_to_string(&mut json)
        .context("failed to read standard input")?;
    DesignDocument::from_json(&json).context("invalid design on standard input")
}

/// Render a document in the configured format.
///
/// # Errors
///
/// Returns an error if the rendered tree cannot be serialized.
pub fn render_document(config: &ViewerConfig, document: &DesignDocument) -> anyhow::Result<String> {
    let exporter = config.exporter();
    let rendered = match config.format {
        OutputFormat::Html => exporter.export(document),
        OutputFormat::Tree => exporter.export_tree_json(document)?,
    };
    tracing::info!(
        elements = document.elements.len(),
        viewport = %exporter.viewport_for(document),
        format = ?config.format,
        "Rendered design"
    );
    Ok(rendered)
}

/// Load, render and write according to `config`.
///
/// Returns the rendered output when no output file is configured.
///
/// # Errors
///
/// Returns an error if loading, rendering or writing fails.
pub fn run(config: &ViewerConfig) -> anyhow::Result<Option<String>> {
    let document = if config.reads_stdin() {
        read_design_stdin()?
    } else {
        load_design(&config.input)?
    };
    let rendered = render_document(config, &document)?;

    let Some(path) = &config.output else {
        return Ok(Some(rendered));
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote output");
    Ok(None)
}
