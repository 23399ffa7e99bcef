//! # Page Builder Viewer
//!
//! Renders a saved design to HTML from the command line.

use std::io::Write;

use builder_viewer::{run, CliArgs, LogFormat, ViewerConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing on stderr so rendered output can go to stdout.
///
/// Set `RUST_LOG` to control log levels (default: info,builder_core=debug,builder_renderer=debug).
/// Use `--log-format json` or `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,builder_core=debug,builder_renderer=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.log_format);

    let config = ViewerConfig::from(args);
    tracing::debug!(input = %config.input.display(), "Starting builder viewer");

    if let Some(rendered) = run(&config)? {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}
