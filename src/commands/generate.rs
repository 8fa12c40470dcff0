//! Generate command implementation.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::parser::ParserRegistry;
use crate::render::{render, OutputFormat};
use crate::utils::format_count;

/// Run the generate command
///
/// Nothing is written unless every provider was extracted successfully.
pub async fn run(output: Option<&Path>, format: OutputFormat, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    info!(
        "Generating blacklist from {} providers...",
        config.providers.len()
    );

    let aggregator = Aggregator::new(Fetcher::new()?, ParserRegistry::with_defaults());
    let blacklist = aggregator
        .aggregate(&config.providers)
        .await
        .context("Failed to generate blacklist")?;

    let rendered = render(format, &config.template, &blacklist)?;

    match output {
        Some(path) => {
            write_atomic(path, &rendered)?;
            info!(
                "Wrote {} entries to {}",
                format_count(blacklist.len()),
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write blacklist to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Write content to a file atomically
///
/// Uses tempfile + rename so readers never see a half-written zone.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temporary file in {:?}", parent_dir))?;

    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist output file: {:?}", path))?;

    Ok(())
}
