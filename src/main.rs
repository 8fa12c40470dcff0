//! zonelist - Domain blacklist generator for DNS resolvers
//!
//! Merges domain lists, hosts files and Adblock Plus lists into a single
//! sorted blacklist rendered as a DNS zone.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use zonelist::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    // stdout carries the rendered list, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Generate { output, format } => {
            let fmt = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            zonelist::commands::generate::run(output.as_deref(), fmt, &cli.config).await
        }
        Commands::Validate => zonelist::commands::validate::run(&cli.config).await,
        Commands::Version => {
            println!("zonelist {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
