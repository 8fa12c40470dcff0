//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zonelist")]
#[command(author, version, about = "Domain blacklist generator for DNS resolvers")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    pub config: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output, including skipped lines)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all providers and write the aggregated blacklist
    Generate {
        /// Write to this file instead of stdout (replaced atomically)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (zone, json)
        #[arg(short, long, default_value = "zone")]
        format: String,
    },

    /// Check the configuration without fetching anything
    Validate,

    /// Show version
    Version,
}
