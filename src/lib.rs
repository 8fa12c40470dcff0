//! # zonelist - Domain Blacklist Generator for DNS Resolvers
//!
//! Collects domains from many community blocklists, removes whitelisted
//! domains and renders the result as a DNS response-policy zone (or any
//! other text format through a template).
//!
//! ## Features
//!
//! - **Three list formats** - plain domain lists, hosts files, Adblock Plus
//! - **Concurrent extraction** - every source is fetched and parsed in its own task
//! - **Provenance** - each entry remembers which sources listed it
//! - **Whitelisting** - whitelist sources are subtracted by exact match
//! - **All-or-nothing** - a single failing source aborts the run, nothing is written
//! - **Templates** - BIND RPZ by default, IDNA names rendered as punycode
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        zonelist                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: generate, validate, version                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Providers: name, action, type, content/file/url      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls, tokio-util)                     │
//! │    └── Inline text, local files, HTTP(S) streams            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Parsers (ListParser trait, ParserRegistry)                 │
//! │    ├── DomainListParser                                     │
//! │    ├── HostsFileParser (regex)                              │
//! │    └── AdblockPlusParser                                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Aggregator (tokio tasks + mpsc)                            │
//! │    └── Deduplication, whitelist subtraction, sorting        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Render (zone template, serde_json)                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use zonelist::aggregator::Aggregator;
//! use zonelist::config::Config;
//! use zonelist::fetcher::Fetcher;
//! use zonelist::parser::ParserRegistry;
//! use zonelist::render::{render, OutputFormat};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!
//!     let aggregator = Aggregator::new(Fetcher::new()?, ParserRegistry::with_defaults());
//!     let blacklist = aggregator.aggregate(&config.providers).await?;
//!
//!     print!("{}", render(OutputFormat::Zone, &config.template, &blacklist)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`aggregator`] - Concurrent extraction, deduplication and whitelist subtraction
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Error types for extraction and aggregation
//! - [`fetcher`] - Content sources (inline, file, HTTP)
//! - [`parser`] - List format parsers
//! - [`render`] - Zone template and JSON output
//! - [`utils`] - Common utility functions (formatting, truncation)
//! - [`validation`] - Domain name validation and noise filtering

pub mod aggregator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod parser;
pub mod render;
pub mod utils;
pub mod validation;

pub use aggregator::Aggregator;
pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::ZonelistError;
pub use parser::{Entry, ParserRegistry};
