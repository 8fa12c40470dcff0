//! Error types for zonelist.
//!
//! Source-level failures are fatal to the run; line-level problems never
//! show up here, they are only logged by the parsers.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to open the byte stream behind a source.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("opening file {path:?}: {error}")]
    File {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("executing request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("neither content, file, nor url specified")]
    NotConfigured,
}

#[derive(Error, Debug)]
pub enum ZonelistError {
    #[error("getting source content for {source_name:?}: {cause}")]
    ContentSource {
        source_name: String,
        cause: ContentError,
    },

    #[error("unknown list format {format:?} for {source_name:?}")]
    UnknownFormat { source_name: String, format: String },

    #[error("invalid action {action:?} for {source_name:?}")]
    InvalidAction { source_name: String, action: String },

    #[error("reading content of {source_name:?}: {reason}")]
    Parse { source_name: String, reason: String },

    #[error("collecting entries failed for {} source(s):{}", .0.len(), list_errors(.0))]
    Aggregate(Vec<ZonelistError>),
}

impl ZonelistError {
    /// Name of the source this error belongs to, `None` for combined errors.
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::ContentSource { source_name, .. }
            | Self::UnknownFormat { source_name, .. }
            | Self::InvalidAction { source_name, .. }
            | Self::Parse { source_name, .. } => Some(source_name),
            Self::Aggregate(_) => None,
        }
    }
}

fn list_errors(errors: &[ZonelistError]) -> String {
    errors.iter().map(|e| format!("\n  - {}", e)).collect()
}
