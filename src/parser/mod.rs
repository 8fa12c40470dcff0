//! List format parsers (domain list, hosts file, Adblock Plus).

mod adblock;
mod domain_list;
mod hosts_file;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::{debug, warn};

pub use adblock::AdblockPlusParser;
pub use domain_list::DomainListParser;
pub use hosts_file::HostsFileParser;

use crate::config::{ListFormat, SourceDescriptor};
use crate::error::ZonelistError;
use crate::fetcher::ContentReader;
use crate::utils::truncate;
use crate::validation::line_is_comment;

/// One resolved domain together with the sources that named it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub domain: String,
    pub comments: Vec<String>,
}

impl Entry {
    pub fn new(domain: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            comments: vec![comment.into()],
        }
    }
}

/// Trait for list format parsers
#[async_trait]
pub trait ListParser: Send + Sync {
    /// Turn one non-comment line into an entry, or `None` to skip it.
    ///
    /// Skipped lines are logged by the implementation and never fail
    /// the source.
    fn parse_line(&self, line: &str, source: &SourceDescriptor) -> Option<Entry>;

    /// Read the whole stream and collect the entries of every usable line.
    ///
    /// Lines that are not valid UTF-8 are skipped like any other malformed
    /// line. Only I/O errors on the stream fail the source.
    async fn parse(
        &self,
        mut reader: ContentReader,
        source: &SourceDescriptor,
    ) -> Result<Vec<Entry>, ZonelistError> {
        let mut buf = Vec::new();
        let mut entries = Vec::new();
        let mut skipped = 0usize;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| ZonelistError::Parse {
                    source_name: source.name.clone(),
                    reason: e.to_string(),
                })?;
            if read == 0 {
                break;
            }

            let Some(line) = decode_line(&buf, source) else {
                skipped += 1;
                continue;
            };
            if line_is_comment(line) {
                continue;
            }

            match self.parse_line(line, source) {
                Some(entry) => entries.push(entry),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(source = %source.name, skipped, "lines skipped");
        }

        Ok(entries)
    }
}

/// Strip the line terminator and decode, `None` for invalid UTF-8
fn decode_line<'a>(raw: &'a [u8], source: &SourceDescriptor) -> Option<&'a str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

    match std::str::from_utf8(raw) {
        Ok(line) => Some(line),
        Err(e) => {
            warn!(
                source = %source.name,
                line = %truncate(&String::from_utf8_lossy(raw), 120),
                "invalid line found (encoding): {}", e
            );
            None
        }
    }
}

/// Maps list formats to their parser
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<ListFormat, Arc<dyn ListParser>>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in parsers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ListFormat::DomainList, DomainListParser);
        registry.register(ListFormat::HostsFile, HostsFileParser);
        registry.register(ListFormat::AdblockPlus, AdblockPlusParser);
        registry
    }

    /// Register a parser for a format, replacing any previous one
    pub fn register(&mut self, format: ListFormat, parser: impl ListParser + 'static) {
        self.parsers.insert(format, Arc::new(parser));
    }

    /// Look up the parser for a format
    pub fn get(&self, format: &ListFormat) -> Option<Arc<dyn ListParser>> {
        self.parsers.get(format).cloned()
    }

    /// Formats with a registered parser
    pub fn formats(&self) -> Vec<&ListFormat> {
        self.parsers.keys().collect()
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use crate::config::SourceAction;
    use crate::fetcher::inline_reader;

    pub fn source(name: &str, action: SourceAction, format: ListFormat) -> SourceDescriptor {
        SourceDescriptor::new(name, action, format)
    }

    /// Run a parser over inline content
    pub async fn parse_str(
        parser: &dyn ListParser,
        content: &str,
        source: &SourceDescriptor,
    ) -> Vec<Entry> {
        parser.parse(inline_reader(content), source).await.unwrap()
    }
}
