//! Adblock Plus filter lists, restricted to plain domain-anchored rules.
//!
//! Only `||domain^` (block) and `@@domain^` / `@@||domain^` (exception)
//! rules are understood. Blocking rules are used by blacklist sources,
//! exception rules by whitelist sources; everything carrying options,
//! paths or full URLs is skipped.

use tracing::debug;

use super::{Entry, ListParser};
use crate::config::{SourceAction, SourceDescriptor};
use crate::validation::is_valid_domain;

pub struct AdblockPlusParser;

impl ListParser for AdblockPlusParser {
    fn parse_line(&self, line: &str, source: &SourceDescriptor) -> Option<Entry> {
        let line = line.trim();

        let skip_reason = match &source.action {
            SourceAction::Blacklist if line.starts_with("@@") => Some("wrong mode"),
            SourceAction::Whitelist if line.starts_with("||") => Some("wrong mode"),
            _ if line.starts_with("|htt") => Some("unsupported format, schema"),
            _ if !line.ends_with('^') => Some("unsupported format, options"),
            _ => None,
        };
        if let Some(reason) = skip_reason {
            debug!(source = %source.name, rule = line, "skipping: {}", reason);
            return None;
        }

        let domain = line.strip_suffix('^').unwrap_or(line);
        let domain = domain.strip_prefix("@@").unwrap_or(domain);
        let domain = domain.strip_prefix("||").unwrap_or(domain);

        if !is_valid_domain(domain) {
            debug!(source = %source.name, domain, "skipping: not a valid domain");
            return None;
        }

        Some(Entry::new(domain, source.name.clone()))
    }
}
