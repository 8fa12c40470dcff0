//! Plain domain lists: one domain per line, optional trailing `#` comment.

use tracing::{debug, warn};

use super::{Entry, ListParser};
use crate::config::SourceDescriptor;
use crate::utils::truncate;
use crate::validation::{is_generic_noise, is_valid_domain};

pub struct DomainListParser;

impl ListParser for DomainListParser {
    fn parse_line(&self, line: &str, source: &SourceDescriptor) -> Option<Entry> {
        let domain = line.split('#').next().unwrap_or_default().trim();

        if domain.contains(' ') {
            warn!(source = %source.name, line = %truncate(line, 120), "invalid line found");
            return None;
        }

        if is_generic_noise(domain) {
            debug!(source = %source.name, domain, "skipping generic noise entry");
            return None;
        }

        if !is_valid_domain(domain) {
            debug!(source = %source.name, domain, "skipping: not a valid domain");
            return None;
        }

        Some(Entry::new(domain, source.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use super::*;
    use crate::config::{ListFormat, SourceAction};

    fn list_source() -> SourceDescriptor {
        source("Local Blacklist", SourceAction::Blacklist, ListFormat::DomainList)
    }

    #[test]
    fn test_trailing_comment_stripped() {
        let entry = DomainListParser
            .parse_line("foo.example.com # nb", &list_source())
            .unwrap();
        assert_eq!(entry, Entry::new("foo.example.com", "Local Blacklist"));
    }

    #[test]
    fn test_internal_space_rejected() {
        assert!(DomainListParser
            .parse_line("foo.example.com bar.example.com", &list_source())
            .is_none());
    }

    #[test]
    fn test_generic_noise_rejected() {
        let source = list_source();
        assert!(DomainListParser.parse_line("localhost", &source).is_none());
        assert!(DomainListParser
            .parse_line("localhost.localdomain", &source)
            .is_none());
        assert!(DomainListParser.parse_line("broadcasthost", &source).is_none());
    }

    #[test]
    fn test_invalid_domain_rejected() {
        let source = list_source();
        assert!(DomainListParser.parse_line("192.168.0.1", &source).is_none());
        assert!(DomainListParser
            .parse_line("||ads.example.com^", &source)
            .is_none());
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let entry = DomainListParser
            .parse_line("  \tads.example.com  ", &list_source())
            .unwrap();
        assert_eq!(entry.domain, "ads.example.com");
    }

    #[tokio::test]
    async fn test_parse_full_list() {
        let content = "\
# Blocklist header
; another comment style

a.example.com
b.example.com # inline note
not a domain
localhost
c.example.com
";
        let entries = parse_str(&DomainListParser, content, &list_source()).await;
        let domains: Vec<&str> = entries.iter().map(|e| e.domain.as_str()).collect();
        assert_eq!(domains, vec!["a.example.com", "b.example.com", "c.example.com"]);
        assert!(entries.iter().all(|e| e.comments == vec!["Local Blacklist"]));
    }

    #[tokio::test]
    async fn test_parse_keeps_duplicates() {
        // Merging duplicates is the aggregator's job
        let entries = parse_str(
            &DomainListParser,
            "a.example.com\na.example.com\n",
            &list_source(),
        )
        .await;
        assert_eq!(entries.len(), 2);
    }
}
