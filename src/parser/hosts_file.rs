//! Hosts files: `<address> <hostname> [# comment]`.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use super::{Entry, ListParser};
use crate::config::SourceDescriptor;
use crate::utils::truncate;
use crate::validation::is_generic_noise;

lazy_static! {
    /// Address token, host name, optional comment
    static ref HOSTS_LINE: Regex =
        Regex::new(r"^(?:[0-9.]+|[a-z0-9:]+)\s+(\S+)(?:\s+#(.+)|\s+#)?$")
            .expect("hosts line pattern is a valid regex");
}

pub struct HostsFileParser;

impl ListParser for HostsFileParser {
    fn parse_line(&self, line: &str, source: &SourceDescriptor) -> Option<Entry> {
        let line = line.trim();

        let Some(captures) = HOSTS_LINE.captures(line) else {
            warn!(source = %source.name, line = %truncate(line, 120), "invalid line found (format)");
            return None;
        };

        let domain = captures.get(1)?.as_str();
        if is_generic_noise(domain) {
            debug!(source = %source.name, domain, "skipping generic noise entry");
            return None;
        }

        let mut comment = format!("{:?}", source.name);
        if let Some(text) = captures
            .get(2)
            .map(|m| m.as_str().trim_matches('#').trim())
            .filter(|t| !t.is_empty())
        {
            comment = format!("{}, Comment: {:?}", comment, text);
        }

        Some(Entry::new(domain, comment))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use super::*;
    use crate::config::{ListFormat, SourceAction};

    fn hosts_source() -> SourceDescriptor {
        source("StevenBlack", SourceAction::Blacklist, ListFormat::HostsFile)
    }

    #[test]
    fn test_line_with_comment() {
        let entry = HostsFileParser
            .parse_line("0.0.0.0 ads.example.com # tracker", &hosts_source())
            .unwrap();
        assert_eq!(entry.domain, "ads.example.com");
        assert_eq!(
            entry.comments,
            vec![r#""StevenBlack", Comment: "tracker""#.to_string()]
        );
    }

    #[test]
    fn test_line_without_comment() {
        let entry = HostsFileParser
            .parse_line("127.0.0.1\tads.example.com", &hosts_source())
            .unwrap();
        assert_eq!(entry.domain, "ads.example.com");
        assert_eq!(entry.comments, vec![r#""StevenBlack""#.to_string()]);
    }

    #[test]
    fn test_empty_comment_ignored() {
        let entry = HostsFileParser
            .parse_line("0.0.0.0 ads.example.com #", &hosts_source())
            .unwrap();
        assert_eq!(entry.comments, vec![r#""StevenBlack""#.to_string()]);

        let entry = HostsFileParser
            .parse_line("0.0.0.0 ads.example.com ###", &hosts_source())
            .unwrap();
        assert_eq!(entry.comments, vec![r#""StevenBlack""#.to_string()]);
    }

    #[test]
    fn test_ipv6_address() {
        let entry = HostsFileParser
            .parse_line("::1 ads.example.com", &hosts_source())
            .unwrap();
        assert_eq!(entry.domain, "ads.example.com");
    }

    #[test]
    fn test_generic_noise_rejected() {
        let source = hosts_source();
        assert!(HostsFileParser
            .parse_line("127.0.0.1 localhost", &source)
            .is_none());
        assert!(HostsFileParser
            .parse_line("ff02::1 ip6-allnodes", &source)
            .is_none());
        assert!(HostsFileParser
            .parse_line("255.255.255.255 broadcasthost", &source)
            .is_none());
    }

    #[test]
    fn test_malformed_lines_rejected() {
        let source = hosts_source();
        // no address
        assert!(HostsFileParser.parse_line("ads.example.com", &source).is_none());
        // two host names
        assert!(HostsFileParser
            .parse_line("0.0.0.0 a.example.com b.example.com", &source)
            .is_none());
        // address only
        assert!(HostsFileParser.parse_line("0.0.0.0", &source).is_none());
    }

    #[tokio::test]
    async fn test_parse_hosts_file() {
        let content = "\
# Title: StevenBlack/hosts
127.0.0.1 localhost
127.0.0.1 localhost.localdomain
::1 ip6-localhost ip6-loopback

0.0.0.0 ads.example.com
0.0.0.0 tracker.example.com # analytics
garbage line here
";
        let entries = parse_str(&HostsFileParser, content, &hosts_source()).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].domain, "ads.example.com");
        assert_eq!(entries[1].domain, "tracker.example.com");
        assert!(entries[1].comments[0].contains(r#"Comment: "analytics""#));
    }
}
