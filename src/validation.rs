//! Centralized validation functions for zonelist.
//!
//! This module provides unified validation for:
//! - Domain names (plain ASCII and internationalized)
//! - Comment and blank lines shared by every list format
//! - The generic-noise set of infrastructure host names

use anyhow::Result;
use idna::uts46::{AsciiDenyList, DnsLength, Hyphens, Uts46};
use std::net::IpAddr;

/// Host names that show up in nearly every hosts file but are never
/// meaningful block targets.
pub const GENERIC_NOISE: &[&str] = &[
    "broadcasthost",
    "ip6-allhosts",
    "ip6-allnodes",
    "ip6-allrouters",
    "ip6-localnet",
    "ip6-mcastprefix",
    "local",
    "localhost",
    "localhost.localdomain",
];

/// Maximum length of a full domain name
const MAX_DOMAIN_LEN: usize = 253;

/// Maximum length of a single label
const MAX_LABEL_LEN: usize = 63;

/// Check whether a token looks like a fully-qualified domain name.
///
/// A cheap ASCII structure check runs first; tokens failing it are handed
/// to IDNA normalization and accepted if that succeeds. IP literals are
/// never domains, whichever tier would otherwise accept them.
///
/// # Examples
/// ```
/// use zonelist::validation::is_valid_domain;
/// assert!(is_valid_domain("www.example.com"));
/// assert!(is_valid_domain("www.foo_bar.example.com"));
/// assert!(!is_valid_domain("||abp.example.com^"));
/// assert!(!is_valid_domain("192.168.1.1"));
/// ```
pub fn is_valid_domain(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.parse::<IpAddr>().is_ok() {
        return false;
    }

    if passes_plain_check(trimmed) {
        return true;
    }

    passes_idna_check(trimmed)
}

/// UTS-46 lookup processing with STD3 rules and hyphen checks.
///
/// DNS length limits are not applied here; they only belong to the
/// plain check.
fn passes_idna_check(input: &str) -> bool {
    Uts46::new()
        .to_ascii(
            input.as_bytes(),
            AsciiDenyList::STD3,
            Hyphens::Check,
            DnsLength::Ignore,
        )
        .is_ok()
}

fn passes_plain_check(input: &str) -> bool {
    if input.is_empty() || input.len() > MAX_DOMAIN_LEN {
        return false;
    }

    let input = input.strip_suffix('.').unwrap_or(input);

    let labels: Vec<&str> = input.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && label
                .chars()
                .all(|c| c.is_alphabetic() || c.is_numeric() || c == '-' || c == '_')
    })
}

/// Blank lines and lines starting with `#`, `;` or `!` carry no entry.
pub fn line_is_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with(['#', ';', '!'])
}

/// Check a host name against [`GENERIC_NOISE`].
pub fn is_generic_noise(domain: &str) -> bool {
    GENERIC_NOISE.contains(&domain)
}

/// Convert a domain name into its punycode (ASCII-compatible) form.
///
/// # Examples
/// ```
/// use zonelist::validation::domain_to_punycode;
/// assert_eq!(domain_to_punycode("bücher.example.com").unwrap(), "xn--bcher-kva.example.com");
/// ```
pub fn domain_to_punycode(name: &str) -> Result<String> {
    idna::domain_to_ascii(name)
        .map_err(|e| anyhow::anyhow!("converting {:?} to punycode: {}", name, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_domain_standard() {
        assert!(is_valid_domain("www.foo.bar.example.com"));
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("example.com."));
    }

    #[test]
    fn test_valid_domain_lenient_hyphens_and_underscores() {
        // Not valid host names, but resolvers and browsers will try them
        assert!(is_valid_domain("-foo.example.com"));
        assert!(is_valid_domain("foo-.example.com"));
        assert!(is_valid_domain("www.foo_bar.example.com"));
    }

    #[test]
    fn test_valid_domain_internationalized() {
        assert!(is_valid_domain("bücher.example.com"));
        assert!(is_valid_domain("xn--bcher-kva.example.com"));
    }

    #[test]
    fn test_invalid_domain_abp_rule() {
        assert!(!is_valid_domain("||abp.example.com^"));
        assert!(!is_valid_domain("@@abp.example.com^"));
    }

    #[test]
    fn test_invalid_domain_ip_literals() {
        assert!(!is_valid_domain("192.168.1.1"));
        assert!(!is_valid_domain("0.0.0.0"));
        assert!(!is_valid_domain("::1"));
        assert!(!is_valid_domain("2001:db8::1"));
    }

    #[test]
    fn test_invalid_domain_structure() {
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain("   "));
        assert!(!is_valid_domain("foo bar.example.com"));
        assert!(!is_valid_domain("foo/bar.example.com"));
        assert!(!is_valid_domain("foo|bar.example.com"));
    }

    #[test]
    fn test_plain_check_rejects_empty_labels() {
        assert!(!passes_plain_check("foo..example.com"));
        assert!(!passes_plain_check(".example.com"));
        assert!(passes_plain_check("foo.example.com."));
    }

    #[test]
    fn test_plain_check_lengths() {
        let long_label = format!("{}.example.com", "a".repeat(64));
        assert!(!passes_plain_check(&long_label));

        let max_label = format!("{}.example.com", "a".repeat(63));
        assert!(passes_plain_check(&max_label));

        let too_long = format!("{}.com", ["abcdefghij"; 25].join("."));
        assert!(too_long.len() > 253);
        assert!(!passes_plain_check(&too_long));
    }

    #[test]
    fn test_idna_tier_ignores_dns_length() {
        // Over-long names fail the plain check but pass IDNA lookup rules
        let long_label = format!("{}.example.com", "a".repeat(64));
        assert!(is_valid_domain(&long_label));

        let too_long = format!("{}.com", ["abcdefghij"; 25].join("."));
        assert!(is_valid_domain(&too_long));

        let long_idn = format!("bücher{}.example.com", "a".repeat(64));
        assert!(is_valid_domain(&long_idn));
    }

    #[test]
    fn test_idna_tier_applies_std3_and_hyphen_rules() {
        assert!(!passes_idna_check("foo_bar.example.com"));
        assert!(!passes_idna_check("-foo.example.com"));
        assert!(!passes_idna_check("ab--cd.example.com"));
        assert!(passes_idna_check("bücher.example.com"));
    }

    #[test]
    fn test_line_is_comment() {
        assert!(line_is_comment(""));
        assert!(line_is_comment("   \t"));
        assert!(line_is_comment("# hosts"));
        assert!(line_is_comment("  # indented"));
        assert!(line_is_comment("; zone style"));
        assert!(line_is_comment("! adblock header"));
        assert!(!line_is_comment("example.com # trailing"));
        assert!(!line_is_comment("||example.com^"));
    }

    #[test]
    fn test_generic_noise() {
        assert!(is_generic_noise("localhost"));
        assert!(is_generic_noise("broadcasthost"));
        assert!(is_generic_noise("ip6-mcastprefix"));
        assert!(!is_generic_noise("localhost.example.com"));
        assert!(!is_generic_noise("LOCALHOST"));
        assert_eq!(GENERIC_NOISE.len(), 9);
    }

    #[test]
    fn test_domain_to_punycode() {
        assert_eq!(
            domain_to_punycode("example.com").unwrap(),
            "example.com".to_string()
        );
        assert_eq!(
            domain_to_punycode("bücher.example.com").unwrap(),
            "xn--bcher-kva.example.com".to_string()
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Generate a plain ASCII label
    fn label_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,20}"
    }

    /// Generate a domain made of 2-5 plain labels
    fn domain_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(label_strategy(), 2..5).prop_map(|labels| labels.join("."))
    }

    proptest! {
        /// Validation should never panic on arbitrary input
        #[test]
        fn prop_validate_arbitrary_no_panic(input in ".*") {
            let _ = is_valid_domain(&input);
        }

        /// Well-formed ASCII domains are always accepted
        #[test]
        fn prop_generated_domains_valid(domain in domain_strategy()) {
            prop_assert!(is_valid_domain(&domain));
        }

        /// Single labels are never accepted by the plain check
        #[test]
        fn prop_single_label_rejected_by_plain_check(label in label_strategy()) {
            prop_assert!(!passes_plain_check(&label));
        }

        /// IPv4 literals are never domains
        #[test]
        fn prop_ipv4_rejected(a: u8, b: u8, c: u8, d: u8) {
            let ip = format!("{}.{}.{}.{}", a, b, c, d);
            prop_assert!(!is_valid_domain(&ip));
        }
    }
}
