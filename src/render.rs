//! Rendering of the final blacklist as a DNS zone or JSON.
//!
//! Zone templates are plain text. The single line holding an entry
//! placeholder is repeated for every entry, all other lines are copied
//! verbatim:
//!
//! - `{{domain}}` - the domain in punycode form
//! - `{{domain_raw}}` - the domain as found in the source
//! - `{{comments}}` - the provenance comments joined with `", "`

use anyhow::{Context, Result};
use serde::Serialize;

use crate::parser::Entry;
use crate::validation::domain_to_punycode;

/// Default template: a BIND response-policy zone answering NXDOMAIN
pub const DEFAULT_TEMPLATE: &str = "\
$TTL 1H

@ SOA LOCALHOST. dns-master.localhost. (1 1h 15m 30d 2h)
  NS  LOCALHOST.

; Blacklist entries
{{domain}} CNAME . ; {{comments}}
";

const ENTRY_PLACEHOLDERS: &[&str] = &["{{domain}}", "{{domain_raw}}", "{{comments}}"];

/// Output format of the generated blacklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Zone,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zone" | "rpz" => Ok(OutputFormat::Zone),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use zone or json", s)),
        }
    }
}

/// A parsed zone template
#[derive(Debug, Clone)]
pub struct ZoneTemplate {
    header: Vec<String>,
    entry_line: String,
    footer: Vec<String>,
}

impl ZoneTemplate {
    /// Split a template into header, entry line and footer.
    pub fn parse(template: &str) -> Result<Self> {
        let lines: Vec<&str> = template.lines().collect();
        let entry_lines: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| ENTRY_PLACEHOLDERS.iter().any(|p| line.contains(p)))
            .map(|(idx, _)| idx)
            .collect();

        let idx = match entry_lines.as_slice() {
            [idx] => *idx,
            [] if template.contains("{{ range") || template.contains(".Domain") => anyhow::bail!(
                "template has no entry line: range/dot-field templates are not supported, \
                 write a single entry line using {}",
                ENTRY_PLACEHOLDERS.join(", ")
            ),
            [] => anyhow::bail!(
                "template has no entry line (use {})",
                ENTRY_PLACEHOLDERS.join(", ")
            ),
            _ => anyhow::bail!(
                "template has {} entry lines, expected exactly one",
                entry_lines.len()
            ),
        };

        Ok(Self {
            header: lines[..idx].iter().map(|s| s.to_string()).collect(),
            entry_line: lines[idx].to_string(),
            footer: lines[idx + 1..].iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Render all entries through the template
    pub fn render(&self, entries: &[Entry]) -> Result<String> {
        let mut out = String::new();

        for line in &self.header {
            out.push_str(line);
            out.push('\n');
        }

        for entry in entries {
            out.push_str(&self.render_entry(entry)?);
            out.push('\n');
        }

        for line in &self.footer {
            out.push_str(line);
            out.push('\n');
        }

        Ok(out)
    }

    fn render_entry(&self, entry: &Entry) -> Result<String> {
        let mut line = self.entry_line.replace("{{domain_raw}}", &entry.domain);
        if line.contains("{{domain}}") {
            let ascii = domain_to_punycode(&entry.domain)
                .with_context(|| format!("rendering entry {:?}", entry.domain))?;
            line = line.replace("{{domain}}", &ascii);
        }
        Ok(line.replace("{{comments}}", &entry.comments.join(", ")))
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    blacklist: &'a [Entry],
}

/// Render entries as `{"blacklist": [...]}`
pub fn render_json(entries: &[Entry]) -> Result<String> {
    let mut out = serde_json::to_string_pretty(&JsonOutput { blacklist: entries })
        .context("Failed to serialize blacklist")?;
    out.push('\n');
    Ok(out)
}

/// Render entries in the requested format
pub fn render(format: OutputFormat, template: &str, entries: &[Entry]) -> Result<String> {
    match format {
        OutputFormat::Zone => ZoneTemplate::parse(template)?.render(entries),
        OutputFormat::Json => render_json(entries),
    }
}
