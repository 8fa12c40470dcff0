//! Configuration management for zonelist.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::render::{ZoneTemplate, DEFAULT_TEMPLATE};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Domain list sources, in merge order
    pub providers: Vec<SourceDescriptor>,

    /// Zone template used for rendering the final blacklist
    pub template: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from a YAML string without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// Content origins are not checked here. A provider without content,
    /// file or url fails its own extraction instead.
    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            anyhow::bail!("No providers configured");
        }

        let mut names = HashSet::new();
        for provider in &self.providers {
            if provider.name.trim().is_empty() {
                anyhow::bail!("Provider name must not be empty");
            }
            if !names.insert(provider.name.as_str()) {
                anyhow::bail!("Duplicate provider name '{}'", provider.name);
            }
        }

        ZoneTemplate::parse(&self.template).context("Invalid template")?;

        Ok(())
    }
}

/// What to do with the domains a source yields
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceAction {
    Blacklist,
    Whitelist,
    /// Kept verbatim so the failure can be reported against its source
    Unknown(String),
}

impl From<String> for SourceAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "blacklist" => Self::Blacklist,
            "whitelist" => Self::Whitelist,
            _ => Self::Unknown(s),
        }
    }
}

impl From<SourceAction> for String {
    fn from(action: SourceAction) -> Self {
        action.to_string()
    }
}

impl fmt::Display for SourceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blacklist => f.write_str("blacklist"),
            Self::Whitelist => f.write_str("whitelist"),
            Self::Unknown(s) => f.write_str(s),
        }
    }
}

/// Line-oriented list dialect of a source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListFormat {
    /// One domain per line, optional trailing `#` comment
    DomainList,
    /// `/etc/hosts` style: address, host name, optional comment
    HostsFile,
    /// `||domain^` / `@@domain^` filter rules
    AdblockPlus,
    Other(String),
}

impl From<String> for ListFormat {
    fn from(s: String) -> Self {
        match s.as_str() {
            "domain-list" => Self::DomainList,
            "hosts-file" => Self::HostsFile,
            "adblock-plus" => Self::AdblockPlus,
            _ => Self::Other(s),
        }
    }
}

impl From<ListFormat> for String {
    fn from(format: ListFormat) -> Self {
        format.to_string()
    }
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomainList => f.write_str("domain-list"),
            Self::HostsFile => f.write_str("hosts-file"),
            Self::AdblockPlus => f.write_str("adblock-plus"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// One configured list provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Provenance label attached to every entry from this source
    pub name: String,
    pub action: SourceAction,
    #[serde(rename = "type")]
    pub format: ListFormat,
    /// Inline list content, takes precedence over `file` and `url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SourceDescriptor {
    pub fn new(name: impl Into<String>, action: SourceAction, format: ListFormat) -> Self {
        Self {
            name: name.into(),
            action,
            format,
            content: None,
            file: None,
            url: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Where the content of this source comes from, in resolution order
    pub fn origin(&self) -> ContentOrigin<'_> {
        if let Some(content) = self.content.as_deref().filter(|c| !c.is_empty()) {
            ContentOrigin::Inline(content)
        } else if let Some(path) = self.file.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            ContentOrigin::File(path)
        } else if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            ContentOrigin::Url(url)
        } else {
            ContentOrigin::None
        }
    }
}

/// Selected content origin of a [`SourceDescriptor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin<'a> {
    Inline(&'a str),
    File(&'a Path),
    Url(&'a str),
    None,
}

impl fmt::Display for ContentOrigin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(content) => write!(f, "inline ({} lines)", content.lines().count()),
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Url(url) => write!(f, "url {}", url),
            Self::None => f.write_str("none"),
        }
    }
}
