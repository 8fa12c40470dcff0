//! Validate command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::{Config, ContentOrigin, SourceAction};
use crate::parser::ParserRegistry;

/// Run the validate command
pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let warnings = check_providers(&config, &ParserRegistry::with_defaults());

    println!("Providers ({}):", config.providers.len());
    for provider in &config.providers {
        println!(
            "  {:<24} {:<10} {:<13} {}",
            provider.name,
            provider.action.to_string(),
            provider.format.to_string(),
            provider.origin()
        );
    }

    if warnings.is_empty() {
        println!();
        println!("[OK] Configuration is valid");
        return Ok(());
    }

    println!();
    for warning in &warnings {
        println!("[WARN] {}", warning);
    }
    anyhow::bail!("{} provider(s) would fail to extract", warnings.len())
}

/// Static problems that would make a provider fail at generation time
pub fn check_providers(config: &Config, registry: &ParserRegistry) -> Vec<String> {
    let mut warnings = Vec::new();

    for provider in &config.providers {
        if let SourceAction::Unknown(action) = &provider.action {
            warnings.push(format!(
                "'{}': invalid action '{}' (use blacklist or whitelist)",
                provider.name, action
            ));
        }
        if registry.get(&provider.format).is_none() {
            let mut known: Vec<String> = registry.formats().iter().map(|f| f.to_string()).collect();
            known.sort();
            warnings.push(format!(
                "'{}': unknown type '{}' (use {})",
                provider.name,
                provider.format,
                known.join(", ")
            ));
        }
        if provider.origin() == ContentOrigin::None {
            warnings.push(format!(
                "'{}': neither content, file, nor url specified",
                provider.name
            ));
        }
    }

    warnings
}
