//! Blacklist aggregation: concurrent extraction, deduplication and
//! whitelist subtraction.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::{SourceAction, SourceDescriptor};
use crate::error::ZonelistError;
use crate::fetcher::Fetcher;
use crate::parser::{Entry, ParserRegistry};
use crate::utils::format_count;

/// Which candidate set a source feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Blacklist,
    Whitelist,
}

type Extraction = Result<(Target, Vec<Entry>), ZonelistError>;

/// Runs every configured source and merges the results
pub struct Aggregator {
    fetcher: Arc<Fetcher>,
    registry: Arc<ParserRegistry>,
}

impl Aggregator {
    pub fn new(fetcher: Fetcher, registry: ParserRegistry) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            registry: Arc::new(registry),
        }
    }

    /// Build the final blacklist from all sources.
    ///
    /// Every source is extracted in its own task. The run fails as a whole
    /// if any source fails, reporting all failures. Entries are merged in
    /// configuration order, so the comments of a domain list its sources
    /// in the order they are configured.
    pub async fn aggregate(&self, sources: &[SourceDescriptor]) -> Result<Vec<Entry>, ZonelistError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, Extraction)>();

        for (idx, source) in sources.iter().enumerate() {
            let tx = tx.clone();
            let fetcher = Arc::clone(&self.fetcher);
            let registry = Arc::clone(&self.registry);
            let source = source.clone();

            tokio::spawn(async move {
                let extraction = extract(&fetcher, &registry, &source).await;
                // Receiver lives until every sender is gone
                let _ = tx.send((idx, extraction));
            });
        }
        drop(tx);

        let mut results: Vec<Option<Extraction>> = sources.iter().map(|_| None).collect();
        while let Some((idx, extraction)) = rx.recv().await {
            results[idx] = Some(extraction);
        }

        let mut blacklist = Vec::new();
        let mut whitelist = Vec::new();
        let mut errors = Vec::new();

        for (source, result) in sources.iter().zip(results) {
            match result {
                Some(Ok((Target::Blacklist, entries))) => blacklist.extend(entries),
                Some(Ok((Target::Whitelist, entries))) => whitelist.extend(entries),
                Some(Err(e)) => errors.push(e),
                None => errors.push(ZonelistError::Parse {
                    source_name: source.name.clone(),
                    reason: "extraction task panicked".to_string(),
                }),
            }
        }

        if !errors.is_empty() {
            return Err(ZonelistError::Aggregate(errors));
        }

        Ok(build_blacklist(blacklist, whitelist))
    }
}

/// Resolve, parse and route a single source
async fn extract(
    fetcher: &Fetcher,
    registry: &ParserRegistry,
    source: &SourceDescriptor,
) -> Extraction {
    info!(source = %source.name, "starting domain list extraction");

    let target = match &source.action {
        SourceAction::Blacklist => Target::Blacklist,
        SourceAction::Whitelist => Target::Whitelist,
        SourceAction::Unknown(action) => {
            return Err(ZonelistError::InvalidAction {
                source_name: source.name.clone(),
                action: action.clone(),
            })
        }
    };

    let parser = registry
        .get(&source.format)
        .ok_or_else(|| ZonelistError::UnknownFormat {
            source_name: source.name.clone(),
            format: source.format.to_string(),
        })?;

    let reader = fetcher.resolve(source).await?;
    let entries = parser.parse(reader, source).await?;

    info!(
        source = %source.name,
        no_entries = entries.len(),
        "extraction complete"
    );

    Ok((target, entries))
}

/// Deduplicate, subtract the whitelist and sort.
pub fn build_blacklist(blacklist: Vec<Entry>, whitelist: Vec<Entry>) -> Vec<Entry> {
    let raw_count = blacklist.len();

    let blacklist = deduplicate(blacklist);
    let whitelist = deduplicate(whitelist);
    debug!(
        "Removed duplicates: {} -> {} entries",
        format_count(raw_count),
        format_count(blacklist.len())
    );

    let mut result = subtract_whitelist(blacklist, &whitelist);
    result.sort_unstable_by(|a, b| a.domain.cmp(&b.domain));

    info!(
        "Blacklist ready: {} entries ({} whitelisted)",
        format_count(result.len()),
        format_count(whitelist.len())
    );

    result
}

/// Collapse entries with the same domain.
///
/// The first occurrence keeps its position; comments of later
/// occurrences are appended to it in order.
pub fn deduplicate(entries: Vec<Entry>) -> Vec<Entry> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(entries.len());
    let mut unique: Vec<Entry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match positions.get(&entry.domain) {
            Some(&idx) => unique[idx].comments.extend(entry.comments),
            None => {
                positions.insert(entry.domain.clone(), unique.len());
                unique.push(entry);
            }
        }
    }

    unique
}

/// Remove every blacklist entry whose domain is whitelisted.
///
/// Matching is exact string equality; a whitelisted domain does not
/// cover its subdomains.
pub fn subtract_whitelist(blacklist: Vec<Entry>, whitelist: &[Entry]) -> Vec<Entry> {
    let allowed: HashSet<&str> = whitelist.iter().map(|e| e.domain.as_str()).collect();
    blacklist
        .into_iter()
        .filter(|e| !allowed.contains(e.domain.as_str()))
        .collect()
}
