//! Content resolution for list sources: inline text, local files and URLs.

use futures::TryStreamExt;
use reqwest::{Client, StatusCode};
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufRead, BufReader};
use tokio_util::io::StreamReader;
use tracing::debug;

use crate::config::{ContentOrigin, SourceDescriptor};
use crate::error::{ContentError, ZonelistError};

/// Connection establishment limit; the transfer itself is not bounded
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Line-readable byte stream of one source, owned by whoever parses it
pub type ContentReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// Opens the content of list sources
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a new fetcher with default settings
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(user_agent())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self { client })
    }

    /// Open the content of a source.
    ///
    /// Exactly one origin is tried: inline content, then file, then url.
    /// A failing origin never falls back to the next one.
    pub async fn resolve(&self, source: &SourceDescriptor) -> Result<ContentReader, ZonelistError> {
        let result = match source.origin() {
            ContentOrigin::Inline(content) => Ok(inline_reader(content)),
            ContentOrigin::File(path) => open_file(path).await,
            ContentOrigin::Url(url) => self.fetch_url(url).await,
            ContentOrigin::None => Err(ContentError::NotConfigured),
        };

        result.map_err(|cause| ZonelistError::ContentSource {
            source_name: source.name.clone(),
            cause,
        })
    }

    async fn fetch_url(&self, url: &str) -> Result<ContentReader, ContentError> {
        debug!("Requesting {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(ContentError::Status(response.status().as_u16()));
        }

        let body = response.bytes_stream().map_err(std::io::Error::other);
        Ok(Box::new(StreamReader::new(Box::pin(body))))
    }
}

/// User agent sent with every list download
pub fn user_agent() -> String {
    format!(
        "zonelist/{} (+https://github.com/zonelist/zonelist)",
        env!("CARGO_PKG_VERSION")
    )
}

/// Wrap inline list content as a reader, no I/O involved
pub fn inline_reader(content: &str) -> ContentReader {
    Box::new(Cursor::new(content.as_bytes().to_vec()))
}

async fn open_file(path: &Path) -> Result<ContentReader, ContentError> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|error| ContentError::File {
            path: path.to_path_buf(),
            error,
        })?;
    Ok(Box::new(BufReader::new(file)))
}
