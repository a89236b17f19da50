//! Byte transfer from a URL into a local file.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::{Error, Result};

/// Callback receiving `(bytes_so_far, total_bytes)` during a transfer.
///
/// `total_bytes` is `None` until (or unless) the server announces a length.
pub type ByteProgress<'a> = &'a (dyn Fn(u64, Option<u64>) + Send + Sync);

/// Fetches one remote resource into a file.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Streams `url` into a newly created file at `destination`.
    ///
    /// Returns the number of bytes written. On error the file may be left
    /// partially written; the caller owns cleanup.
    async fn fetch(&self, url: &str, destination: &Path, progress: ByteProgress<'_>) -> Result<u64>;
}

/// Builds a configured HTTP client for dataset requests.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("shift-dl/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(60))
        .pool_max_idle_per_host(8)
        .tcp_keepalive(Duration::from_secs(30))
        .build()
}

/// [`Fetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, destination: &Path, progress: ByteProgress<'_>) -> Result<u64> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total = response.content_length();
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .await?;
        let mut writer = BufWriter::new(file);

        let mut written = 0u64;
        progress(written, total);

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
            progress(written, total);
        }

        writer.flush().await?;
        writer.into_inner().sync_all().await?;
        Ok(written)
    }
}
