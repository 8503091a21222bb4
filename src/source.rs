/*
 *  source.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Page sources - where channel descriptors and page resources come from
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use log::debug;
use reqwest::{Client, Url, header};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::constants::USER_AGENT;
use crate::error::FetchError;

/// Anything that can hand back the text of a resource by locator.
pub trait PageSource {
    fn fetch(&self, locator: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Connect and whole-request timeouts for HTTP sources.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_millis(2000),
            request: Duration::from_millis(5000),
        }
    }
}

/// Fetches over HTTP(S). Relative locators resolve against the channel URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(channel_url: &str, timeouts: Timeouts) -> Result<Self, FetchError> {
        let base = Url::parse(channel_url).map_err(|e| FetchError::InvalidLocator {
            locator: channel_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static(USER_AGENT));
        headers.insert("Accept", header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .default_headers(headers)
            .timeout(timeouts.request)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { base, client })
    }

    /// Resolves a page locator the way a browser resolves a relative fetch.
    pub fn resolve(&self, locator: &str) -> Result<Url, FetchError> {
        self.base.join(locator).map_err(|e| FetchError::InvalidLocator {
            locator: locator.to_string(),
            reason: e.to_string(),
        })
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, locator: &str) -> Result<String, FetchError> {
        let url = self.resolve(locator)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http { locator: locator.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                locator: locator.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Http { locator: locator.to_string(), source })
    }
}

/// Reads from the local filesystem. Relative locators resolve against the
/// directory holding the channel descriptor.
#[derive(Debug, Clone)]
pub struct FileSource {
    base_dir: PathBuf,
}

impl FileSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    pub fn resolve(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl PageSource for FileSource {
    async fn fetch(&self, locator: &str) -> Result<String, FetchError> {
        let path = self.resolve(locator);
        debug!("read {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io { locator: locator.to_string(), source })
    }
}

/// The source picked for a channel locator at startup.
#[derive(Debug, Clone)]
pub enum ChannelSource {
    Http(HttpSource),
    File(FileSource),
}

impl PageSource for ChannelSource {
    async fn fetch(&self, locator: &str) -> Result<String, FetchError> {
        match self {
            ChannelSource::Http(s) => s.fetch(locator).await,
            ChannelSource::File(s) => s.fetch(locator).await,
        }
    }
}

fn is_http(locator: &str) -> bool {
    let lower = locator.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Picks an HTTP or file source for `channel` and returns it together with
/// the locator to load the descriptor from.
pub fn for_channel(channel: &str, timeouts: Timeouts) -> Result<(ChannelSource, String), FetchError> {
    if is_http(channel) {
        let source = HttpSource::new(channel, timeouts)?;
        return Ok((ChannelSource::Http(source), channel.to_string()));
    }

    let path = std::path::absolute(channel).map_err(|e| FetchError::InvalidLocator {
        locator: channel.to_string(),
        reason: e.to_string(),
    })?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let locator = path.to_string_lossy().into_owned();
    Ok((ChannelSource::File(FileSource::new(base_dir)), locator))
}

/// Canned responses served from memory, with a request log.
///
/// Unknown locators answer 404. An optional latency makes every fetch
/// suspend, and the highest number of overlapping fetches is recorded.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    state: Arc<MemorySourceState>,
}

#[derive(Debug, Default)]
struct MemorySourceState {
    responses: Mutex<HashMap<String, Result<String, u16>>>,
    requests: Mutex<Vec<String>>,
    latency: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for `locator`.
    pub fn insert(&self, locator: &str, body: impl Into<String>) -> &Self {
        if let Ok(mut responses) = self.state.responses.lock() {
            responses.insert(locator.to_string(), Ok(body.into()));
        }
        self
    }

    /// Answers `locator` with a non-success HTTP status.
    pub fn fail(&self, locator: &str, status: u16) -> &Self {
        if let Ok(mut responses) = self.state.responses.lock() {
            responses.insert(locator.to_string(), Err(status));
        }
        self
    }

    pub fn set_latency(&self, latency: Duration) -> &Self {
        if let Ok(mut l) = self.state.latency.lock() {
            *l = Some(latency);
        }
        self
    }

    /// Every locator requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

impl PageSource for MemorySource {
    async fn fetch(&self, locator: &str) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.state.requests.lock() {
            requests.push(locator.to_string());
        }
        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let latency = self.state.latency.lock().ok().and_then(|l| *l);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let response = self
            .state
            .responses
            .lock()
            .ok()
            .and_then(|r| r.get(locator).cloned())
            .unwrap_or(Err(404));
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);

        response.map_err(|status| FetchError::Status { locator: locator.to_string(), status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_resolves_relative_to_channel() {
        let source = HttpSource::new("https://example.org/tv/channel.json", Timeouts::default()).unwrap();
        assert_eq!(
            source.resolve("pages/100.json").unwrap().as_str(),
            "https://example.org/tv/pages/100.json"
        );
        assert_eq!(
            source.resolve("/abs/1.json").unwrap().as_str(),
            "https://example.org/abs/1.json"
        );
        assert_eq!(
            source.resolve("http://other.net/x.json").unwrap().as_str(),
            "http://other.net/x.json"
        );
    }

    #[test]
    fn test_http_rejects_bad_channel_url() {
        assert!(matches!(
            HttpSource::new("http://", Timeouts::default()),
            Err(FetchError::InvalidLocator { .. })
        ));
    }

    #[test]
    fn test_file_resolves_relative_to_base() {
        let source = FileSource::new("/srv/tv");
        assert_eq!(source.resolve("pages/a.json"), PathBuf::from("/srv/tv/pages/a.json"));
        assert_eq!(source.resolve("/etc/b.json"), PathBuf::from("/etc/b.json"));
    }

    #[test]
    fn test_for_channel_picks_source() {
        let (source, locator) = for_channel("HTTPS://example.org/c.json", Timeouts::default()).unwrap();
        assert!(matches!(source, ChannelSource::Http(_)));
        assert_eq!(locator, "HTTPS://example.org/c.json");

        let (source, locator) = for_channel("tv/channel.json", Timeouts::default()).unwrap();
        assert!(matches!(source, ChannelSource::File(_)));
        assert!(Path::new(&locator).is_absolute());
        assert!(locator.ends_with("channel.json"));
    }

    #[tokio::test]
    async fn test_file_source_reads_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        let source = FileSource::new(dir.path());
        assert_eq!(source.fetch("a.json").await.unwrap(), "{}");
        assert!(matches!(source.fetch("missing.json").await, Err(FetchError::Io { .. })));
    }

    #[tokio::test]
    async fn test_memory_source() {
        let source = MemorySource::new();
        source.insert("a", "{}").fail("b", 500);
        assert_eq!(source.fetch("a").await.unwrap(), "{}");
        assert!(matches!(source.fetch("b").await, Err(FetchError::Status { status: 500, .. })));
        assert!(matches!(source.fetch("c").await, Err(FetchError::Status { status: 404, .. })));
        assert_eq!(source.requests(), vec!["a", "b", "c"]);
        assert_eq!(source.max_in_flight(), 1);
    }
}
