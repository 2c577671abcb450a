//! Resource fetchers.
//!
//! A [`Fetcher`] turns a site-relative path (`data/news.json`,
//! `posts/intro.md`) into the resource's text. Fetchers report failures as
//! [`SiteError::Fetch`]; deciding what a failure means for the page is the
//! data source's job, not theirs.
//!
//! # Implementations
//!
//! - [`HttpFetcher`]: GET relative to a base URL via `reqwest`
//! - [`FileFetcher`]: read relative to a local site directory
//! - [`MemoryFetcher`]: fixed in-memory resources, for previews and tests

use crate::domain::error::{Result, SiteError};
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Request timeout for HTTP fetches.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads one resource per call. No retries and no caching: calling twice
/// fetches twice.
pub trait Fetcher: Send + Sync {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>>;
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        (**self).fetch(path)
    }
}

/// Picks a fetcher for a configured base: URLs get HTTP, anything else is a
/// local directory.
///
/// # Errors
///
/// Returns [`SiteError::Config`] if the base looks like a URL but does not parse.
pub fn fetcher_for(base: &str) -> Result<Box<dyn Fetcher>> {
    if base.starts_with("http://") || base.starts_with("https://") {
        Ok(Box::new(HttpFetcher::new(base)?))
    } else {
        Ok(Box::new(FileFetcher::new(base)))
    }
}

/// Fetches resources over HTTP relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: reqwest::Url,
}

impl HttpFetcher {
    /// Creates a fetcher rooted at `base`. A trailing slash is added if missing
    /// so relative paths resolve beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] for an unparseable base URL or if the HTTP
    /// client cannot be built.
    pub fn new(base: &str) -> Result<Self> {
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base = reqwest::Url::parse(&normalized)
            .map_err(|e| SiteError::Config(format!("invalid base URL '{normalized}': {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| SiteError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base })
    }

    /// Absolute URL a relative resource path resolves to.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Fetch`] if the path cannot be joined onto the base.
    pub fn resolve(&self, path: &str) -> Result<reqwest::Url> {
        self.base
            .join(path)
            .map_err(|e| SiteError::Fetch(format!("cannot resolve '{path}': {e}")))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let url = self.resolve(path)?;
            tracing::debug!(url = %url, "fetching resource");

            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| SiteError::Fetch(format!("{url}: {e}")))?
                .error_for_status()
                .map_err(|e| SiteError::Fetch(format!("{url}: {e}")))?;

            response
                .text()
                .await
                .map_err(|e| SiteError::Fetch(format!("{url}: failed to read body: {e}")))
        })
    }
}

/// Reads resources from a local site directory.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Fetcher for FileFetcher {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let full = self.root.join(path);
            tracing::debug!(path = ?full, "reading resource");
            tokio::fs::read_to_string(&full)
                .await
                .map_err(|e| SiteError::Fetch(format!("{}: {e}", full.display())))
        })
    }
}

/// Serves resources from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, String>,
}

impl MemoryFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<String>) {
        self.resources.insert(path.into(), body.into());
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        let result = self
            .resources
            .get(path)
            .cloned()
            .ok_or_else(|| SiteError::Fetch(format!("{path}: 404 Not Found")));
        Box::pin(std::future::ready(result))
    }
}
