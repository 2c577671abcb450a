//! Data source: fetch a named collection and hand back items, never an error.
//!
//! [`DataSource::load`] is the boundary where fetch and parse failures are
//! downgraded to "empty collection plus diagnostic". Callers only ever look at
//! the returned [`LoadReport`].
//!
//! # Modules
//!
//! - [`fetcher`]: the [`Fetcher`] trait and its HTTP, file and memory implementations
//! - [`collection`]: envelope decoding and per-item validation

pub mod collection;
pub mod fetcher;

pub use collection::{decode, LoadReport};
pub use fetcher::{fetcher_for, FileFetcher, Fetcher, HttpFetcher, MemoryFetcher};

use crate::domain::Item;
use crate::view::CollectionView;

/// Site-relative path of a collection's data file.
#[must_use]
pub fn resource_path(collection: &str) -> String {
    format!("data/{collection}.json")
}

/// Loads collections and text resources through a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct DataSource<F> {
    fetcher: F,
}

impl<F: Fetcher> DataSource<F> {
    pub const fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetches and decodes `data/<collection>.json`.
    ///
    /// One network read per call. Failures are logged and reported in the
    /// returned [`LoadReport`]; nothing is thrown past this point.
    pub async fn load<I: Item>(&self) -> LoadReport<I> {
        let path = resource_path(I::COLLECTION);
        tracing::debug!(collection = I::COLLECTION, path = %path, "loading collection");

        let report = match self.fetcher.fetch(&path).await {
            Ok(payload) => decode::<I>(&payload),
            Err(e) => LoadReport::failure(e),
        };

        if report.failed {
            for diagnostic in &report.diagnostics {
                tracing::error!(collection = I::COLLECTION, error = %diagnostic, "error loading collection");
            }
        }

        report
    }

    /// The first `limit` items in default order, e.g. the landing page's recent news.
    ///
    /// Empty on any failure.
    pub async fn load_recent<I: Item>(&self, limit: usize) -> Vec<I> {
        let report = self.load::<I>().await;
        CollectionView::new(report.items)
            .recent(limit)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Fetches a raw text resource such as a Markdown post. Empty on failure.
    pub async fn load_text(&self, path: &str) -> String {
        match self.fetcher.fetch(path).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "error loading text resource");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewsEntry, Publication, SiteError};

    fn source() -> DataSource<MemoryFetcher> {
        DataSource::new(
            MemoryFetcher::new()
                .with(
                    "data/news.json",
                    r#"{"news": [
                        {"title": "old", "date": "2021-05-01"},
                        {"title": "new", "date": "2024-05-01"},
                        {"title": "mid", "date": "2023-05-01"},
                        {"title": "older", "date": "2020-05-01"}
                    ]}"#,
                )
                .with("posts/hello.md", "# Hello"),
        )
    }

    #[tokio::test]
    async fn fetch_failure_is_an_empty_failed_report() {
        let report = source().load::<Publication>().await;
        assert!(report.failed);
        assert!(report.items.is_empty());
        assert!(matches!(report.diagnostics[..], [SiteError::Fetch(_)]));
    }

    #[tokio::test]
    async fn recent_news_is_newest_first_and_limited() {
        let recent = source().load_recent::<NewsEntry>(3).await;
        let titles: Vec<&str> = recent.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn text_resources_degrade_to_empty() {
        let source = source();
        assert_eq!(source.load_text("posts/hello.md").await, "# Hello");
        assert_eq!(source.load_text("posts/missing.md").await, "");
    }

    /// Answers `data/publications.json` with one item and everything else with 404.
    async fn serve_site() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = vec![0u8; 4096];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let response = if request.starts_with("GET /data/publications.json ") {
                    let body = r#"{"publications": [{"id": "a", "title": "Alpha", "year": 2023}]}"#;
                    format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    )
                } else {
                    "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
                };
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn http_status_decides_the_load() {
        let base = serve_site().await;
        let source = DataSource::new(HttpFetcher::new(&base).unwrap());

        let missing = source.load::<NewsEntry>().await;
        assert!(missing.failed);
        assert!(missing.items.is_empty());
        assert!(matches!(&missing.diagnostics[..], [SiteError::Fetch(e)] if e.contains("404")));

        let loaded = source.load::<Publication>().await;
        assert!(!loaded.failed);
        let ids: Vec<&str> = loaded.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a"]);
    }
}
