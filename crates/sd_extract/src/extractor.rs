use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::warn;

pub const USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Extraction failures. The `Display` strings are the exact diagnostics the
/// driver substitutes for article text; nothing here ever panics or crosses
/// the component boundary as a raw transport error.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Timeout fetching article.")]
    Timeout,

    #[error("Content not found.")]
    ContentMissing,

    #[error("Error fetching article: {0}")]
    Fetch(String),
}

/// Seam between the retry loop and the network, so the retry policy is
/// testable without real requests or real waiting.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ExtractError>;
}

pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ExtractError> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        response.text().await.map_err(classify)
    }
}

fn classify(e: reqwest::Error) -> ExtractError {
    if e.is_timeout() {
        ExtractError::Timeout
    } else {
        ExtractError::Fetch(e.to_string())
    }
}

pub struct ArticleExtractor<F = HttpPageFetcher> {
    fetcher: F,
    retries: u32,
    retry_delay: Duration,
}

impl ArticleExtractor<HttpPageFetcher> {
    pub fn new(timeout: Duration, retries: u32) -> Result<Self, ExtractError> {
        Ok(Self::with_fetcher(
            HttpPageFetcher::new(timeout)?,
            retries,
            DEFAULT_RETRY_DELAY,
        ))
    }
}

impl<F: PageFetcher> ArticleExtractor<F> {
    pub fn with_fetcher(fetcher: F, retries: u32, retry_delay: Duration) -> Self {
        Self {
            fetcher,
            retries,
            retry_delay,
        }
    }

    /// Article text at `url`, flattened to newline-separated blocks.
    /// Timeouts are retried up to the budget (N retries = N+1 attempts) with
    /// a fixed delay in between; any other failure returns immediately.
    pub async fn article_text(&self, url: &str) -> Result<String, ExtractError> {
        let mut remaining = self.retries;
        loop {
            match self.fetcher.fetch(url).await {
                Ok(body) => return extract_content(&body),
                Err(ExtractError::Timeout) if remaining > 0 => {
                    remaining -= 1;
                    warn!("⚠️ Timed out fetching {}, {} retries left", url, remaining);
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Isolates the primary content container: an element whose class attribute
/// is exactly `body`, else the first `<article>`.
pub fn extract_content(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);
    let body = Selector::parse(r#"div[class="body"]"#).unwrap();
    let article = Selector::parse("article").unwrap();

    document
        .select(&body)
        .next()
        .or_else(|| document.select(&article).next())
        .map(flatten_text)
        .ok_or(ExtractError::ContentMissing)
}

fn flatten_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
