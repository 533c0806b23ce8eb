use chrono::NaiveDate;
use sd_core::{DigestBuilder, Error};
use sd_deliver::TelegramSender;
use sd_extract::{ArticleExtractor, PageFetcher};
use sd_feeds::ScanFeed;
use sd_inference::InferenceModel;
use std::sync::Arc;
use tracing::{error, info};

/// Orchestrates scan → extract → summarize → deliver over every configured
/// feed, strictly in order. All per-feed and per-entry failures are absorbed
/// here; only delivery transport setup can fail the run.
pub struct Pipeline<S: ScanFeed, F: PageFetcher> {
    pub scanner: S,
    pub extractor: ArticleExtractor<F>,
    pub model: Arc<dyn InferenceModel>,
    pub sender: TelegramSender,
}

impl<S: ScanFeed, F: PageFetcher> Pipeline<S, F> {
    pub async fn run(&self, feeds: &[String], target: NaiveDate) -> sd_core::Result<()> {
        let digest = self.build_digest(feeds, target).await;
        self.sender.send_digest(&digest.into_message()).await
    }

    /// Accumulates one block per matching entry. A feed that fails to fetch
    /// is skipped whole; extraction and summarization failures are rendered
    /// as the block's text instead of aborting.
    pub async fn build_digest(&self, feeds: &[String], target: NaiveDate) -> DigestBuilder {
        let mut digest = DigestBuilder::new();

        for feed_url in feeds {
            info!("Fetching RSS feed: {}...", feed_url);
            let entries = match self.scanner.entries_for_date(feed_url, target).await {
                Ok(entries) => entries,
                Err(e) => {
                    error!("❌ Failed to fetch feed {}: {}", feed_url, e);
                    continue;
                }
            };

            for entry in entries {
                info!("✅ Found: {}", entry.title);
                let content = match self.extractor.article_text(&entry.link).await {
                    Ok(text) => text,
                    Err(e) => e.to_string(),
                };
                let summary = match self.model.summarize(&content).await {
                    Ok(text) => text,
                    // Inference diagnostics already carry their full text
                    // ("API Error: …" / "Error summarizing: …").
                    Err(Error::Inference(detail)) => detail,
                    Err(e) => format!("Error summarizing: {}", e),
                };
                digest.push_entry(&entry.title, &entry.link, &summary);
            }
        }

        digest
    }
}
