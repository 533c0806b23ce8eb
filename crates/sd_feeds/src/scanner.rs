use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use rss::Channel;
use sd_core::{Entry, Error, Result};
use tracing::warn;

pub const USER_AGENT: &str = "Mozilla/5.0";

/// RFC-2822 style timestamp as Substack emits it. This is the only accepted
/// shape; entries that deviate are skipped, not guessed at.
const PUBLISHED_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Seam between the driver and feed retrieval, so feed-level failure
/// isolation is testable without network.
#[async_trait::async_trait]
pub trait ScanFeed: Send + Sync {
    async fn entries_for_date(&self, url: &str, target: NaiveDate) -> Result<Vec<Entry>>;
}

pub struct FeedScanner {
    client: reqwest::Client,
}

impl FeedScanner {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ScanFeed for FeedScanner {
    /// Returns the entries of the feed at `url` published on `target`.
    /// Transport errors (including timeouts) bubble up so the driver can
    /// skip the whole feed; a body that fails to parse as RSS yields zero
    /// entries instead.
    async fn entries_for_date(&self, url: &str, target: NaiveDate) -> Result<Vec<Entry>> {
        let body = self.client.get(url).send().await?.bytes().await?;
        Ok(entries_for_date(&body, target))
    }
}

/// Parses `body` as an RSS document and keeps the items whose publish date
/// equals `target`. Items on other days are dropped silently; items with an
/// unparseable timestamp are skipped with a warning.
pub fn entries_for_date(body: &[u8], target: NaiveDate) -> Vec<Entry> {
    let channel = match Channel::read_from(body) {
        Ok(channel) => channel,
        Err(e) => {
            warn!("⚠️ Skipping malformed feed: {}", e);
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for item in channel.items() {
        let title = item.title().unwrap_or("").to_string();
        let link = item.link().unwrap_or("").to_string();
        let published_raw = item.pub_date().unwrap_or("").to_string();

        match published_date(&published_raw) {
            Ok(date) if date == target => entries.push(Entry {
                title,
                link,
                published_raw,
            }),
            Ok(_) => {}
            Err(e) => warn!("⚠️ Skipping '{}' due to date parsing error: {}", title, e),
        }
    }
    entries
}

/// Strict-format parse of an RSS pubDate into a calendar date. A literal
/// `GMT` zone token is normalized to `+0000` before parsing.
pub fn published_date(raw: &str) -> Result<NaiveDate> {
    let normalized = raw.replace("GMT", "+0000");
    DateTime::parse_from_str(&normalized, PUBLISHED_FORMAT)
        .map(|dt| dt.date_naive())
        .map_err(|e| Error::DateParse(format!("'{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn feed_with_items(items: &str) -> Vec<u8> {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <rss version="2.0"><channel>
            <title>Test Feed</title>
            <link>https://example.substack.com</link>
            <description>test</description>
            {}
            </channel></rss>"#,
            items
        )
        .into_bytes()
    }

    fn item(title: &str, link: &str, pub_date: &str) -> String {
        format!(
            "<item><title>{}</title><link>{}</link><pubDate>{}</pubDate></item>",
            title, link, pub_date
        )
    }

    #[test]
    fn test_published_date_parses_fixed_format() {
        let date = published_date("Tue, 02 Apr 2024 15:30:00 +0200").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
    }

    #[test]
    fn test_gmt_normalization_matches_numeric_offset() {
        let gmt = published_date("Mon, 01 Apr 2024 09:00:00 GMT").unwrap();
        let numeric = published_date("Mon, 01 Apr 2024 09:00:00 +0000").unwrap();
        assert_eq!(gmt, numeric);
    }

    #[test]
    fn test_published_date_rejects_other_formats() {
        assert!(published_date("2024-04-01T09:00:00Z").is_err());
        assert!(published_date("01 Apr 2024 09:00:00 +0000").is_err());
        assert!(published_date("").is_err());
    }

    #[test]
    fn test_entries_filtered_to_target_date() {
        let target = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let body = feed_with_items(&format!(
            "{}{}{}",
            item("Match", "https://a.com/1", "Mon, 01 Apr 2024 09:00:00 GMT"),
            item("Other Day", "https://a.com/2", "Sun, 31 Mar 2024 09:00:00 GMT"),
            item("Bad Date", "https://a.com/3", "yesterday at nine"),
        ));

        let entries = entries_for_date(&body, target);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Match");
        assert_eq!(entries[0].link, "https://a.com/1");
    }

    #[test]
    fn test_malformed_feed_yields_no_entries() {
        let target = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let entries = entries_for_date(b"this is not xml at all", target);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_entries_keep_feed_order() {
        let target = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let body = feed_with_items(&format!(
            "{}{}",
            item("First", "https://a.com/1", "Mon, 01 Apr 2024 08:00:00 GMT"),
            item("Second", "https://a.com/2", "Mon, 01 Apr 2024 09:00:00 GMT"),
        ));

        let entries = entries_for_date(&body, target);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "First");
        assert_eq!(entries[1].title, "Second");
    }
}
