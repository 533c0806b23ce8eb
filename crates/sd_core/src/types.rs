use serde::{Deserialize, Serialize};

/// One feed item. The publish timestamp is kept as the raw string the feed
/// sent so the strict-format date parse sees it untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub published_raw: String,
}

pub const DIGEST_HEADER: &str = "📰 *Substack Summary Bot*\n\n";
pub const NO_POSTS_MESSAGE: &str =
    "📰 *Substack Summary Bot*\n\nNo new posts found for yesterday.";

/// Owned digest buffer. The driver holds exactly one for the run and appends
/// one block per matching entry; nothing else writes to it.
#[derive(Debug)]
pub struct DigestBuilder {
    text: String,
}

impl DigestBuilder {
    pub fn new() -> Self {
        Self {
            text: DIGEST_HEADER.to_string(),
        }
    }

    pub fn push_entry(&mut self, title: &str, link: &str, summary: &str) {
        self.text
            .push_str(&format!("*{}*\n{}\n_{}_\n\n---\n", title, link, summary));
    }

    pub fn is_empty(&self) -> bool {
        self.text == DIGEST_HEADER
    }

    /// Final document; an untouched builder becomes the "no posts" notice.
    pub fn into_message(self) -> String {
        if self.is_empty() {
            NO_POSTS_MESSAGE.to_string()
        } else {
            self.text
        }
    }
}

impl Default for DigestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry_block() {
        let mut digest = DigestBuilder::new();
        digest.push_entry("A Title", "https://example.com/post", "A summary.");
        let message = digest.into_message();
        assert!(message.starts_with(DIGEST_HEADER));
        assert!(message.contains("*A Title*\nhttps://example.com/post\n_A summary._\n\n---\n"));
    }

    #[test]
    fn test_empty_digest_becomes_placeholder() {
        let digest = DigestBuilder::new();
        assert!(digest.is_empty());
        assert_eq!(digest.into_message(), NO_POSTS_MESSAGE);
    }

    #[test]
    fn test_blocks_preserve_order() {
        let mut digest = DigestBuilder::new();
        digest.push_entry("First", "https://example.com/1", "one");
        digest.push_entry("Second", "https://example.com/2", "two");
        let message = digest.into_message();
        let first = message.find("*First*").unwrap();
        let second = message.find("*Second*").unwrap();
        assert!(first < second);
    }
}
