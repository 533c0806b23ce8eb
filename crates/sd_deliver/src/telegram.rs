use reqwest::{Client, StatusCode};
use sd_core::{Error, Result};
use serde::Serialize;
use tracing::{error, info};

use crate::format::{escape_markdown, split_chunks, MESSAGE_LIMIT};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

pub struct TelegramSender {
    client: Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramSender {
    pub fn new(token: String, chat_id: String) -> Self {
        Self {
            client: Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            token,
            chat_id,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Splits the digest and sends each chunk as its own message, in order.
    /// A failed chunk is logged with the response body and does not stop
    /// the remaining chunks.
    pub async fn send_digest(&self, text: &str) -> Result<()> {
        let chunks = split_chunks(text, MESSAGE_LIMIT);
        for (idx, chunk) in chunks.iter().enumerate() {
            // Escape at send time only; the boundary search above must see
            // the unescaped text.
            let escaped = escape_markdown(chunk);
            match self.send_message(&escaped).await {
                Ok(()) => info!("✅ Message {} sent.", idx + 1),
                Err(e) => error!("❌ Telegram error in chunk {}: {}", idx + 1, e),
            }
        }
        Ok(())
    }

    async fn send_message(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let payload = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "MarkdownV2",
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Delivery(format!("status {}: {}", status, body)))
        }
    }
}
