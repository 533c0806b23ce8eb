pub mod format;
pub mod telegram;

pub use format::{escape_markdown, split_chunks, CHUNK_DELIMITER, MESSAGE_LIMIT};
pub use telegram::TelegramSender;
