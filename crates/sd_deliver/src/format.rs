/// Telegram's per-message payload cap, in characters.
pub const MESSAGE_LIMIT: usize = 4096;

/// Block separator the digest builder writes between entries; chunk cuts
/// prefer to land on it so no message breaks mid-thought.
pub const CHUNK_DELIMITER: &str = "\n---\n";

const ESCAPE_CHARS: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '=', '|', '{', '}', '.', '!', '-',
];

/// Escapes every character Telegram's MarkdownV2 mode reserves. Applied
/// exactly once, to the final outbound chunk; escaping earlier text would
/// double-escape on the next pass and corrupt the output.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPE_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Splits `text` into transport-sized chunks. While the remainder exceeds
/// `limit` characters, cut at the start of the last delimiter fully inside
/// the window when one exists, else at the hard character boundary; leading
/// whitespace left by a cut is dropped from the remainder. A remainder that
/// fits becomes the final chunk as-is.
pub fn split_chunks(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let window_end = match rest.char_indices().nth(limit) {
            Some((idx, _)) => idx,
            None => {
                chunks.push(rest.to_string());
                break;
            }
        };
        let cut = rest[..window_end]
            .rfind(CHUNK_DELIMITER)
            .unwrap_or(window_end);
        chunks.push(rest[..cut].to_string());
        rest = rest[cut..].trim_start();
    }
    chunks
}
