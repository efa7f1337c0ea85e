//! Small text helpers used by parsers and prompt builders.
//!
//! Every length limit in the pipeline counts characters, not bytes, so
//! truncation never splits a multi-byte character.

/// Prefix a reasoning backend puts in front of a failure message.
///
/// Parsers must treat text starting with this prefix as carrying no
/// structured fields.
pub const REASONING_ERROR_PREFIX: &str = "Error: ";

/// Return at most `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Current time in milliseconds since the Unix epoch.
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_shorter_than_limit() {
        assert_eq!(truncate_chars("fever", 10), "fever");
    }

    #[test]
    fn test_truncate_chars_exact_limit() {
        assert_eq!(truncate_chars("fever", 5), "fever");
        assert_eq!(truncate_chars("fever", 3), "fev");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        // "é" is two bytes; slicing by bytes would panic here
        assert_eq!(truncate_chars("Ménière's disease", 3), "Mén");
    }
}
