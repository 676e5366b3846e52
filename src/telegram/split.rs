//! Splitting of replies that exceed the Telegram message limit

/// Character budget per outgoing message. Telegram caps messages at 4096
/// characters; the budget leaves room for part headers.
pub const MAX_MESSAGE_LEN: usize = 4000;

/// Split `text` into parts of at most `limit` characters, breaking on
/// blank-line boundaries.
///
/// Text within the limit comes back as a single part. A single paragraph
/// longer than the limit becomes its own oversized part rather than being
/// broken mid-sentence.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for paragraph in text.split("\n\n") {
        let paragraph_chars = paragraph.chars().count();

        if current_chars > 0 && current_chars + paragraph_chars >= limit {
            parts.push(current.trim_end().to_string());
            current.clear();
            current_chars = 0;
        }

        current.push_str(paragraph);
        current.push_str("\n\n");
        current_chars += paragraph_chars + 2;
    }

    if !current.trim_end().is_empty() {
        parts.push(current.trim_end().to_string());
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        let parts = split_message("короткий план", 4000);
        assert_eq!(parts, vec!["короткий план".to_string()]);
    }

    #[test]
    fn test_splits_on_paragraphs() {
        let paragraph = "а".repeat(60);
        let text = vec![paragraph.clone(); 5].join("\n\n");

        let parts = split_message(&text, 150);

        assert!(parts.len() > 1);
        for part in &parts {
            // 60-char paragraphs always fit the 150-char budget
            assert!(part.chars().count() <= 150, "part over limit: {}", part.len());
        }
    }

    #[test]
    fn test_content_preserved() {
        let paragraphs: Vec<String> = (0..6).map(|i| format!("абзац номер {}", i)).collect();
        let text = paragraphs.join("\n\n");

        let parts = split_message(&text, 30);
        let reassembled = parts.join("\n\n");

        assert_eq!(reassembled, text);
    }

    #[test]
    fn test_oversized_paragraph_kept_whole() {
        let big = "б".repeat(300);
        let text = format!("вступление\n\n{}\n\nфинал", big);

        let parts = split_message(&text, 100);

        assert!(parts.iter().any(|p| p.contains(&big)));
        assert_eq!(parts.join("\n\n"), text);
    }

    #[test]
    fn test_limit_counts_chars_not_bytes() {
        // Cyrillic is two bytes per char; the limit must apply to chars
        let paragraph = "ю".repeat(90);
        let text = vec![paragraph; 4].join("\n\n");

        let parts = split_message(&text, 100);
        assert_eq!(parts.len(), 4);
    }
}
