//! Text chunking for the length-limited TTS endpoint.

/// Longest text the endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 200;

/// Split `text` into chunks of at most `max` characters, breaking at whitespace.
///
/// Words longer than `max` are cut. Blank input yields no chunks.
pub fn split_text(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        assert_eq!(split_text("Hello there", 200), vec!["Hello there"]);
    }

    #[test]
    fn test_blank_text_no_chunks() {
        assert!(split_text("   ", 200).is_empty());
    }

    #[test]
    fn test_splits_at_word_boundary() {
        assert_eq!(
            split_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn test_exact_fit() {
        assert_eq!(split_text("abc def", 7), vec!["abc def"]);
    }

    #[test]
    fn test_long_word_is_cut() {
        assert_eq!(split_text("ab abcdefgh c", 3), vec!["ab", "abc", "def", "gh", "c"]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "Čaute manažéri";
        assert_eq!(split_text(text, 14), vec![text]);
    }

    #[test]
    fn test_chunks_respect_limit() {
        let text = "word ".repeat(120);
        let chunks = split_text(&text, MAX_CHUNK_CHARS);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert_eq!(chunks.join(" "), text.trim());
    }
}
