// --- File: crates/citabot_messenger/src/split.rs ---

/// Longest text the Send API accepts in one message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\n')
}

/// Splits `text` into chunks of at most `max_chars` characters.
///
/// Chunks break after sentence punctuation where possible; a single sentence
/// longer than the limit is cut at the limit. Concatenating the chunks gives
/// back the input. Empty input yields no chunks.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.is_empty() {
        return Vec::new();
    }
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in text.split_inclusive(is_sentence_end) {
        let len = sentence.chars().count();

        if current_len + len > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if len <= max_chars {
            current.push_str(sentence);
            current_len += len;
            continue;
        }

        // Sentence alone exceeds the limit.
        let chars: Vec<char> = sentence.chars().collect();
        let mut pieces = chars.chunks(max_chars).peekable();
        while let Some(piece) = pieces.next() {
            let piece: String = piece.iter().collect();
            if pieces.peek().is_some() {
                chunks.push(piece);
            } else {
                current_len = piece.chars().count();
                current = piece;
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_message("Hola.", MAX_MESSAGE_CHARS), vec!["Hola."]);
        assert!(split_message("", MAX_MESSAGE_CHARS).is_empty());
    }

    #[test]
    fn test_breaks_on_sentence_boundary() {
        let chunks = split_message("Uno dos. Tres cuatro. Cinco.", 14);
        assert_eq!(chunks, vec!["Uno dos.", " Tres cuatro.", " Cinco."]);
    }

    #[test]
    fn test_long_sentence_is_cut() {
        let text = "a".repeat(25);
        let chunks = split_message(&text, 10);
        assert_eq!(chunks.iter().map(|c| c.len()).collect::<Vec<_>>(), vec![10, 10, 5]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "ñ".repeat(MAX_MESSAGE_CHARS);
        assert_eq!(split_message(&text, MAX_MESSAGE_CHARS).len(), 1);
    }

    proptest! {
        #[test]
        fn chunks_respect_limit_and_preserve_text(
            text in "[a-zñ ¿?¡!.\n]{0,400}",
            max in 1usize..80,
        ) {
            let chunks = split_message(&text, max);
            prop_assert_eq!(chunks.concat(), text);
            for chunk in &chunks {
                prop_assert!(!chunk.is_empty());
                prop_assert!(chunk.chars().count() <= max);
            }
        }
    }
}
