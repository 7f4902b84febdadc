//! Word + punctuation tokenizer for definition sentences.
//!
//! A token is either a run of characters that are neither whitespace nor
//! punctuation, or a single punctuation character. Whitespace is never
//! emitted.
//!
//! ```text
//! "Growing of rice (incl. organic)" →
//! [Growing][of][rice][(][incl][.][organic][)]
//! ```

const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '-',
];

pub fn is_punctuation(ch: char) -> bool {
    PUNCTUATION.contains(&ch)
}

/// Split `text` into display tokens, borrowing from the input.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() || is_punctuation(ch) {
            if let Some(start) = word_start.take() {
                tokens.push(&text[start..i]);
            }
            if !ch.is_whitespace() {
                tokens.push(&text[i..i + ch.len_utf8()]);
            }
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }

    if let Some(start) = word_start {
        tokens.push(&text[start..]);
    }

    tokens
}

/// Comparison form of a token: trimmed and lower-cased.
pub fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_and_punctuation() {
        assert_eq!(
            tokenize("Growing of rice (incl. organic)"),
            vec!["Growing", "of", "rice", "(", "incl", ".", "organic", ")"]
        );
    }

    #[test]
    fn whitespace_runs_dropped() {
        assert_eq!(tokenize("  a \t\n b  "), vec!["a", "b"]);
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn adjacent_punctuation_split() {
        assert_eq!(tokenize("e.g.,\"x\""), vec!["e", ".", "g", ".", ",", "\"", "x", "\""]);
        assert_eq!(tokenize("semi-finished"), vec!["semi", "-", "finished"]);
    }

    #[test]
    fn apostrophes_and_slashes_stay_in_word() {
        assert_eq!(tokenize("farmer's n/a"), vec!["farmer's", "n/a"]);
    }

    #[test]
    fn non_ascii_text() {
        assert_eq!(tokenize("Élevage de bovins"), vec!["Élevage", "de", "bovins"]);
        assert_eq!(tokenize("café,thé"), vec!["café", ",", "thé"]);
    }

    #[test]
    fn normalize_folds_case() {
        assert_eq!(normalize("Rice"), "rice");
        assert_eq!(normalize(" ÉLEVAGE "), "élevage");
    }
}
