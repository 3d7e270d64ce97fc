// file: src/retrieval/tokenizer.rs
// description: shared query/index tokenization with stop word removal
// reference: whitespace tokenization for BM25 retrieval

use std::collections::HashSet;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "an", "and", "are", "as", "at", "be", "been", "but", "by", "for", "from",
        "had", "has", "have", "if", "in", "into", "is", "it", "its", "no", "not", "of", "on",
        "or", "our", "such", "that", "the", "their", "then", "there", "these", "they", "this",
        "to", "was", "we", "were", "which", "will", "with",
    ]
    .into_iter()
    .collect()
});

/// Tokenize text: lowercase, split on non-alphanumeric boundaries, drop stop
/// words and single-character tokens.
///
/// The exact same policy is applied when indexing documents and when parsing
/// queries. Index-time and query-time tokenization must stay identical or
/// relevance degrades silently, so both paths call this one function.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() > 1 && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_drops_stop_words() {
        let tokens = tokenize("The Quick brown FOX");
        assert_eq!(tokens, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn test_splits_on_punctuation() {
        let tokens = tokenize("retrieval-augmented generation (RAG)");
        assert_eq!(tokens, vec!["retrieval", "augmented", "generation", "rag"]);
    }

    #[test]
    fn test_single_char_tokens_discarded() {
        let tokens = tokenize("a b c quantum");
        assert_eq!(tokens, vec!["quantum"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t ").is_empty());
    }
}
