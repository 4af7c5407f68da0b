//! Token-wise chunking

use crate::error::Result;
use crate::tokenizer::{resolve_tokenizer, ResolvedTokenizer, Tokenizer};
use crate::window::{Unit, WindowSpec};

/// Split `text` into windows of at most `max_tokens` tokens.
///
/// The tokenizer is looked up by `tokenizer_name`; when it cannot be used the
/// text is split on whitespace instead and chunks are re-joined with single
/// spaces. Consecutive chunks share up to `overlap` tokens.
///
/// # Errors
///
/// Returns [`ChunkError::InvalidArgument`](crate::ChunkError::InvalidArgument)
/// when `max_tokens` is zero.
///
/// # Example
///
/// ```rust
/// use slicewise_core::chunk_tokenwise;
///
/// let chunks = chunk_tokenwise("a b c d e", 2, 0, "whitespace").unwrap();
/// assert_eq!(chunks, vec!["a b", "c d", "e"]);
/// ```
pub fn chunk_tokenwise(
    text: &str,
    max_tokens: usize,
    overlap: usize,
    tokenizer_name: &str,
) -> Result<Vec<String>> {
    let spec = WindowSpec::new(max_tokens, overlap, Unit::Tokens)?;
    Ok(chunk_with_named(tokenizer_name, text, spec))
}

/// Same as [`chunk_tokenwise`], with a caller-supplied tokenizer.
pub fn chunk_tokenwise_with<T: Tokenizer>(
    tokenizer: &T,
    text: &str,
    max_tokens: usize,
    overlap: usize,
) -> Result<Vec<String>> {
    let spec = WindowSpec::new(max_tokens, overlap, Unit::Tokens)?;
    Ok(chunk_tokens(tokenizer, text, spec))
}

/// Resolve `tokenizer_name` and chunk with whichever tokenizer it yields
pub(crate) fn chunk_with_named(
    tokenizer_name: &str,
    text: &str,
    spec: WindowSpec,
) -> Vec<String> {
    let tokenizer = resolve_tokenizer(tokenizer_name);
    tracing::debug!(
        requested = tokenizer_name,
        resolved = tokenizer.name(),
        "resolved tokenizer"
    );

    match &tokenizer {
        #[cfg(feature = "tiktoken")]
        ResolvedTokenizer::Bpe(bpe) => chunk_tokens(bpe, text, spec),
        ResolvedTokenizer::Whitespace(whitespace) => chunk_tokens(whitespace, text, spec),
    }
}

fn chunk_tokens<T: Tokenizer>(tokenizer: &T, text: &str, spec: WindowSpec) -> Vec<String> {
    let tokens = tokenizer.encode(text);

    spec.windows(tokens.len())
        .map(|range| {
            let chunk = tokenizer.decode(&tokens[range.clone()]);
            tracing::trace!(start = range.start, end = range.end, "token chunk");
            chunk
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WhitespaceTokenizer;
    use crate::ChunkError;

    /// Tokenizer over single characters, to exercise the generic path
    struct CharTokenizer;

    impl Tokenizer for CharTokenizer {
        type Token<'t> = char;

        fn name(&self) -> &str {
            "chars"
        }

        fn encode<'t>(&self, text: &'t str) -> Vec<Self::Token<'t>> {
            text.chars().collect()
        }

        fn decode(&self, tokens: &[Self::Token<'_>]) -> String {
            tokens.iter().collect()
        }
    }

    #[test]
    fn test_whitespace_fallback_without_overlap() {
        let chunks = chunk_tokenwise("a b c d e", 2, 0, "no-such-encoding").unwrap();
        assert_eq!(chunks, vec!["a b", "c d", "e"]);
    }

    #[test]
    fn test_whitespace_fallback_with_overlap() {
        let text = "one two three four five six seven eight nine ten";
        let chunks = chunk_tokenwise(text, 5, 2, "whitespace").unwrap();

        assert_eq!(
            chunks,
            vec![
                "one two three four five",
                "four five six seven eight",
                "seven eight nine ten",
            ]
        );
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let chunks = chunk_tokenwise("a\n\nb\t c", 10, 0, "whitespace").unwrap();
        assert_eq!(chunks, vec!["a b c"]);
    }

    #[test]
    fn test_overlap_at_least_max_tokens_progresses() {
        let chunks = chunk_tokenwise("a b c d", 2, 5, "whitespace").unwrap();
        assert_eq!(chunks, vec!["a b", "b c", "c d"]);
    }

    #[test]
    fn test_empty_and_blank_text() {
        assert!(chunk_tokenwise("", 3, 1, "whitespace").unwrap().is_empty());
        assert!(chunk_tokenwise(" \n\t ", 3, 1, "whitespace")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let err = chunk_tokenwise("a b", 0, 0, "whitespace").unwrap_err();
        assert_eq!(
            err,
            ChunkError::InvalidArgument {
                name: "max_tokens",
                reason: "must be > 0",
            }
        );
    }

    #[test]
    fn test_custom_tokenizer() {
        let chunks = chunk_tokenwise_with(&CharTokenizer, "abcdefg", 3, 1).unwrap();
        assert_eq!(chunks, vec!["abc", "cde", "efg"]);
    }

    #[test]
    fn test_explicit_whitespace_tokenizer() {
        let chunks = chunk_tokenwise_with(&WhitespaceTokenizer, "x y z", 1, 0).unwrap();
        assert_eq!(chunks, vec!["x", "y", "z"]);
    }

    #[cfg(feature = "tiktoken")]
    #[test]
    fn test_bpe_window_count() {
        use crate::tokenizer::{BpeEncoding, BpeTokenizer};

        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
        let chunks = chunk_tokenwise(&text, 16, 4, "cl100k_base").unwrap();

        let total = BpeTokenizer::load(BpeEncoding::Cl100kBase)
            .unwrap()
            .encode(&text)
            .len();
        assert!(total > 16);
        assert_eq!(chunks.len(), 1 + (total - 16).div_ceil(12));
        assert!(chunks[0].starts_with("The quick brown fox"));
    }

    #[cfg(feature = "tiktoken")]
    #[test]
    fn test_bpe_windows_over_cjk_keep_inner_characters() {
        let text = "日本語のテキストを埋め込み用に分割します。重なりを持たせて文脈を保ちます。";
        let chunks = chunk_tokenwise(text, 8, 2, "gpt2").unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            let inner = chunk.trim_matches(char::REPLACEMENT_CHARACTER);
            assert!(!inner.is_empty(), "{chunk:?}");
            assert!(text.contains(inner), "{chunk:?}");
        }
        assert!(chunks.iter().any(|chunk| chunk.contains("文脈を")), "{chunks:?}");
    }
}
