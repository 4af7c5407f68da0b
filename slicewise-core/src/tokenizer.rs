//! Tokenizer capability used by the token-wise chunker
//!
//! A tokenizer is looked up by name on every call. When the name refers to a
//! BPE encoding that can be loaded, [`BpeTokenizer`] is used; in every other
//! case (unknown name, load failure, `tiktoken` feature disabled) the lookup
//! quietly settles on [`WhitespaceTokenizer`]. Falling back is a normal mode of
//! operation, so resolution never returns an error.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name that always selects the whitespace tokenizer
pub const WHITESPACE_TOKENIZER: &str = "whitespace";

/// Default tokenizer name
pub const DEFAULT_TOKENIZER: &str = "gpt2";

/// Encoder/decoder over some token representation
pub trait Tokenizer {
    /// A single token; may borrow from the encoded text
    type Token<'t>;

    /// Name of the tokenizer, for logs and output metadata
    fn name(&self) -> &str;

    /// Split `text` into tokens
    fn encode<'t>(&self, text: &'t str) -> Vec<Self::Token<'t>>;

    /// Turn a run of tokens back into text
    ///
    /// Not necessarily the exact inverse of [`Tokenizer::encode`].
    fn decode(&self, tokens: &[Self::Token<'_>]) -> String;
}

/// Whitespace as used for splitting words and sentences
///
/// Unicode `White_Space` plus the ASCII information separators U+001C..=U+001F.
pub(crate) fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
}

/// Treats whitespace-separated words as tokens and joins them with single spaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    type Token<'t> = &'t str;

    fn name(&self) -> &str {
        WHITESPACE_TOKENIZER
    }

    fn encode<'t>(&self, text: &'t str) -> Vec<Self::Token<'t>> {
        text.split(is_separator)
            .filter(|word| !word.is_empty())
            .collect()
    }

    fn decode(&self, tokens: &[Self::Token<'_>]) -> String {
        tokens.join(" ")
    }
}

/// BPE encodings that can back a [`BpeTokenizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BpeEncoding {
    /// GPT-2 vocabulary (same ranks as `r50k_base`)
    Gpt2,
    /// `r50k_base`
    R50kBase,
    /// `p50k_base`
    P50kBase,
    /// `p50k_edit`
    P50kEdit,
    /// `cl100k_base`
    Cl100kBase,
}

impl BpeEncoding {
    /// Every known encoding
    pub const ALL: [BpeEncoding; 5] = [
        BpeEncoding::Gpt2,
        BpeEncoding::R50kBase,
        BpeEncoding::P50kBase,
        BpeEncoding::P50kEdit,
        BpeEncoding::Cl100kBase,
    ];

    /// Canonical name of the encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            BpeEncoding::Gpt2 => "gpt2",
            BpeEncoding::R50kBase => "r50k_base",
            BpeEncoding::P50kBase => "p50k_base",
            BpeEncoding::P50kEdit => "p50k_edit",
            BpeEncoding::Cl100kBase => "cl100k_base",
        }
    }
}

impl fmt::Display for BpeEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown encoding name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown BPE encoding: {0}")]
pub struct UnknownEncoding(pub String);

impl FromStr for BpeEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BpeEncoding::ALL
            .into_iter()
            .find(|encoding| encoding.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownEncoding(s.to_string()))
    }
}

#[cfg(feature = "tiktoken")]
pub use bpe::BpeTokenizer;

#[cfg(feature = "tiktoken")]
mod bpe {
    use super::{BpeEncoding, Tokenizer};
    use once_cell::sync::OnceCell;
    use tiktoken_rs::CoreBPE;

    static R50K_BASE: OnceCell<CoreBPE> = OnceCell::new();
    static P50K_BASE: OnceCell<CoreBPE> = OnceCell::new();
    static P50K_EDIT: OnceCell<CoreBPE> = OnceCell::new();
    static CL100K_BASE: OnceCell<CoreBPE> = OnceCell::new();

    /// Tokenizer backed by a tiktoken BPE encoding
    ///
    /// Encodings are loaded once per process and shared read-only afterwards.
    /// A load that fails is not remembered and will be attempted again.
    #[derive(Clone, Copy)]
    pub struct BpeTokenizer {
        encoding: BpeEncoding,
        bpe: &'static CoreBPE,
    }

    impl std::fmt::Debug for BpeTokenizer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("BpeTokenizer")
                .field("encoding", &self.encoding)
                .finish_non_exhaustive()
        }
    }

    impl BpeTokenizer {
        /// Load the given encoding, or `None` if it cannot be loaded
        pub fn load(encoding: BpeEncoding) -> Option<Self> {
            let loaded = match encoding {
                BpeEncoding::Gpt2 | BpeEncoding::R50kBase => {
                    R50K_BASE.get_or_try_init(tiktoken_rs::r50k_base)
                }
                BpeEncoding::P50kBase => P50K_BASE.get_or_try_init(tiktoken_rs::p50k_base),
                BpeEncoding::P50kEdit => P50K_EDIT.get_or_try_init(tiktoken_rs::p50k_edit),
                BpeEncoding::Cl100kBase => CL100K_BASE.get_or_try_init(tiktoken_rs::cl100k_base),
            };

            match loaded {
                Ok(bpe) => Some(Self { encoding, bpe }),
                Err(err) => {
                    tracing::debug!(%encoding, error = %err, "failed to load BPE encoding");
                    None
                }
            }
        }

        /// Encoding this tokenizer uses
        pub fn encoding(&self) -> BpeEncoding {
            self.encoding
        }
    }

    impl Tokenizer for BpeTokenizer {
        type Token<'t> = usize;

        fn name(&self) -> &str {
            self.encoding.as_str()
        }

        // Special-token text is encoded as ordinary text.
        fn encode<'t>(&self, text: &'t str) -> Vec<Self::Token<'t>> {
            self.bpe.encode_ordinary(text)
        }

        // A window boundary can fall inside a multi-byte character; only the
        // cut bytes at either edge become U+FFFD.
        fn decode(&self, tokens: &[Self::Token<'_>]) -> String {
            String::from_utf8_lossy(&self.bpe._decode_native(tokens)).into_owned()
        }
    }
}

/// Tokenizer chosen at call time
#[derive(Debug, Clone, Copy)]
pub enum ResolvedTokenizer {
    /// External BPE encoding
    #[cfg(feature = "tiktoken")]
    Bpe(BpeTokenizer),
    /// Whitespace fallback
    Whitespace(WhitespaceTokenizer),
}

impl ResolvedTokenizer {
    /// Name of the tokenizer that was actually selected
    pub fn name(&self) -> &str {
        match self {
            #[cfg(feature = "tiktoken")]
            ResolvedTokenizer::Bpe(tokenizer) => tokenizer.name(),
            ResolvedTokenizer::Whitespace(tokenizer) => tokenizer.name(),
        }
    }

    /// Whether resolution ended on the whitespace fallback
    pub fn is_fallback(&self) -> bool {
        matches!(self, ResolvedTokenizer::Whitespace(_))
    }
}

/// Resolve a tokenizer by name, falling back to whitespace tokens
pub fn resolve_tokenizer(name: &str) -> ResolvedTokenizer {
    if name.trim().eq_ignore_ascii_case(WHITESPACE_TOKENIZER) {
        return ResolvedTokenizer::Whitespace(WhitespaceTokenizer);
    }

    let encoding = match name.parse::<BpeEncoding>() {
        Ok(encoding) => encoding,
        Err(err) => {
            tracing::debug!(error = %err, "using whitespace tokenizer");
            return ResolvedTokenizer::Whitespace(WhitespaceTokenizer);
        }
    };

    load_encoding(encoding)
}

#[cfg(feature = "tiktoken")]
fn load_encoding(encoding: BpeEncoding) -> ResolvedTokenizer {
    match BpeTokenizer::load(encoding) {
        Some(tokenizer) => ResolvedTokenizer::Bpe(tokenizer),
        None => {
            tracing::debug!(%encoding, "BPE encoding unavailable, using whitespace tokenizer");
            ResolvedTokenizer::Whitespace(WhitespaceTokenizer)
        }
    }
}

#[cfg(not(feature = "tiktoken"))]
fn load_encoding(encoding: BpeEncoding) -> ResolvedTokenizer {
    tracing::debug!(%encoding, "built without tiktoken, using whitespace tokenizer");
    ResolvedTokenizer::Whitespace(WhitespaceTokenizer)
}
