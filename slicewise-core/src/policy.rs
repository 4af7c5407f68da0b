//! Serializable chunking configuration

use crate::character::slice_chars;
use crate::error::Result;
use crate::sentence::{pack_sentences, split_sentences};
use crate::token::chunk_with_named;
use crate::tokenizer::DEFAULT_TOKENIZER;
use crate::window::{Unit, WindowSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default window size for token-wise chunking
pub const DEFAULT_MAX_TOKENS: i64 = 500;
/// Default token overlap
pub const DEFAULT_TOKEN_OVERLAP: i64 = 50;
/// Default window size for sentence- and character-wise chunking
pub const DEFAULT_MAX_CHARS: i64 = 2000;
/// Default character overlap
pub const DEFAULT_OVERLAP_CHARS: i64 = 200;

/// Chunking strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Windows over tokenizer tokens
    Token,
    /// Greedy packing of sentences
    Sentence,
    /// Windows over characters
    Character,
}

impl Strategy {
    /// Every strategy
    pub const ALL: [Strategy; 3] = [Strategy::Token, Strategy::Sentence, Strategy::Character];

    /// Name used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Token => "token",
            Strategy::Sentence => "sentence",
            Strategy::Character => "character",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Token => "fixed windows of tokenizer tokens (whitespace words as fallback)",
            Strategy::Sentence => "sentences packed greedily up to a character limit",
            Strategy::Character => "fixed windows of Unicode characters",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "token" | "tokens" => Ok(Strategy::Token),
            "sentence" | "sentences" => Ok(Strategy::Sentence),
            "character" | "characters" | "char" | "chars" => Ok(Strategy::Character),
            other => Err(format!("unknown chunking strategy: {other}")),
        }
    }
}

fn default_max_tokens() -> i64 {
    DEFAULT_MAX_TOKENS
}

fn default_token_overlap() -> i64 {
    DEFAULT_TOKEN_OVERLAP
}

fn default_tokenizer() -> String {
    DEFAULT_TOKENIZER.to_string()
}

fn default_max_chars() -> i64 {
    DEFAULT_MAX_CHARS
}

fn default_overlap_chars() -> i64 {
    DEFAULT_OVERLAP_CHARS
}

/// A strategy together with its parameters
///
/// Sizes are signed so that configuration files and command lines can be
/// deserialized as-is; they are validated when the policy is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ChunkPolicy {
    /// Token-wise chunking
    Token {
        /// Maximum tokens per chunk
        #[serde(default = "default_max_tokens")]
        max_tokens: i64,
        /// Tokens shared between consecutive chunks
        #[serde(default = "default_token_overlap")]
        overlap: i64,
        /// Tokenizer to look up before falling back to whitespace
        #[serde(default = "default_tokenizer")]
        tokenizer: String,
    },
    /// Sentence-wise chunking
    Sentence {
        /// Maximum characters per chunk (single long sentences may exceed it)
        #[serde(default = "default_max_chars")]
        max_chars: i64,
        /// Trailing characters of a chunk carried into the next one
        #[serde(default = "default_overlap_chars")]
        overlap_chars: i64,
    },
    /// Character-wise chunking
    Character {
        /// Maximum characters per chunk
        #[serde(default = "default_max_chars")]
        max_chars: i64,
        /// Characters shared between consecutive chunks
        #[serde(default = "default_overlap_chars")]
        overlap_chars: i64,
    },
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        ChunkPolicy::for_strategy(Strategy::Token)
    }
}

impl ChunkPolicy {
    /// Default parameters for `strategy`
    pub fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Token => ChunkPolicy::Token {
                max_tokens: DEFAULT_MAX_TOKENS,
                overlap: DEFAULT_TOKEN_OVERLAP,
                tokenizer: default_tokenizer(),
            },
            Strategy::Sentence => ChunkPolicy::Sentence {
                max_chars: DEFAULT_MAX_CHARS,
                overlap_chars: DEFAULT_OVERLAP_CHARS,
            },
            Strategy::Character => ChunkPolicy::Character {
                max_chars: DEFAULT_MAX_CHARS,
                overlap_chars: DEFAULT_OVERLAP_CHARS,
            },
        }
    }

    /// Strategy of this policy
    pub fn strategy(&self) -> Strategy {
        match self {
            ChunkPolicy::Token { .. } => Strategy::Token,
            ChunkPolicy::Sentence { .. } => Strategy::Sentence,
            ChunkPolicy::Character { .. } => Strategy::Character,
        }
    }

    /// Replace the chunk size limit
    pub fn with_max(mut self, max: i64) -> Self {
        match &mut self {
            ChunkPolicy::Token { max_tokens, .. } => *max_tokens = max,
            ChunkPolicy::Sentence { max_chars, .. }
            | ChunkPolicy::Character { max_chars, .. } => *max_chars = max,
        }
        self
    }

    /// Replace the overlap
    pub fn with_overlap(mut self, value: i64) -> Self {
        match &mut self {
            ChunkPolicy::Token { overlap, .. } => *overlap = value,
            ChunkPolicy::Sentence { overlap_chars, .. }
            | ChunkPolicy::Character { overlap_chars, .. } => *overlap_chars = value,
        }
        self
    }

    /// Replace the tokenizer name; ignored by character-based strategies
    pub fn with_tokenizer(mut self, name: impl Into<String>) -> Self {
        if let ChunkPolicy::Token { tokenizer, .. } = &mut self {
            *tokenizer = name.into();
        }
        self
    }

    /// Validate the numeric parameters
    pub fn window_spec(&self) -> Result<WindowSpec> {
        match self {
            ChunkPolicy::Token {
                max_tokens,
                overlap,
                ..
            } => WindowSpec::from_signed(*max_tokens, *overlap, Unit::Tokens),
            ChunkPolicy::Sentence {
                max_chars,
                overlap_chars,
            }
            | ChunkPolicy::Character {
                max_chars,
                overlap_chars,
            } => WindowSpec::from_signed(*max_chars, *overlap_chars, Unit::Chars),
        }
    }

    /// Chunk `text` according to this policy
    pub fn apply(&self, text: &str) -> Result<Vec<String>> {
        let spec = self.window_spec()?;

        let chunks = match self {
            ChunkPolicy::Token { tokenizer, .. } => chunk_with_named(tokenizer, text, spec),
            ChunkPolicy::Sentence { .. } => pack_sentences(&split_sentences(text), spec),
            ChunkPolicy::Character { .. } => slice_chars(text, spec).map(str::to_string).collect(),
        };

        tracing::debug!(
            strategy = %self.strategy(),
            chunks = chunks.len(),
            "applied chunk policy"
        );
        Ok(chunks)
    }
}

impl fmt::Display for ChunkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkPolicy::Token {
                max_tokens,
                overlap,
                tokenizer,
            } => write!(
                f,
                "token (max_tokens={max_tokens}, overlap={overlap}, tokenizer={tokenizer})"
            ),
            ChunkPolicy::Sentence {
                max_chars,
                overlap_chars,
            } => write!(
                f,
                "sentence (max_chars={max_chars}, overlap_chars={overlap_chars})"
            ),
            ChunkPolicy::Character {
                max_chars,
                overlap_chars,
            } => write!(
                f,
                "character (max_chars={max_chars}, overlap_chars={overlap_chars})"
            ),
        }
    }
}
