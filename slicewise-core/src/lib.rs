//! Overlapping text chunking for embedding pipelines
//!
//! Three independent strategies split a text into an ordered list of chunks:
//!
//! - [`chunk_tokenwise`]: fixed windows of tokenizer tokens. A BPE encoding is
//!   used when it can be loaded; otherwise whitespace-separated words stand in
//!   for tokens.
//! - [`chunk_sentencewise`]: sentences found by a punctuation heuristic,
//!   packed greedily up to a character limit.
//! - [`chunk_charwise`]: fixed windows of Unicode characters.
//!
//! Every strategy lets consecutive chunks overlap and always makes forward
//! progress, whatever the overlap is set to.
//!
//! # Example
//!
//! ```rust
//! use slicewise_core::{chunk_charwise, chunk_sentencewise, chunk_tokenwise};
//!
//! let text = "Chunking is simple. Overlap keeps context. Progress is guaranteed.";
//!
//! let by_chars = chunk_charwise(text, 24, 4).unwrap();
//! assert!(by_chars.iter().all(|chunk| chunk.chars().count() <= 24));
//!
//! let by_sentence = chunk_sentencewise(text, 45, 0).unwrap();
//! assert_eq!(by_sentence[0], "Chunking is simple. Overlap keeps context.");
//!
//! let by_token = chunk_tokenwise(text, 4, 1, "whitespace").unwrap();
//! assert_eq!(by_token[0], "Chunking is simple. Overlap");
//! ```

#![warn(missing_docs)]

pub mod character;
pub mod error;
pub mod policy;
pub mod sentence;
pub mod token;
pub mod tokenizer;
pub mod window;

pub use character::chunk_charwise;
pub use error::{ChunkError, Result};
pub use policy::{ChunkPolicy, Strategy};
pub use sentence::{chunk_sentencewise, split_sentences};
pub use token::{chunk_tokenwise, chunk_tokenwise_with};
pub use tokenizer::{
    resolve_tokenizer, BpeEncoding, ResolvedTokenizer, Tokenizer, WhitespaceTokenizer,
};
#[cfg(feature = "tiktoken")]
pub use tokenizer::BpeTokenizer;
pub use window::{Unit, WindowSpec};
