//! Sentence-wise chunking
//!
//! Sentences are found with a punctuation heuristic and packed greedily into
//! chunks of at most `max_chars` characters. The heuristic is deliberately
//! simple: abbreviations ("Dr. Smith") and similar cases split where a real
//! sentence segmenter would not.

use crate::error::Result;
use crate::tokenizer::is_separator;
use crate::window::{Unit, WindowSpec};

/// Characters that can end a sentence
const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Split `text` into trimmed, non-empty sentences.
///
/// A split happens after `.`, `!` or `?` when it is followed by whitespace;
/// the whole whitespace run is dropped.
///
/// ```rust
/// use slicewise_core::split_sentences;
///
/// assert_eq!(
///     split_sentences("It works. Does it?  Yes!"),
///     vec!["It works.", "Does it?", "Yes!"]
/// );
/// ```
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut segment_start = 0;
    let mut prev = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if is_separator(ch) && prev.is_some_and(|p| TERMINATORS.contains(&p)) {
            push_trimmed(&mut sentences, &text[segment_start..idx]);

            segment_start = text.len();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !is_separator(next) {
                    segment_start = next_idx;
                    break;
                }
                chars.next();
            }
            prev = None;
            continue;
        }
        prev = Some(ch);
    }
    push_trimmed(&mut sentences, &text[segment_start..]);

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, fragment: &'a str) {
    let fragment = fragment.trim_matches(is_separator);
    if !fragment.is_empty() {
        sentences.push(fragment);
    }
}

/// Pack sentences into chunks of at most `max_chars` characters.
///
/// Sentences are joined with a single space. A sentence longer than
/// `max_chars` becomes a chunk of its own rather than being cut or dropped.
/// When a chunk is closed, its last `overlap_chars` characters seed the next
/// one. If the next sentence does not fit even after that seed, the seed is
/// discarded and the sentence starts a fresh chunk.
///
/// # Errors
///
/// Returns [`ChunkError::InvalidArgument`](crate::ChunkError::InvalidArgument)
/// when `max_chars` is zero.
pub fn chunk_sentencewise(
    text: &str,
    max_chars: usize,
    overlap_chars: usize,
) -> Result<Vec<String>> {
    let spec = WindowSpec::new(max_chars, overlap_chars, Unit::Chars)?;
    Ok(pack_sentences(&split_sentences(text), spec))
}

pub(crate) fn pack_sentences(sentences: &[&str], spec: WindowSpec) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    // `current` holds nothing but the overlap carried from the last chunk
    let mut carried = false;
    let mut i = 0;

    while i < sentences.len() {
        let sentence = sentences[i];
        let sentence_len = sentence.chars().count();

        if current.is_empty() {
            current.push_str(sentence);
            current_len = sentence_len;
        } else if current_len + 1 + sentence_len <= spec.size() {
            current.push(' ');
            current.push_str(sentence);
            if current.starts_with(is_separator) {
                current = current.trim_start_matches(is_separator).to_string();
            }
            current_len = current.chars().count();
        } else if carried {
            current.clear();
            current_len = 0;
            carried = false;
            continue;
        } else {
            let overlap = tail_chars(&current, spec.overlap()).to_string();
            tracing::trace!(chars = current_len, "sentence chunk");
            chunks.push(std::mem::replace(&mut current, overlap));
            current_len = current.chars().count();
            carried = !current.is_empty();
            continue;
        }

        carried = false;
        i += 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Last `count` characters of `text`, or all of it when it is shorter
fn tail_chars(text: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }

    match text.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}
