//! Character-wise chunking

use crate::error::Result;
use crate::window::{Unit, WindowSpec};

/// Cut `text` into windows of at most `max_chars` characters.
///
/// Lengths are counted in Unicode code points and cuts always fall on
/// character boundaries. Consecutive chunks share up to `overlap_chars`
/// characters; chunks are plain substrings, so dropping each chunk's overlap
/// and concatenating gives back the input.
///
/// # Errors
///
/// Returns [`ChunkError::InvalidArgument`](crate::ChunkError::InvalidArgument)
/// when `max_chars` is zero.
///
/// # Example
///
/// ```rust
/// use slicewise_core::chunk_charwise;
///
/// let chunks = chunk_charwise("abcdefghij", 4, 1).unwrap();
/// assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);
/// ```
pub fn chunk_charwise(text: &str, max_chars: usize, overlap_chars: usize) -> Result<Vec<String>> {
    let spec = WindowSpec::new(max_chars, overlap_chars, Unit::Chars)?;
    Ok(slice_chars(text, spec).map(str::to_string).collect())
}

pub(crate) fn slice_chars(text: &str, spec: WindowSpec) -> impl Iterator<Item = &str> + '_ {
    // Byte offset of every character, plus the end of the text
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .collect();
    let total = offsets.len() - 1;

    spec.windows(total).map(move |range| &text[offsets[range.start]..offsets[range.end]])
}
