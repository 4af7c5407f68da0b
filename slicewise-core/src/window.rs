//! Sliding windows with overlap and guaranteed forward progress
//!
//! Token-wise and character-wise chunking both walk a sequence of units in
//! windows of at most `size` units. Consecutive windows share up to `overlap`
//! units, and each window starts at least one unit after the previous one, so
//! the walk always terminates even when `overlap >= size`.

use crate::error::{ChunkError, Result};
use std::ops::Range;

/// Unit a window is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Tokenizer tokens
    Tokens,
    /// Unicode code points
    Chars,
}

impl Unit {
    /// Parameter name used for the window size
    pub fn size_name(&self) -> &'static str {
        match self {
            Unit::Tokens => "max_tokens",
            Unit::Chars => "max_chars",
        }
    }

    /// Parameter name used for the overlap
    pub fn overlap_name(&self) -> &'static str {
        match self {
            Unit::Tokens => "overlap",
            Unit::Chars => "overlap_chars",
        }
    }
}

/// Validated window parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    size: usize,
    overlap: usize,
    unit: Unit,
}

impl WindowSpec {
    /// Create a window spec, rejecting a zero size
    pub fn new(size: usize, overlap: usize, unit: Unit) -> Result<Self> {
        if size == 0 {
            return Err(ChunkError::InvalidArgument {
                name: unit.size_name(),
                reason: "must be > 0",
            });
        }

        Ok(Self {
            size,
            overlap,
            unit,
        })
    }

    /// Create a window spec from signed values, as read from configuration
    /// files or the command line.
    pub fn from_signed(size: i64, overlap: i64, unit: Unit) -> Result<Self> {
        if size <= 0 {
            return Err(ChunkError::InvalidArgument {
                name: unit.size_name(),
                reason: "must be > 0",
            });
        }
        if overlap < 0 {
            return Err(ChunkError::InvalidArgument {
                name: unit.overlap_name(),
                reason: "must be >= 0",
            });
        }

        let size = usize::try_from(size).map_err(|_| ChunkError::InvalidArgument {
            name: unit.size_name(),
            reason: "does not fit in usize",
        })?;
        let overlap = usize::try_from(overlap).map_err(|_| ChunkError::InvalidArgument {
            name: unit.overlap_name(),
            reason: "does not fit in usize",
        })?;

        Self::new(size, overlap, unit)
    }

    /// Maximum units per window
    pub fn size(&self) -> usize {
        self.size
    }

    /// Requested overlap between consecutive windows
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Unit the window is measured in
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Iterate over the windows covering `total` units
    pub fn windows(&self, total: usize) -> Windows {
        Windows {
            start: 0,
            total,
            size: self.size,
            overlap: self.overlap,
            done: total == 0,
        }
    }
}

/// Start of the window following `[.., end)`.
///
/// Backs off by `overlap`, but never further than `end - size + 1`, so the
/// next window always begins after the previous one did.
pub fn next_start(end: usize, size: usize, overlap: usize) -> usize {
    end.saturating_sub(overlap).max((end + 1).saturating_sub(size))
}

/// Iterator over window ranges, see [`WindowSpec::windows`]
#[derive(Debug, Clone)]
pub struct Windows {
    start: usize,
    total: usize,
    size: usize,
    overlap: usize,
    done: bool,
}

impl Iterator for Windows {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let start = self.start;
        let end = (start + self.size).min(self.total);

        if end == self.total {
            self.done = true;
        } else {
            self.start = next_start(end, self.size, self.overlap);
        }

        Some(start..end)
    }
}
