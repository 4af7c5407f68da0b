//! Output formatting module

use anyhow::Result;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Called before the chunks of each input source
    fn begin_source(&mut self, source: &str) -> Result<()>;

    /// Format and output a single chunk; `index` restarts at 0 for each source
    fn format_chunk(&mut self, chunk: &str, index: usize) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
