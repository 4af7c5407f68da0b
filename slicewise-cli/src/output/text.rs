//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - chunks separated by a blank line
pub struct TextFormatter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn begin_source(&mut self, _source: &str) -> Result<()> {
        Ok(())
    }

    fn format_chunk(&mut self, chunk: &str, _index: usize) -> Result<()> {
        if self.written > 0 {
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "{chunk}")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
