//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - one section per source, one subsection per chunk
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    chunk_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunk_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn begin_source(&mut self, source: &str) -> Result<()> {
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn format_chunk(&mut self, chunk: &str, index: usize) -> Result<()> {
        self.chunk_count += 1;
        writeln!(self.writer, "### Chunk {}", index + 1)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{chunk}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total chunks: {}*", self.chunk_count)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_layout() {
        let mut buffer = Vec::new();
        {
            let mut formatter = MarkdownFormatter::new(&mut buffer);
            formatter.begin_source("notes.txt").unwrap();
            formatter.format_chunk("First.", 0).unwrap();
            formatter.format_chunk("Second.", 1).unwrap();
            formatter.finish().unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with("## notes.txt\n\n### Chunk 1\n\nFirst.\n"));
        assert!(output.contains("### Chunk 2\n\nSecond.\n"));
        assert!(output.ends_with("---\n*Total chunks: 2*\n"));
    }
}
