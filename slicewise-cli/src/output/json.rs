//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs chunks as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    policy: Option<String>,
    source: String,
    chunks: Vec<ChunkData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChunkData {
    /// Input the chunk came from
    pub source: String,
    /// Position of the chunk within its source
    pub index: usize,
    /// The chunk text
    pub text: String,
    /// Length of the chunk in characters
    pub chars: usize,
}

/// Chunks wrapped with a summary of how they were produced
#[derive(Debug, Serialize, Deserialize)]
pub struct ChunkReport {
    /// Description of the chunk policy
    pub policy: String,
    /// Number of chunks across all sources
    pub total_chunks: usize,
    /// The chunks
    pub chunks: Vec<ChunkData>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            policy: None,
            source: String::new(),
            chunks: Vec::new(),
        }
    }

    /// Wrap the chunk array in a [`ChunkReport`] for `policy`
    pub fn with_stats(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    fn write_value<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn begin_source(&mut self, source: &str) -> Result<()> {
        self.source = source.to_string();
        Ok(())
    }

    fn format_chunk(&mut self, chunk: &str, index: usize) -> Result<()> {
        self.chunks.push(ChunkData {
            source: self.source.clone(),
            index,
            text: chunk.to_string(),
            chars: chunk.chars().count(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let chunks = std::mem::take(&mut self.chunks);

        match self.policy.take() {
            Some(policy) => {
                let report = ChunkReport {
                    policy,
                    total_chunks: chunks.len(),
                    chunks,
                };
                self.write_value(&report)?;
            }
            None => self.write_value(&chunks)?,
        }

        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(formatter: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut buffer = Vec::new();
        formatter(&mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_array_output() {
        let output = render(|buffer| {
            let mut formatter = JsonFormatter::new(buffer, false);
            formatter.begin_source("a.txt").unwrap();
            formatter.format_chunk("héllo", 0).unwrap();
            formatter.format_chunk("world", 1).unwrap();
            formatter.finish().unwrap();
        });

        let chunks: Vec<ChunkData> = serde_json::from_str(&output).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(
            chunks[0],
            ChunkData {
                source: "a.txt".to_string(),
                index: 0,
                text: "héllo".to_string(),
                chars: 5,
            }
        );
        assert_eq!(chunks[1].index, 1);
    }

    #[test]
    fn test_report_output() {
        let output = render(|buffer| {
            let mut formatter = JsonFormatter::new(buffer, true).with_stats("character (max_chars=4)");
            formatter.begin_source("a.txt").unwrap();
            formatter.format_chunk("abcd", 0).unwrap();
            formatter.begin_source("b.txt").unwrap();
            formatter.format_chunk("efgh", 0).unwrap();
            formatter.finish().unwrap();
        });

        let report: ChunkReport = serde_json::from_str(&output).unwrap();
        assert_eq!(report.policy, "character (max_chars=4)");
        assert_eq!(report.total_chunks, 2);
        assert_eq!(report.chunks[1].source, "b.txt");
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        let output = render(|buffer| {
            let mut formatter = JsonFormatter::new(buffer, false);
            formatter.finish().unwrap();
        });

        assert_eq!(output, "[]\n");
    }
}
