//! Demo command implementation

use anyhow::Result;
use clap::Args;
use slicewise_core::tokenizer::DEFAULT_TOKENIZER;
use slicewise_core::{chunk_charwise, chunk_sentencewise, chunk_tokenwise};
use std::io::{self, Write};

/// Text chunked by the demo command
pub const SAMPLE_TEXT: &str = "This is a short example. It demonstrates chunking by sentences, \
characters, or tokens. Use token-based chunking for embeddings \
and character/sentence chunking for simpler pipelines.";

/// Arguments for the demo command
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Tokenizer used for the token chunks
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_TOKENIZER)]
    pub tokenizer: String,
}

impl DemoArgs {
    /// Execute the demo command
    pub fn execute(&self) -> Result<()> {
        let stdout = io::stdout();
        self.write_demo(&mut stdout.lock())
    }

    /// Chunk the sample text with each strategy and print the results
    pub fn write_demo<W: Write>(&self, out: &mut W) -> Result<()> {
        let sentences = chunk_sentencewise(SAMPLE_TEXT, 50, 10)?;
        let chars = chunk_charwise(SAMPLE_TEXT, 50, 10)?;
        let tokens = chunk_tokenwise(SAMPLE_TEXT, 10, 2, &self.tokenizer)?;

        writeln!(out, "Sentence chunks: {sentences:?}")?;
        writeln!(out, "Char chunks: {chars:?}")?;
        writeln!(out, "Token chunks (approx): {tokens:?}")?;
        Ok(())
    }
}
