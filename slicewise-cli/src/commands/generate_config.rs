//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use slicewise_core::policy::{
    DEFAULT_MAX_CHARS, DEFAULT_MAX_TOKENS, DEFAULT_OVERLAP_CHARS, DEFAULT_TOKEN_OVERLAP,
};
use slicewise_core::tokenizer::DEFAULT_TOKENIZER;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to adjust chunk sizes");
        println!("2. Validate your configuration:");
        println!("   slicewise validate -c {}", self.output.display());
        println!("3. Use it for chunking:");
        println!("   slicewise chunk -i input.txt -c {}", self.output.display());

        Ok(())
    }
}

/// Template configuration content, filled with the built-in defaults
pub fn generate_template() -> String {
    format!(
        r#"# slicewise configuration

[chunking]
# Strategy used when --strategy is not given: "token", "sentence" or "character"
strategy = "token"

# Fixed windows of tokens
[chunking.token]
max_tokens = {DEFAULT_MAX_TOKENS}
# Tokens repeated at the start of the next chunk
overlap = {DEFAULT_TOKEN_OVERLAP}
# gpt2, r50k_base, p50k_base, p50k_edit, cl100k_base or whitespace.
# Unavailable tokenizers fall back to whitespace-separated words.
tokenizer = "{DEFAULT_TOKENIZER}"

# Sentences packed greedily; a single longer sentence becomes its own chunk
[chunking.sentence]
max_chars = {DEFAULT_MAX_CHARS}
# Trailing characters of a chunk carried into the next one
overlap_chars = {DEFAULT_OVERLAP_CHARS}

# Fixed windows of characters
[chunking.character]
max_chars = {DEFAULT_MAX_CHARS}
overlap_chars = {DEFAULT_OVERLAP_CHARS}

[output]
# "text", "json" or "markdown"
default_format = "text"
pretty_json = true
# Wrap JSON output in an object with the policy and the chunk count
include_stats = false
"#
    )
}
