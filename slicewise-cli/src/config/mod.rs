//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slicewise_core::policy::{
    DEFAULT_MAX_CHARS, DEFAULT_MAX_TOKENS, DEFAULT_OVERLAP_CHARS, DEFAULT_TOKEN_OVERLAP,
};
use slicewise_core::tokenizer::DEFAULT_TOKENIZER;
use slicewise_core::{ChunkPolicy, Strategy};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;

        Ok(config)
    }

    /// Check every strategy's parameters, not only the selected one
    pub fn validate(&self) -> Result<()> {
        for strategy in Strategy::ALL {
            self.chunking
                .policy(strategy)
                .window_spec()
                .map_err(|e| CliError::ConfigError(format!("[chunking.{strategy}] {e}")))?;
        }

        Ok(())
    }
}

/// Chunking-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Strategy used when none is given on the command line
    pub strategy: Strategy,

    /// Token-wise settings
    pub token: TokenSettings,

    /// Sentence-wise settings
    pub sentence: CharSettings,

    /// Character-wise settings
    pub character: CharSettings,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Token,
            token: TokenSettings::default(),
            sentence: CharSettings::default(),
            character: CharSettings::default(),
        }
    }
}

impl ChunkingConfig {
    /// Policy for `strategy` built from the configured values
    pub fn policy(&self, strategy: Strategy) -> ChunkPolicy {
        match strategy {
            Strategy::Token => ChunkPolicy::Token {
                max_tokens: self.token.max_tokens,
                overlap: self.token.overlap,
                tokenizer: self.token.tokenizer.clone(),
            },
            Strategy::Sentence => ChunkPolicy::Sentence {
                max_chars: self.sentence.max_chars,
                overlap_chars: self.sentence.overlap_chars,
            },
            Strategy::Character => ChunkPolicy::Character {
                max_chars: self.character.max_chars,
                overlap_chars: self.character.overlap_chars,
            },
        }
    }
}

/// Token-wise settings
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TokenSettings {
    /// Maximum tokens per chunk
    pub max_tokens: i64,

    /// Tokens shared between consecutive chunks
    pub overlap: i64,

    /// Tokenizer name
    pub tokenizer: String,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            overlap: DEFAULT_TOKEN_OVERLAP,
            tokenizer: DEFAULT_TOKENIZER.to_string(),
        }
    }
}

/// Settings for the character-measured strategies
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CharSettings {
    /// Maximum characters per chunk
    pub max_chars: i64,

    /// Characters shared between consecutive chunks
    pub overlap_chars: i64,
}

impl Default for CharSettings {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            overlap_chars: DEFAULT_OVERLAP_CHARS,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Wrap JSON output in an object with the policy and chunk count
    pub include_stats: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            include_stats: false,
            pretty_json: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.chunking.strategy, Strategy::Token);
        assert_eq!(config.chunking.token.max_tokens, 500);
        assert_eq!(config.chunking.sentence.overlap_chars, 200);
        assert_eq!(config.output.default_format, "text");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
[chunking]
strategy = "sentence"

[chunking.sentence]
max_chars = 300
"#,
        )
        .unwrap();

        assert_eq!(config.chunking.strategy, Strategy::Sentence);
        assert_eq!(
            config.chunking.policy(Strategy::Sentence),
            ChunkPolicy::Sentence {
                max_chars: 300,
                overlap_chars: 200,
            }
        );
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[chunking.token]
max_tokens = 64
tokenizer = "cl100k_base"

[output]
default_format = "json"
"#
        )
        .unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.chunking.token.max_tokens, 64);
        assert_eq!(config.chunking.token.overlap, 50);
        assert_eq!(config.chunking.token.tokenizer, "cl100k_base");
        assert_eq!(config.output.default_format, "json");
    }

    #[test]
    fn test_load_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/slicewise.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[chunking\nstrategy = ").unwrap();

        let err = CliConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_validate_rejects_negative_overlap() {
        let mut config = CliConfig::default();
        config.chunking.character.overlap_chars = -1;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[chunking.character]"));
        assert!(err.to_string().contains("overlap_chars"));
    }
}
