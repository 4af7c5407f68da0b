//! Chunk command implementation

use crate::config::{CliConfig, OutputConfig};
use crate::error::CliError;
use crate::input::resolve_inputs;
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use slicewise_core::tokenizer::WHITESPACE_TOKENIZER;
use slicewise_core::{resolve_tokenizer, ChunkPolicy, Strategy};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the chunk command
#[derive(Debug, Args)]
pub struct ChunkArgs {
    /// Input files or patterns (supports glob, `-` for stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: from config, else text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Chunking strategy [default: from config, else token]
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Maximum chunk size (tokens for `token`, characters otherwise)
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Overlap between consecutive chunks, in the same unit as --max
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub overlap: Option<i64>,

    /// Tokenizer for the token strategy (falls back to whitespace words)
    #[arg(short, long, value_name = "NAME")]
    pub tokenizer: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text with chunks separated by blank lines
    Text,
    /// JSON array of chunks with metadata
    Json,
    /// Markdown formatted output
    Markdown,
}

/// Strategy names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Fixed windows of tokens
    Token,
    /// Sentences packed up to a character limit
    Sentence,
    /// Fixed windows of characters
    #[value(alias = "char")]
    Character,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Token => Strategy::Token,
            StrategyArg::Sentence => Strategy::Sentence,
            StrategyArg::Character => Strategy::Character,
        }
    }
}

impl ChunkArgs {
    /// Execute the chunk command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        log::info!("Starting chunking");
        log::debug!("Arguments: {:?}", self);

        let config = self.load_config()?;
        let policy = self.build_policy(&config)?;
        let format = self.resolve_format(&config.output)?;

        let sources = resolve_inputs(&self.input)?;
        log::info!("Chunking {} source(s) with {}", sources.len(), policy);

        let mut formatter = create_formatter(format, self.open_output()?, &config.output, &policy);
        let mut progress = ProgressReporter::new(quiet);
        progress.init_files(sources.len() as u64);

        let mut total_chunks = 0;
        for source in &sources {
            let name = source.to_string();
            let text = source.read_text()?;
            let chunks = policy.apply(&text).map_err(CliError::from)?;
            log::debug!(
                "{name}: {} characters -> {} chunks",
                text.chars().count(),
                chunks.len()
            );

            formatter.begin_source(&name)?;
            for (index, chunk) in chunks.iter().enumerate() {
                formatter.format_chunk(chunk, index)?;
            }

            total_chunks += chunks.len();
            progress.file_completed(&name, chunks.len());
        }

        formatter.finish()?;
        progress.finish();

        log::info!("Wrote {total_chunks} chunks");
        Ok(())
    }

    fn load_config(&self) -> Result<CliConfig> {
        match &self.config {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                CliConfig::load(path)
            }
            None => Ok(CliConfig::default()),
        }
    }

    /// Configured policy for the selected strategy with flag overrides applied
    fn build_policy(&self, config: &CliConfig) -> Result<ChunkPolicy> {
        let strategy = self
            .strategy
            .map(Strategy::from)
            .unwrap_or(config.chunking.strategy);

        let mut policy = config.chunking.policy(strategy);
        if let Some(max) = self.max {
            policy = policy.with_max(max);
        }
        if let Some(overlap) = self.overlap {
            policy = policy.with_overlap(overlap);
        }
        if let Some(tokenizer) = &self.tokenizer {
            policy = policy.with_tokenizer(tokenizer.as_str());
        }

        policy.window_spec().map_err(CliError::from)?;

        if let ChunkPolicy::Token { tokenizer, .. } = &policy {
            if tokenizer != WHITESPACE_TOKENIZER && resolve_tokenizer(tokenizer).is_fallback() {
                log::warn!("Tokenizer '{tokenizer}' is unavailable, counting whitespace words");
            }
        }

        Ok(policy)
    }

    fn resolve_format(&self, output: &OutputConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }

        OutputFormat::from_str(&output.default_format, true).map_err(|_| {
            CliError::ConfigError(format!(
                "unknown output format '{}' in [output] default_format",
                output.default_format
            ))
            .into()
        })
    }

    fn open_output(&self) -> Result<Box<dyn Write + Send + Sync>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(BufWriter::new(io::stdout()))),
        }
    }
}

/// Build the formatter for `format` writing to `writer`
pub fn create_formatter<W: Write + Send + Sync + 'static>(
    format: OutputFormat,
    writer: W,
    output: &OutputConfig,
    policy: &ChunkPolicy,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(writer, output.pretty_json);
            if output.include_stats {
                Box::new(formatter.with_stats(policy.to_string()))
            } else {
                Box::new(formatter)
            }
        }
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ChunkArgs {
        ChunkArgs {
            input: vec!["test.txt".to_string()],
            output: None,
            format: None,
            strategy: None,
            max: None,
            overlap: None,
            tokenizer: None,
            config: None,
        }
    }

    #[test]
    fn test_policy_from_defaults() {
        let policy = args().build_policy(&CliConfig::default()).unwrap();
        assert_eq!(policy, ChunkPolicy::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = CliConfig::default();
        config.chunking.strategy = Strategy::Sentence;
        config.chunking.character.overlap_chars = 7;

        let mut args = args();
        args.strategy = Some(StrategyArg::Character);
        args.max = Some(40);
        args.tokenizer = Some("cl100k_base".to_string());

        let policy = args.build_policy(&config).unwrap();
        assert_eq!(
            policy,
            ChunkPolicy::Character {
                max_chars: 40,
                overlap_chars: 7,
            }
        );
    }

    #[test]
    fn test_config_strategy_used_without_flag() {
        let mut config = CliConfig::default();
        config.chunking.strategy = Strategy::Sentence;

        let policy = args().build_policy(&config).unwrap();
        assert_eq!(policy.strategy(), Strategy::Sentence);
    }

    #[test]
    fn test_invalid_parameters_rejected_before_reading_input() {
        let mut args = args();
        args.overlap = Some(-3);

        let err = args.build_policy(&CliConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "Chunking error: invalid argument: overlap must be >= 0");

        let mut args = self::args();
        args.strategy = Some(StrategyArg::Sentence);
        args.max = Some(0);

        let err = args.build_policy(&CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("max_chars must be > 0"));
    }

    #[test]
    fn test_format_resolution() {
        let mut output = OutputConfig::default();
        assert_eq!(args().resolve_format(&output).unwrap(), OutputFormat::Text);

        output.default_format = "Markdown".to_string();
        assert_eq!(args().resolve_format(&output).unwrap(), OutputFormat::Markdown);

        let mut args = args();
        args.format = Some(OutputFormat::Json);
        assert_eq!(args.resolve_format(&output).unwrap(), OutputFormat::Json);

        output.default_format = "yaml".to_string();
        let err = self::args().resolve_format(&output).unwrap_err();
        assert!(err.to_string().contains("unknown output format 'yaml'"));
    }

    #[test]
    fn test_strategy_arg_conversion() {
        assert_eq!(Strategy::from(StrategyArg::Token), Strategy::Token);
        assert_eq!(Strategy::from(StrategyArg::Sentence), Strategy::Sentence);
        assert_eq!(Strategy::from(StrategyArg::Character), Strategy::Character);
        assert_eq!(
            StrategyArg::from_str("char", true).unwrap(),
            StrategyArg::Character
        );
    }
}
