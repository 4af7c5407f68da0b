//! CLI command implementations

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use slicewise_core::tokenizer::WHITESPACE_TOKENIZER;
use slicewise_core::{resolve_tokenizer, BpeEncoding, Strategy};

pub mod chunk;
pub mod demo;
pub mod generate_config;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text files into chunks
    Chunk(chunk::ChunkArgs),

    /// Chunk a built-in sample text with every strategy
    Demo(demo::DemoArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Generate a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Validate a configuration file
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ListCommands {
    /// List chunking strategies
    Strategies,

    /// List tokenizer names and whether they can be loaded
    Tokenizers,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Print the requested listing
    pub fn execute(&self) -> Result<()> {
        for line in self.lines() {
            println!("{line}");
        }
        Ok(())
    }

    /// Lines of the listing
    pub fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Strategies => Strategy::ALL
                .iter()
                .map(|s| format!("{:<10} {}", s.as_str(), s.description()))
                .collect(),
            ListCommands::Tokenizers => {
                let mut lines: Vec<String> = BpeEncoding::ALL
                    .iter()
                    .map(|encoding| {
                        let status = if resolve_tokenizer(encoding.as_str()).is_fallback() {
                            "unavailable, whitespace fallback"
                        } else {
                            "available"
                        };
                        format!("{:<12} {status}", encoding.as_str())
                    })
                    .collect();
                lines.push(format!("{WHITESPACE_TOKENIZER:<12} always available"));
                lines
            }
            ListCommands::Formats => chunk::OutputFormat::value_variants()
                .iter()
                .filter_map(|format| format.to_possible_value())
                .map(|value| match value.get_help() {
                    Some(help) => format!("{:<10} {help}", value.get_name()),
                    None => value.get_name().to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_debug_format() {
        let chunk_cmd = Commands::Chunk(chunk::ChunkArgs {
            input: vec!["test.txt".to_string()],
            output: None,
            format: Some(chunk::OutputFormat::Json),
            strategy: Some(chunk::StrategyArg::Sentence),
            max: Some(100),
            overlap: None,
            tokenizer: None,
            config: None,
        });

        let debug_str = format!("{:?}", chunk_cmd);
        assert!(debug_str.contains("Chunk"));
        assert!(debug_str.contains("test.txt"));

        let list_cmd = Commands::List {
            subcommand: ListCommands::Strategies,
        };

        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Strategies"));
    }

    #[test]
    fn test_list_strategies() {
        let lines = ListCommands::Strategies.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("token"));
        assert!(lines[1].starts_with("sentence"));
        assert!(lines[2].starts_with("character"));
    }

    #[test]
    fn test_list_tokenizers() {
        let lines = ListCommands::Tokenizers.lines();
        assert_eq!(lines.len(), BpeEncoding::ALL.len() + 1);
        assert!(lines[0].starts_with("gpt2"));
        assert!(lines.last().unwrap().starts_with("whitespace"));
    }

    #[test]
    fn test_list_formats() {
        let lines = ListCommands::Formats.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("text"));
        assert!(lines[1].starts_with("json"));
        assert!(lines[2].starts_with("markdown"));
    }
}
