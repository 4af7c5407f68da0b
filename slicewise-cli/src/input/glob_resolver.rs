//! Input pattern resolution using glob

use crate::error::CliError;
use crate::input::FileReader;
use anyhow::{Context, Result};
use glob::glob;
use std::fmt;
use std::path::PathBuf;

/// Pattern that stands for standard input
pub const STDIN_MARKER: &str = "-";

/// A single text source to chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Read the whole source as text
    pub fn read_text(&self) -> Result<String> {
        match self {
            InputSource::Stdin => FileReader::read_stdin(),
            InputSource::File(path) => FileReader::read_text(path),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve input patterns to sources
///
/// `-` selects standard input (at most once); everything else is a glob
/// pattern. Matched files are de-duplicated and sorted, and come after stdin.
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<InputSource>> {
    let mut stdin = false;
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern == STDIN_MARKER {
            stdin = true;
            continue;
        }

        let paths =
            glob(pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern} ({e})")))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() && !stdin {
        anyhow::bail!("No files found matching the provided patterns");
    }

    files.sort();
    files.dedup();

    let mut sources = Vec::with_capacity(files.len() + 1);
    if stdin {
        sources.push(InputSource::Stdin);
    }
    sources.extend(files.into_iter().map(InputSource::File));

    Ok(sources)
}
