//! Command-line entry point for slicewise

use anyhow::Result;
use clap::Parser;
use slicewise_cli::commands::Commands;

/// Split text into overlapping chunks by tokens, sentences or characters
#[derive(Debug, Parser)]
#[command(name = "slicewise", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output and logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();

    match &cli.command {
        Commands::Chunk(args) => args.execute(cli.quiet),
        Commands::Demo(args) => args.execute(),
        Commands::List { subcommand } => subcommand.execute(),
        Commands::GenerateConfig(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
    }
}
