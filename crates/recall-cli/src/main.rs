//! recall CLI — score memorization attempts from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod feedback;
mod report;

#[derive(Parser)]
#[command(name = "recall", version, about = "Score a recalled passage against its original")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an attempt against a passage
    Compare {
        /// File holding the original passage
        #[arg(long)]
        passage: PathBuf,

        /// File holding the attempt (reads stdin when omitted)
        #[arg(long)]
        attempt: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Word alignment: positional, sequence
        #[arg(long)]
        alignment: Option<String>,

        /// Exit code 1 if accuracy is below this value
        #[arg(long)]
        min_accuracy: Option<u8>,

        /// Show a character-level diff
        #[arg(long)]
        chars: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show how similar two words are
    Similar {
        /// First word
        first: String,

        /// Second word
        second: String,

        /// Similarity needed to count as a match
        #[arg(long, default_value = "0.8")]
        threshold: f64,
    },

    /// Run drill sets and check their expected scores
    Check {
        /// Path to .toml drill set or directory
        #[arg(long)]
        drills: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and example drill set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recall=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            passage,
            attempt,
            format,
            alignment,
            min_accuracy,
            chars,
            config,
        } => commands::compare::execute(
            passage,
            attempt,
            format,
            alignment,
            min_accuracy,
            chars,
            config,
        ),
        Commands::Similar {
            first,
            second,
            threshold,
        } => commands::similar::execute(first, second, threshold),
        Commands::Check { drills, config } => commands::check::execute(drills, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
