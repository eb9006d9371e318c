//! # Passage Harness CLI (`psg`)
//!
//! ## Usage
//!
//! ```bash
//! psg --config ./config/psg.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `psg ask "<question>"` | Print the context extracted for a question |
//! | `psg keywords "<question>"` | Print the keywords a question yields |
//! | `psg check` | Validate config and load the reference text |
//! | `psg serve` | Start the HTTP tool server |
//!
//! Log verbosity is controlled by `RUST_LOG` (default `info`); logs go to
//! stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use passage_harness::ask::{self, AskOverrides};
use passage_harness::{config, server};

/// Passage Harness CLI: keyword-grounded context extraction for LLM tools.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/psg.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "psg",
    about = "Passage Harness: keyword-grounded context extraction for LLM tools",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/psg.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract grounding context for a question.
    ///
    /// Prints the selected keywords, passage count, and the context that
    /// would be handed to the language model.
    Ask {
        /// The question about the reference text.
        question: String,

        /// Override the maximum context length in characters.
        #[arg(long)]
        budget: Option<usize>,

        /// Override the window radius in characters.
        #[arg(long)]
        radius: Option<usize>,

        /// Print a JSON object instead of plain text.
        #[arg(long)]
        json: bool,
    },

    /// Show the keywords extracted from a question.
    Keywords {
        /// The question to analyse.
        question: String,
    },

    /// Validate the configuration and load the reference text.
    Check,

    /// Start the HTTP tool server.
    ///
    /// Binds to the address configured in `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Ask {
            question,
            budget,
            radius,
            json,
        } => {
            ask::run_ask(&cfg, &question, AskOverrides { budget, radius }, json).await?;
        }
        Commands::Keywords { question } => {
            ask::run_keywords(&cfg, &question)?;
        }
        Commands::Check => {
            ask::run_check(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
