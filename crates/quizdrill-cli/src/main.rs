//! quizdrill CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizdrill", version, about = "Offline-capable quiz trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive quiz session
    Run {
        /// Question bank URL or file path (overrides config)
        #[arg(long)]
        bank: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write a session report JSON here when the run ends
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Validate a question bank document
    Validate {
        /// Path to the bank JSON file
        #[arg(long)]
        bank: PathBuf,
    },

    /// Show saved progress and per-category accuracy
    Stats {
        /// Question bank URL or file path (overrides config)
        #[arg(long)]
        bank: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Delete the saved progress snapshot
    Reset {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and an example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdrill_core=info".parse().unwrap())
                .add_directive("quizdrill_store=info".parse().unwrap())
                .add_directive("quizdrill_sources=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            bank,
            config,
            export,
        } => commands::run::execute(bank, config, export).await,
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Stats { bank, config } => commands::stats::execute(bank, config).await,
        Commands::Reset { config } => commands::reset::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
