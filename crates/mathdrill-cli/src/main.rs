//! mathdrill CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "mathdrill",
    version,
    about = "Arithmetic practice game with results notification"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a 10-question practice session
    Play {
        /// Difficulty tier: easy, medium, hard
        #[arg(long)]
        difficulty: Option<String>,

        /// Operation: addition, subtraction, multiplication, division, mixed
        #[arg(long)]
        operation: Option<String>,

        /// Player name shown on reports and notifications
        #[arg(long)]
        name: Option<String>,

        /// Seed for a reproducible question sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to save the summary JSON and results page
        #[arg(long)]
        save: Option<PathBuf>,

        /// Skip results delivery
        #[arg(long)]
        no_notify: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Re-render a saved summary as a results page or email preview
    Render {
        /// Summary JSON produced by `play --save`
        #[arg(long)]
        summary: PathBuf,

        /// Output directory
        #[arg(long, default_value = "./mathdrill-results")]
        output: PathBuf,

        /// Output format: page, email, all
        #[arg(long, default_value = "page")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mathdrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            difficulty,
            operation,
            name,
            seed,
            save,
            no_notify,
            config,
        } => commands::play::execute(difficulty, operation, name, seed, save, no_notify, config)
            .await,
        Commands::Render {
            summary,
            output,
            format,
            config,
        } => commands::render::execute(summary, output, format, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
