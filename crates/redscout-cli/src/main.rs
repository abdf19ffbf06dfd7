use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod export;
mod run;

#[derive(Debug, Parser)]
#[command(name = "redscout")]
#[command(about = "Configurable Reddit research automation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect, analyze, and export a full research run.
    Run {
        /// Path to the research config JSON. Reads stdin when omitted.
        config: Option<PathBuf>,

        /// Directory where export artifacts are written.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { config, out_dir } => run::run(config.as_deref(), &out_dir).await,
    }
}
