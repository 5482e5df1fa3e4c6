mod commands;

use clap::{Parser, Subcommand};
use commands::{preview, rewrite};
use tracing::error;
use std::error::Error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "retfunnel")]
#[command(author, version, about = "Funnel early `return val_*(...)` exits through a cleanup label")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    async fn run(self) -> Result<(), Box<dyn Error>> {
        match self.command {
            Commands::Rewrite(args) => rewrite::run(args).await,
            Commands::Preview(args) => preview::run(args).await,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite the return statements inside the window, in place
    Rewrite(commands::rewrite::RewriteArgs),

    /// Show the rewritten source on stdout without writing it
    Preview(commands::preview::PreviewArgs),
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter (e.g. RETFUNNEL_LOG=debug)
    let filter = match EnvFilter::try_from_env("RETFUNNEL_LOG") {
        Ok(f) => f,
        Err(_) => {
            EnvFilter::new("info")
        }
    };

    // stdout carries the completion message and previews.
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
