//! # Pizzeria Register Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Parse arguments
//! 3. Load register.toml, environment overrides
//! 4. Open the register on the console

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use pizzeria_register::config::RegisterConfig;
use pizzeria_register::error::AppResult;

#[derive(Parser, Debug)]
#[command(name = "pizzeria-register", version, about = "Terminal register for the pizzeria counter")]
struct Args {
    /// Path to register.toml (defaults to the platform config folder)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Folder where shared tickets are written
    #[arg(long)]
    share_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    pizzeria_register::init_tracing();
    let args = Args::parse();

    match start(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Register stopped");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn start(args: Args) -> AppResult<()> {
    let config = RegisterConfig::load(args.config)?;
    let share_dir = args.share_dir.unwrap_or_else(|| config.share_dir());
    pizzeria_register::run(config, share_dir).await
}
