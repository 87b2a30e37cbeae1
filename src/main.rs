// Sheetporter - SQLite to Google Sheets export tool
// Copyright (c) 2026 Sheetporter Contributors
// Licensed under the MIT License

use clap::Parser;
use sheetporter::cli::{Cli, Commands};
use sheetporter::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    if let Err(e) = init_logging(log_level) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Sheetporter - SQLite to Google Sheets export tool"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            1
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config, &cli.secrets).await,
        Commands::Convert(args) => args.execute().await,
        Commands::Tables(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config, &cli.secrets).await,
    }
}
