//! srsclean CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use srsclean_client::cli::{Cli, Command, ConfigAction};
use srsclean_client::commands::{self, run::Operation};
use srsclean_client::config::ClientConfig;
use srsclean_client::error::ClientResult;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = srsclean_core::init_tracing(cli.tracing_config()) {
        eprintln!("warning: {}", e);
    }

    // Provider calls are awaited one after another; a single thread is enough.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<ExitCode> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    }
    .with_overrides(cli.calendar_id.clone(), cli.timezone.clone());

    let operation = match cli.command {
        Command::Preview => Operation::Preview,
        Command::Cleanup => Operation::Cleanup,
        Command::CleanupRange { start, end } => Operation::Range { start, end },
        Command::Config { action } => {
            match action {
                ConfigAction::Dump => commands::config::dump(&config, &config_path)?,
                ConfigAction::Validate => commands::config::validate(&config)?,
                ConfigAction::Path => commands::config::path(&config_path)?,
            }
            return Ok(ExitCode::SUCCESS);
        }
    };

    commands::run::run(&config, operation, cli.json).await
}
