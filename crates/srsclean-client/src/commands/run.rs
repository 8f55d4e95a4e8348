//! Preview and cleanup commands.

use std::process::ExitCode;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use srsclean_core::CleanupOptions;
use srsclean_providers::CalendarProvider;
use srsclean_providers::google::GoogleProvider;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::report;
use crate::runner::{self, RunSummary};

/// Exit code when the run finished but some deletions failed.
pub const PARTIAL_FAILURE_EXIT: u8 = 2;

/// The cleanup operation to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Dry run from tomorrow on.
    Preview,
    /// Delete from tomorrow on.
    Cleanup,
    /// Delete between two `YYYY-MM-DD` dates.
    Range { start: String, end: String },
}

/// Connects to the calendar, runs the operation and prints the report.
pub async fn run(config: &ClientConfig, operation: Operation, json: bool) -> ClientResult<ExitCode> {
    let options = config.to_options()?;
    let provider = connect(config)?;

    let summary = execute(&provider, &options, &operation, Utc::now()).await?;
    print(&summary, &options.timezone, json)?;

    if summary.has_failures() {
        Ok(ExitCode::from(PARTIAL_FAILURE_EXIT))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Builds the Google provider from the `[google]` settings.
pub fn connect(config: &ClientConfig) -> ClientResult<GoogleProvider> {
    let provider_config = config
        .google
        .to_provider_config()
        .map_err(ClientError::Config)?;
    debug!(?provider_config, "connecting to Google Calendar");
    Ok(GoogleProvider::new(provider_config)?)
}

/// Dispatches to the runner.
pub async fn execute(
    provider: &dyn CalendarProvider,
    options: &CleanupOptions,
    operation: &Operation,
    now: DateTime<Utc>,
) -> ClientResult<RunSummary> {
    match operation {
        Operation::Preview => runner::preview(provider, options, now).await,
        Operation::Cleanup => runner::cleanup_from_tomorrow(provider, options, now).await,
        Operation::Range { start, end } => {
            runner::cleanup_in_range(provider, options, start, end).await
        }
    }
}

fn print(summary: &RunSummary, tz: &Tz, json: bool) -> ClientResult<()> {
    if json {
        println!("{}", report::render_json(summary)?);
    } else {
        println!("{}", report::render_text(summary, tz));
    }
    Ok(())
}
