//! Batch action runner.
//!
//! Each run is a single linear pass: resolve the window, resolve the
//! calendar, fetch candidates, classify each one, then log (preview) or
//! delete (cleanup). Provider calls are awaited one at a time.
//!
//! Only events the classifier confirms are ever handed to
//! [`CalendarProvider::delete_event`]. A failed deletion is recorded in the
//! summary and the batch moves on.

use chrono::{DateTime, Utc};
use serde::Serialize;
use srsclean_core::{CalendarEvent, CleanupOptions, DateWindow, SRS_TITLE_PREFIX};
use srsclean_providers::{CalendarInfo, CalendarProvider, EventQuery, ProviderErrorCode};
use tracing::{debug, info, warn};

use crate::error::ClientResult;

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Read-only: report what a cleanup would delete.
    Preview,
    /// Delete from tomorrow on.
    Cleanup,
    /// Delete within explicit dates.
    RangeCleanup {
        /// Start date as given (`YYYY-MM-DD`).
        start: String,
        /// End date as given (`YYYY-MM-DD`).
        end: String,
    },
}

/// A deletion that did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionFailure {
    /// ID of the event that was kept.
    pub event_id: String,
    /// Its title.
    pub title: String,
    /// Provider error category.
    pub code: ProviderErrorCode,
    /// Rendered provider error.
    pub reason: String,
}

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Which operation ran.
    pub mode: RunMode,
    /// Calendar the run was applied to.
    pub calendar_id: String,
    /// Window events were fetched from.
    pub window: DateWindow,
    /// Events returned by the provider.
    pub scanned: usize,
    /// Events classified as SRS.
    pub matched: usize,
    /// Events actually deleted. Always 0 for a preview.
    pub deleted: usize,
    /// The SRS events, in provider order.
    pub matches: Vec<CalendarEvent>,
    /// Deletions that failed.
    pub failures: Vec<DeletionFailure>,
}

impl RunSummary {
    fn new(mode: RunMode, calendar_id: String, window: DateWindow) -> Self {
        Self {
            mode,
            calendar_id,
            window,
            scanned: 0,
            matched: 0,
            deleted: 0,
            matches: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Returns true if some matched event could not be deleted.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Lists the SRS events a cleanup from tomorrow would delete. Never deletes.
pub async fn preview(
    provider: &dyn CalendarProvider,
    options: &CleanupOptions,
    now: DateTime<Utc>,
) -> ClientResult<RunSummary> {
    let window = DateWindow::from_tomorrow(now, &options.timezone)?;
    let (calendar, events) = scan(provider, options, window).await?;

    let mut summary = RunSummary::new(RunMode::Preview, calendar.id, window);
    for event in events {
        summary.scanned += 1;
        if !event.is_srs_event() {
            continue;
        }
        summary.matched += 1;
        info!(
            "Would delete: {} @ {}",
            event.title,
            event.start.display_in(&options.timezone)
        );
        summary.matches.push(event);
    }

    info!(
        "Preview: {} SRS events match for deletion (from tomorrow).",
        summary.matched
    );
    Ok(summary)
}

/// Deletes every SRS event from tomorrow's local midnight up to five years out.
pub async fn cleanup_from_tomorrow(
    provider: &dyn CalendarProvider,
    options: &CleanupOptions,
    now: DateTime<Utc>,
) -> ClientResult<RunSummary> {
    let window = DateWindow::from_tomorrow(now, &options.timezone)?;
    let summary = delete_srs_events(provider, options, RunMode::Cleanup, window).await?;

    info!(
        "Cleanup done: scanned {}, deleted {} SRS events (from tomorrow).",
        summary.scanned, summary.deleted
    );
    Ok(summary)
}

/// Deletes every SRS event between two local dates (`YYYY-MM-DD`).
///
/// Both dates are read as local midnight in the configured timezone; the end
/// date itself is not included.
pub async fn cleanup_in_range(
    provider: &dyn CalendarProvider,
    options: &CleanupOptions,
    start_iso: &str,
    end_iso: &str,
) -> ClientResult<RunSummary> {
    let window = DateWindow::from_iso_range(start_iso, end_iso, &options.timezone)?;
    let mode = RunMode::RangeCleanup {
        start: start_iso.to_string(),
        end: end_iso.to_string(),
    };
    let summary = delete_srs_events(provider, options, mode, window).await?;

    info!(
        "Range cleanup: deleted {} SRS events between {} and {}.",
        summary.deleted, start_iso, end_iso
    );
    Ok(summary)
}

/// Resolves the calendar and fetches pre-filtered candidates.
async fn scan(
    provider: &dyn CalendarProvider,
    options: &CleanupOptions,
    window: DateWindow,
) -> ClientResult<(CalendarInfo, Vec<CalendarEvent>)> {
    debug!(
        provider = provider.name(),
        calendar = %options.calendar,
        start = %window.start,
        end = %window.end,
        "scanning calendar"
    );

    let calendar = provider.resolve_calendar(options.calendar.clone()).await?;
    let events = provider
        .fetch_events(EventQuery::new(&calendar.id, window, SRS_TITLE_PREFIX))
        .await?;

    debug!(calendar_id = %calendar.id, count = events.len(), "fetched candidates");
    Ok((calendar, events))
}

async fn delete_srs_events(
    provider: &dyn CalendarProvider,
    options: &CleanupOptions,
    mode: RunMode,
    window: DateWindow,
) -> ClientResult<RunSummary> {
    let (calendar, events) = scan(provider, options, window).await?;

    let mut summary = RunSummary::new(mode, calendar.id, window);
    for event in events {
        summary.scanned += 1;
        let classification = event.classification();
        if !classification.is_srs_event() {
            continue;
        }
        summary.matched += 1;

        match provider
            .delete_event(summary.calendar_id.clone(), event.id.clone())
            .await
        {
            Ok(()) => {
                summary.deleted += 1;
                debug!(event_id = %event.id, %classification, "deleted event");
            }
            Err(e) => {
                warn!(event_id = %event.id, title = %event.title, "failed to delete event: {}", e);
                summary.failures.push(DeletionFailure {
                    event_id: event.id.clone(),
                    title: event.title.clone(),
                    code: e.code(),
                    reason: e.to_string(),
                });
            }
        }
        summary.matches.push(event);
    }

    Ok(summary)
}
