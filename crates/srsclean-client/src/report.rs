//! Run summary rendering for stdout.

use chrono_tz::Tz;

use crate::error::ClientResult;
use crate::runner::{RunMode, RunSummary};

/// Renders a summary as human-readable text.
///
/// Start times are shown in `tz`. The result has no trailing newline.
pub fn render_text(summary: &RunSummary, tz: &Tz) -> String {
    let mut lines = Vec::new();

    match summary.mode {
        RunMode::Preview => {
            for event in &summary.matches {
                lines.push(format!(
                    "Would delete: {} @ {}",
                    event.title,
                    event.start.display_in(tz)
                ));
            }
            lines.push(format!(
                "Preview: {} SRS events match for deletion (from tomorrow).",
                summary.matched
            ));
        }
        RunMode::Cleanup => lines.push(format!(
            "Cleanup done: scanned {}, deleted {} SRS events (from tomorrow).",
            summary.scanned, summary.deleted
        )),
        RunMode::RangeCleanup { ref start, ref end } => lines.push(format!(
            "Range cleanup: deleted {} SRS events between {} and {}.",
            summary.deleted, start, end
        )),
    }

    for failure in &summary.failures {
        lines.push(format!(
            "  failed: {} ({}): {}",
            failure.title, failure.event_id, failure.reason
        ));
    }

    lines.join("\n")
}

/// Renders a summary as pretty-printed JSON.
pub fn render_json(summary: &RunSummary) -> ClientResult<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}
