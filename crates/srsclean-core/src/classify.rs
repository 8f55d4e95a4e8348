//! Detection of events created by the SRS reminder workflow.
//!
//! An event is SRS-managed when its title starts with [`SRS_TITLE_PREFIX`] or
//! its description carries an `SRS_DATE=YYYY-MM-DD` marker. The marker is a
//! structural match only: `SRS_DATE=2024-13-40` still counts.
//!
//! # Example
//!
//! ```
//! use srsclean_core::classify::{classify, is_srs_event, Classification};
//!
//! assert!(is_srs_event("Kindle SRS Review — Dune", ""));
//! assert_eq!(
//!     classify("Standup", "SRS_DATE=2025-01-01"),
//!     Classification::DateMarker
//! );
//! assert!(!is_srs_event("Unrelated meeting", "no marker here"));
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Title prefix written by the SRS workflow. Also used as the provider-side
/// search substring.
pub const SRS_TITLE_PREFIX: &str = "Kindle SRS Review — ";

/// Marker embedded in SRS event descriptions. ASCII digits only.
static SRS_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SRS_DATE=([0-9]{4}-[0-9]{2}-[0-9]{2})").expect("Invalid SRS_DATE regex")
});

/// Why an event was (or was not) recognized as SRS-managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// The title starts with [`SRS_TITLE_PREFIX`].
    TitlePrefix,
    /// The description contains an `SRS_DATE=` marker.
    DateMarker,
    /// Neither rule matched.
    NotSrs,
}

impl Classification {
    /// The boolean verdict.
    pub fn is_srs_event(self) -> bool {
        !matches!(self, Self::NotSrs)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitlePrefix => "title_prefix",
            Self::DateMarker => "date_marker",
            Self::NotSrs => "not_srs",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an event from its title and description.
///
/// The title rule is checked first, so an event matching both rules reports
/// [`Classification::TitlePrefix`].
pub fn classify(title: &str, description: &str) -> Classification {
    if title.starts_with(SRS_TITLE_PREFIX) {
        Classification::TitlePrefix
    } else if SRS_DATE_REGEX.is_match(description) {
        Classification::DateMarker
    } else {
        Classification::NotSrs
    }
}

/// Returns true if the event looks SRS-managed.
pub fn is_srs_event(title: &str, description: &str) -> bool {
    classify(title, description).is_srs_event()
}

/// Returns the date text of the first `SRS_DATE=` marker, if any.
pub fn srs_marker_date(description: &str) -> Option<&str> {
    SRS_DATE_REGEX
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
