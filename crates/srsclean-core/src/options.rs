//! Per-run options: which calendar, which timezone.

use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::time::{TimeError, parse_timezone};

/// Identifier that selects the user's default calendar.
pub const PRIMARY_CALENDAR: &str = "primary";

/// A reference to the calendar a run operates on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CalendarRef {
    /// The account's default calendar.
    #[default]
    Primary,
    /// An explicit calendar identifier.
    Id(String),
}

impl CalendarRef {
    /// Parses a configured identifier; `"primary"` selects the default calendar.
    pub fn parse(value: &str) -> Self {
        if value == PRIMARY_CALENDAR {
            Self::Primary
        } else {
            Self::Id(value.to_string())
        }
    }

    /// The identifier as a provider sees it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Primary => PRIMARY_CALENDAR,
            Self::Id(id) => id,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Primary)
    }
}

impl FromStr for CalendarRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for CalendarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options passed into every cleanup operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Calendar to scan.
    pub calendar: CalendarRef,
    /// Timezone used for "tomorrow" and for range dates.
    pub timezone: Tz,
}

impl CleanupOptions {
    /// Creates options for the given calendar and timezone.
    pub fn new(calendar: CalendarRef, timezone: Tz) -> Self {
        Self { calendar, timezone }
    }

    /// Creates options from raw configuration strings.
    pub fn parse(calendar_id: &str, timezone: &str) -> Result<Self, TimeError> {
        Ok(Self::new(
            CalendarRef::parse(calendar_id),
            parse_timezone(timezone)?,
        ))
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::new(CalendarRef::Primary, Tz::UTC)
    }
}
