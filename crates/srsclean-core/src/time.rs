//! Time types for calendar events.
//!
//! This module provides [`EventTime`] for representing event start/end times
//! (which may be either a specific datetime or an all-day date), and
//! [`DateWindow`] for the range a cleanup run considers.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;
use thiserror::Error;

/// How far ahead a "from tomorrow" window reaches, in calendar months.
pub const LOOKAHEAD_MONTHS: u32 = 60;

/// Format accepted for explicit range dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Exact shape of a range date. chrono alone accepts `2025-1-1` or `+2025-01-01`.
static ISO_DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid ISO date regex")
});

/// Errors raised while resolving dates, timezones and windows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// A range date was not a `YYYY-MM-DD` string.
    #[error("invalid date format {input:?}: expected YYYY-MM-DD")]
    InvalidDateFormat { input: String },

    /// The timezone name is not a known IANA zone.
    #[error("unknown timezone {name:?}")]
    UnknownTimezone { name: String },

    /// The window would end before it starts.
    #[error("window start {start} is after window end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// No wall-clock time on that date could be mapped to an instant.
    #[error("no valid local midnight on {date}")]
    NonexistentLocalTime { date: NaiveDate },

    /// Date arithmetic left chrono's supported range.
    #[error("date arithmetic out of range")]
    OutOfRange,
}

/// Represents the time of a calendar event.
///
/// Calendar events can have two types of times:
/// - **DateTime**: A specific point in time (with timezone, stored as UTC)
/// - **AllDay**: A date without a specific time (all-day events)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EventTime {
    /// A specific datetime, stored in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day event date (no specific time).
    AllDay(NaiveDate),
}

impl EventTime {
    /// Creates a new `EventTime::DateTime` from a UTC datetime.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a new `EventTime::AllDay` from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Returns `true` if this is an all-day event time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// Converts to a UTC datetime for comparison purposes.
    ///
    /// For all-day events, returns midnight UTC on that date.
    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => *dt,
            Self::AllDay(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// Renders this time for humans in the given timezone.
    ///
    /// All-day dates are printed as-is since they carry no zone.
    pub fn display_in<T>(&self, tz: &T) -> String
    where
        T: TimeZone,
        T::Offset: std::fmt::Display,
    {
        match self {
            Self::DateTime(dt) => dt.with_timezone(tz).format("%Y-%m-%d %H:%M %Z").to_string(),
            Self::AllDay(date) => date.format(ISO_DATE_FORMAT).to_string(),
        }
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_utc_datetime().cmp(&other.to_utc_datetime())
    }
}

/// The range of instants a run considers.
///
/// Represents a half-open interval `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Creates a new window, rejecting `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeError> {
        if start > end {
            return Err(TimeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The window from local midnight tomorrow until [`LOOKAHEAD_MONTHS`]
    /// after `now`.
    ///
    /// "Tomorrow" is computed in `tz`. The end is calendar-relative to `now`
    /// and keeps its time of day, so a run at 15:42 ends at 15:42 five years
    /// later. A run on Feb 29 ends on Feb 28, not on Mar 1 as a naive
    /// year bump that lets the day overflow would give.
    pub fn from_tomorrow<T: TimeZone>(now: DateTime<Utc>, tz: &T) -> Result<Self, TimeError> {
        let today = now.with_timezone(tz).date_naive();
        let tomorrow = today.succ_opt().ok_or(TimeError::OutOfRange)?;
        let start = local_midnight(tomorrow, tz)?;
        let end = now
            .checked_add_months(Months::new(LOOKAHEAD_MONTHS))
            .ok_or(TimeError::OutOfRange)?;
        Self::new(start, end)
    }

    /// The window between two `YYYY-MM-DD` dates, each taken as local
    /// midnight in `tz`.
    pub fn from_iso_range<T: TimeZone>(
        start_iso: &str,
        end_iso: &str,
        tz: &T,
    ) -> Result<Self, TimeError> {
        let start = local_midnight(parse_iso_date(start_iso)?, tz)?;
        let end = local_midnight(parse_iso_date(end_iso)?, tz)?;
        Self::new(start, end)
    }

    /// Returns the duration of this window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if a datetime falls within this window.
    ///
    /// Uses half-open interval semantics: `[start, end)`.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Checks if an event with given start and end times overlaps with this window.
    ///
    /// An event overlaps if it starts before the window ends AND ends after the window starts.
    /// Zero-length events overlap when their start lies inside the window.
    pub fn overlaps_event(&self, event_start: &EventTime, event_end: &EventTime) -> bool {
        let start = event_start.to_utc_datetime();
        let end = event_end.to_utc_datetime();
        if start == end {
            return self.contains(start);
        }
        start < self.end && end > self.start
    }
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, TimeError> {
    let invalid = || TimeError::InvalidDateFormat {
        input: input.to_string(),
    };
    if !ISO_DATE_SHAPE.is_match(input) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(input, ISO_DATE_FORMAT).map_err(|_| invalid())
}

/// Parses an IANA timezone name such as `Europe/Paris`.
pub fn parse_timezone(name: &str) -> Result<Tz, TimeError> {
    name.parse::<Tz>().map_err(|_| TimeError::UnknownTimezone {
        name: name.to_string(),
    })
}

/// The instant of local midnight on `date` in `tz`.
///
/// Ambiguous midnights resolve to the earlier instant. When midnight falls in
/// a DST gap, the first wall-clock quarter hour that exists is used instead.
pub fn local_midnight<T: TimeZone>(date: NaiveDate, tz: &T) -> Result<DateTime<Utc>, TimeError> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=96)
        .map(|quarter| midnight + Duration::minutes(15 * quarter))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(TimeError::NonexistentLocalTime { date })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod event_time {
        use super::*;

        #[test]
        fn to_utc_datetime() {
            let dt = utc(2025, 2, 5, 10, 30, 0);
            assert_eq!(EventTime::from_utc(dt).to_utc_datetime(), dt);

            let et_ad = EventTime::from_date(date(2025, 2, 5));
            assert!(et_ad.is_all_day());
            assert_eq!(et_ad.to_utc_datetime(), utc(2025, 2, 5, 0, 0, 0));
        }

        #[test]
        fn ordering() {
            let et1 = EventTime::from_utc(utc(2025, 2, 5, 10, 0, 0));
            let et2 = EventTime::from_utc(utc(2025, 2, 5, 11, 0, 0));
            let et3 = EventTime::from_date(date(2025, 2, 5));

            assert!(et3 < et1); // midnight < 10:00
            assert!(et1 < et2);
        }

        #[test]
        fn display_in_timezone() {
            let paris: Tz = "Europe/Paris".parse().unwrap();
            let et = EventTime::from_utc(utc(2025, 1, 1, 8, 30, 0));
            assert_eq!(et.display_in(&paris), "2025-01-01 09:30 CET");
            assert_eq!(et.display_in(&Utc), "2025-01-01 08:30 UTC");

            let all_day = EventTime::from_date(date(2025, 3, 15));
            assert_eq!(all_day.display_in(&paris), "2025-03-15");
        }

        #[test]
        fn serde_roundtrip() {
            let et_dt = EventTime::from_utc(utc(2025, 2, 5, 10, 30, 0));
            let json = serde_json::to_string(&et_dt).unwrap();
            let parsed: EventTime = serde_json::from_str(&json).unwrap();
            assert_eq!(et_dt, parsed);
        }
    }

    mod date_window {
        use super::*;

        #[test]
        fn rejects_inverted_range() {
            let err = DateWindow::new(utc(2025, 2, 5, 17, 0, 0), utc(2025, 2, 5, 9, 0, 0))
                .unwrap_err();
            assert!(matches!(err, TimeError::InvalidRange { .. }));
        }

        #[test]
        fn allows_empty_range() {
            let t = utc(2025, 2, 5, 9, 0, 0);
            let window = DateWindow::new(t, t).unwrap();
            assert_eq!(window.duration(), Duration::zero());
            assert!(!window.contains(t));
        }

        #[test]
        fn contains_is_half_open() {
            let window =
                DateWindow::new(utc(2025, 2, 5, 9, 0, 0), utc(2025, 2, 5, 17, 0, 0)).unwrap();

            assert!(window.contains(utc(2025, 2, 5, 9, 0, 0)));
            assert!(window.contains(utc(2025, 2, 5, 16, 59, 59)));
            assert!(!window.contains(utc(2025, 2, 5, 17, 0, 0)));
            assert!(!window.contains(utc(2025, 2, 5, 8, 59, 59)));
        }

        #[test]
        fn overlaps_event() {
            let window =
                DateWindow::new(utc(2025, 2, 5, 9, 0, 0), utc(2025, 2, 5, 17, 0, 0)).unwrap();
            let at = |h| EventTime::from_utc(utc(2025, 2, 5, h, 0, 0));

            assert!(window.overlaps_event(&at(10), &at(11)));
            assert!(window.overlaps_event(&at(8), &at(10)));
            assert!(window.overlaps_event(&at(16), &at(18)));
            assert!(window.overlaps_event(&at(8), &at(18)));

            // Touching either boundary from outside is not an overlap
            assert!(!window.overlaps_event(&at(8), &at(9)));
            assert!(!window.overlaps_event(&at(17), &at(18)));

            // Zero-length events
            assert!(window.overlaps_event(&at(9), &at(9)));
            assert!(!window.overlaps_event(&at(17), &at(17)));
        }

        #[test]
        fn from_tomorrow_in_utc() {
            let now = utc(2025, 6, 10, 15, 42, 7);
            let window = DateWindow::from_tomorrow(now, &Utc).unwrap();
            assert_eq!(window.start, utc(2025, 6, 11, 0, 0, 0));
            assert_eq!(window.end, utc(2030, 6, 10, 15, 42, 7));
        }

        #[test]
        fn from_tomorrow_uses_local_date() {
            // 02:00 UTC on the 10th is still the 9th in New York
            let ny: Tz = "America/New_York".parse().unwrap();
            let now = utc(2025, 6, 10, 2, 0, 0);
            let window = DateWindow::from_tomorrow(now, &ny).unwrap();
            assert_eq!(window.start, utc(2025, 6, 10, 4, 0, 0));
        }

        #[test]
        fn from_tomorrow_clamps_leap_day() {
            let now = utc(2024, 2, 29, 12, 0, 0);
            let window = DateWindow::from_tomorrow(now, &Utc).unwrap();
            assert_eq!(window.start, utc(2024, 3, 1, 0, 0, 0));
            assert_eq!(window.end, utc(2029, 2, 28, 12, 0, 0));
        }

        #[test]
        fn from_tomorrow_skips_dst_gap_at_midnight() {
            // Brazil started DST at local midnight on 2018-11-04
            let sao_paulo: Tz = "America/Sao_Paulo".parse().unwrap();
            let now = utc(2018, 11, 3, 15, 0, 0);
            let window = DateWindow::from_tomorrow(now, &sao_paulo).unwrap();
            assert_eq!(window.start, utc(2018, 11, 4, 3, 0, 0));
        }

        #[test]
        fn from_iso_range_takes_earlier_ambiguous_midnight() {
            // Cuba fell back from 01:00 CDT to 00:00 CST on 2023-11-05,
            // so local midnight happened twice: 04:00Z and 05:00Z.
            let havana: Tz = "America/Havana".parse().unwrap();
            let window = DateWindow::from_iso_range("2023-11-05", "2023-11-06", &havana).unwrap();
            assert_eq!(window.start, utc(2023, 11, 5, 4, 0, 0));
            assert_eq!(window.end, utc(2023, 11, 6, 5, 0, 0));
        }

        #[test]
        fn from_iso_range_uses_local_midnight() {
            let paris: Tz = "Europe/Paris".parse().unwrap();
            let window = DateWindow::from_iso_range("2025-01-01", "2025-01-02", &paris).unwrap();
            assert_eq!(window.start, utc(2024, 12, 31, 23, 0, 0));
            assert_eq!(window.end, utc(2025, 1, 1, 23, 0, 0));
            assert_eq!(window.duration(), Duration::hours(24));
        }

        #[test]
        fn from_iso_range_rejects_malformed_dates() {
            for bad in [
                "",
                "2025/01/01",
                "01-02-2025",
                "2025-13-01",
                "2025-02-30",
                "tomorrow",
                "2025-1-1",
                "25-01-01",
                "+2025-01-01",
                " 2025-01-01",
                "2025-01-01 ",
                "2025-01-01T00:00",
            ] {
                let err = DateWindow::from_iso_range(bad, "2025-01-02", &Utc).unwrap_err();
                assert_eq!(
                    err,
                    TimeError::InvalidDateFormat {
                        input: bad.to_string()
                    }
                );
            }

            let err = DateWindow::from_iso_range("2025-01-01", "2025-01-0x", &Utc).unwrap_err();
            assert!(matches!(err, TimeError::InvalidDateFormat { .. }));
        }

        #[test]
        fn from_iso_range_rejects_inverted_dates() {
            let err = DateWindow::from_iso_range("2025-01-02", "2025-01-01", &Utc).unwrap_err();
            assert!(matches!(err, TimeError::InvalidRange { .. }));
        }

        #[test]
        fn serde_roundtrip() {
            let window =
                DateWindow::new(utc(2025, 2, 5, 9, 0, 0), utc(2025, 2, 5, 17, 0, 0)).unwrap();
            let json = serde_json::to_string(&window).unwrap();
            let parsed: DateWindow = serde_json::from_str(&json).unwrap();
            assert_eq!(window, parsed);
        }
    }

    #[test]
    fn parse_iso_date_accepts_exact_shape() {
        assert_eq!(parse_iso_date("2025-01-01").unwrap(), date(2025, 1, 1));
        assert_eq!(parse_iso_date("0999-12-31").unwrap(), date(999, 12, 31));
        assert!(parse_iso_date("2025-1-01").is_err());
    }

    #[test]
    fn parse_timezone_names() {
        assert!(parse_timezone("Europe/Paris").is_ok());
        assert!(parse_timezone("UTC").is_ok());
        assert_eq!(
            parse_timezone("Mars/Olympus_Mons").unwrap_err(),
            TimeError::UnknownTimezone {
                name: "Mars/Olympus_Mons".to_string()
            }
        );
    }
}
