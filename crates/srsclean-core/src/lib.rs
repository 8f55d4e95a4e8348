//! Core types: events, date windows, SRS classification, tracing

pub mod classify;
pub mod event;
pub mod options;
pub mod time;
pub mod tracing;

pub use classify::{Classification, SRS_TITLE_PREFIX, classify, is_srs_event, srs_marker_date};
pub use event::CalendarEvent;
pub use options::{CalendarRef, CleanupOptions, PRIMARY_CALENDAR};
pub use time::{DateWindow, EventTime, TimeError, local_midnight, parse_iso_date, parse_timezone};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
