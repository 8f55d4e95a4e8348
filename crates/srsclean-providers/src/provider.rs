//! CalendarProvider trait definition.
//!
//! This module defines the [`CalendarProvider`] trait, the capability a
//! cleanup run needs from a calendar backend: resolve one calendar, search it
//! within a window, and delete single events.

use std::future::Future;
use std::pin::Pin;

use srsclean_core::{CalendarEvent, CalendarRef, DateWindow};

use crate::error::{ProviderError, ProviderResult};

/// Information about a resolved calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarInfo {
    /// Identifier to use for subsequent queries.
    pub id: String,
    /// Human-readable name of the calendar.
    pub name: String,
    /// Whether this is the primary calendar.
    pub is_primary: bool,
    /// The timezone of the calendar (IANA identifier).
    pub timezone: Option<String>,
}

impl CalendarInfo {
    /// Creates a new CalendarInfo with the given ID and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_primary: false,
            timezone: None,
        }
    }

    /// Builder method to mark as primary.
    pub fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    /// Builder method to set timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}

/// A free-text search over one calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    /// Calendar to search, as returned by [`CalendarProvider::resolve_calendar`].
    pub calendar_id: String,
    /// Events overlapping this window are returned.
    pub window: DateWindow,
    /// Free-text search terms.
    ///
    /// This is a coarse filter. Every event whose title contains the text is
    /// returned; backends with free-text search may also return events that
    /// match on other fields such as the description. An empty search
    /// matches everything.
    pub search: String,
}

impl EventQuery {
    /// Creates a new query.
    pub fn new(
        calendar_id: impl Into<String>,
        window: DateWindow,
        search: impl Into<String>,
    ) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            window,
            search: search.into(),
        }
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so runs can take
/// `&dyn CalendarProvider`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The capability a cleanup run needs from a calendar backend.
///
/// # Implementation Notes
///
/// - `fetch_events` must return events ordered by start time and handle
///   pagination internally
/// - `resolve_calendar` must fail with
///   [`ProviderErrorCode::CalendarNotFound`](crate::ProviderErrorCode::CalendarNotFound)
///   when the calendar does not exist or is not accessible
/// - Implementations never retry; each call maps to one logical operation
pub trait CalendarProvider: Send + Sync {
    /// Returns the name/type of this provider (e.g., "google:default", "memory").
    fn name(&self) -> &str;

    /// Resolves a calendar reference to a concrete, accessible calendar.
    fn resolve_calendar(&self, calendar: CalendarRef) -> BoxFuture<'_, ProviderResult<CalendarInfo>>;

    /// Fetches events overlapping the query window that match the query's
    /// search text. Read-only.
    fn fetch_events(&self, query: EventQuery) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>>;

    /// Deletes one event.
    fn delete_event(
        &self,
        calendar_id: String,
        event_id: String,
    ) -> BoxFuture<'_, ProviderResult<()>>;
}

/// A provider that always returns an error.
///
/// This is useful for testing or as a placeholder when a provider
/// fails to initialize.
#[derive(Debug)]
pub struct ErrorProvider {
    name: String,
    error: ProviderError,
}

impl ErrorProvider {
    /// Creates a new error provider.
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }

    fn error(&self) -> ProviderError {
        // ProviderError is not Clone because of its boxed source
        ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name)
    }
}

impl CalendarProvider for ErrorProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve_calendar(&self, _calendar: CalendarRef) -> BoxFuture<'_, ProviderResult<CalendarInfo>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }

    fn fetch_events(&self, _query: EventQuery) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }

    fn delete_event(
        &self,
        _calendar_id: String,
        _event_id: String,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }
}
