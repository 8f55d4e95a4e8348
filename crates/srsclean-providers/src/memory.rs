//! In-memory calendar provider.
//!
//! Test backend: holds calendars and events in process memory and is not
//! wired into the binary. Deletion failures can be injected per event, and
//! every delete request is recorded.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use srsclean_core::{CalendarEvent, CalendarRef};
use tracing::debug;

use crate::error::{ProviderError, ProviderErrorCode, ProviderResult};
use crate::provider::{BoxFuture, CalendarInfo, CalendarProvider, EventQuery};

/// Identifier of the calendar created by [`MemoryProvider::new`].
pub const MEMORY_PRIMARY_ID: &str = "primary";

#[derive(Debug)]
struct MemoryCalendar {
    info: CalendarInfo,
    events: Vec<CalendarEvent>,
}

#[derive(Debug, Default)]
struct MemoryState {
    calendars: Vec<MemoryCalendar>,
    failing_deletes: HashMap<String, (ProviderErrorCode, String)>,
    delete_calls: Vec<String>,
    fetch_count: usize,
}

/// A calendar provider backed by process memory.
#[derive(Debug)]
pub struct MemoryProvider {
    name: String,
    state: Mutex<MemoryState>,
}

impl MemoryProvider {
    /// Creates a provider with a single empty primary calendar.
    pub fn new() -> Self {
        let primary = CalendarInfo::new(MEMORY_PRIMARY_ID, "Primary").with_primary(true);
        Self::empty().with_calendar(primary)
    }

    /// Creates a provider without any calendar.
    pub fn empty() -> Self {
        Self {
            name: "memory".to_string(),
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Builder method to add a calendar.
    pub fn with_calendar(self, info: CalendarInfo) -> Self {
        self.lock().calendars.push(MemoryCalendar {
            info,
            events: Vec::new(),
        });
        self
    }

    /// Builder method to add an event to the calendar named by its `calendar_id`.
    pub fn with_event(self, event: CalendarEvent) -> Self {
        self.insert(event);
        self
    }

    /// Adds an event to the calendar named by its `calendar_id`.
    ///
    /// Returns false if no such calendar exists.
    pub fn insert(&self, event: CalendarEvent) -> bool {
        let mut state = self.lock();
        match state
            .calendars
            .iter_mut()
            .find(|c| c.info.id == event.calendar_id)
        {
            Some(calendar) => {
                calendar.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Makes every delete request for `event_id` fail with the given error.
    pub fn fail_deletes_for(
        &self,
        event_id: impl Into<String>,
        code: ProviderErrorCode,
        message: impl Into<String>,
    ) {
        self.lock()
            .failing_deletes
            .insert(event_id.into(), (code, message.into()));
    }

    /// Snapshot of the events currently stored in a calendar.
    pub fn events(&self, calendar_id: &str) -> Vec<CalendarEvent> {
        self.lock()
            .calendars
            .iter()
            .find(|c| c.info.id == calendar_id)
            .map(|c| c.events.clone())
            .unwrap_or_default()
    }

    /// Event IDs of every delete request received, in order, including failed ones.
    pub fn delete_calls(&self) -> Vec<String> {
        self.lock().delete_calls.clone()
    }

    /// Number of fetch requests received.
    pub fn fetch_count(&self) -> usize {
        self.lock().fetch_count
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(&self, calendar: &CalendarRef) -> ProviderResult<CalendarInfo> {
        let state = self.lock();
        let found = match calendar {
            CalendarRef::Primary => state.calendars.iter().find(|c| c.info.is_primary),
            CalendarRef::Id(id) => state.calendars.iter().find(|c| &c.info.id == id),
        };
        found
            .map(|c| c.info.clone())
            .ok_or_else(|| ProviderError::calendar_not_found(calendar.as_str()).with_provider(&self.name))
    }

    fn fetch(&self, query: &EventQuery) -> ProviderResult<Vec<CalendarEvent>> {
        let mut state = self.lock();
        state.fetch_count += 1;

        let calendar = state
            .calendars
            .iter()
            .find(|c| c.info.id == query.calendar_id)
            .ok_or_else(|| {
                ProviderError::calendar_not_found(&query.calendar_id).with_provider(&self.name)
            })?;

        let mut events: Vec<CalendarEvent> = calendar
            .events
            .iter()
            .filter(|e| query.window.overlaps_event(&e.start, &e.end))
            .filter(|e| matches_search(e, &query.search))
            .cloned()
            .collect();
        events.sort_by(|a, b| a.start.cmp(&b.start));

        debug!(
            calendar_id = %query.calendar_id,
            count = events.len(),
            "fetched events from memory calendar"
        );
        Ok(events)
    }

    fn delete(&self, calendar_id: &str, event_id: &str) -> ProviderResult<()> {
        let mut state = self.lock();
        state.delete_calls.push(event_id.to_string());

        if let Some((code, message)) = state.failing_deletes.get(event_id) {
            return Err(ProviderError::new(*code, message.clone()).with_provider(&self.name));
        }

        let calendar = state
            .calendars
            .iter_mut()
            .find(|c| c.info.id == calendar_id)
            .ok_or_else(|| ProviderError::calendar_not_found(calendar_id).with_provider(&self.name))?;

        let before = calendar.events.len();
        calendar.events.retain(|e| e.id != event_id);
        if calendar.events.len() == before {
            return Err(
                ProviderError::not_found(format!("event {} not found", event_id))
                    .with_provider(&self.name),
            );
        }
        Ok(())
    }
}

/// Loose free-text match: case-insensitive, any alphanumeric word of the
/// search text found in the title or description.
fn matches_search(event: &CalendarEvent, search: &str) -> bool {
    if event.title.contains(search) {
        return true;
    }

    let haystack = format!("{}\n{}", event.title, event.description).to_lowercase();
    let mut terms = search
        .split_whitespace()
        .filter(|term| term.chars().any(char::is_alphanumeric))
        .peekable();

    if terms.peek().is_none() {
        return search.trim().is_empty();
    }
    terms.any(|term| haystack.contains(&term.to_lowercase()))
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarProvider for MemoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve_calendar(&self, calendar: CalendarRef) -> BoxFuture<'_, ProviderResult<CalendarInfo>> {
        Box::pin(async move { self.resolve(&calendar) })
    }

    fn fetch_events(&self, query: EventQuery) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>> {
        Box::pin(async move { self.fetch(&query) })
    }

    fn delete_event(
        &self,
        calendar_id: String,
        event_id: String,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        Box::pin(async move { self.delete(&calendar_id, &event_id) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use srsclean_core::{DateWindow, EventTime};

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn event(id: &str, title: &str, start: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent::new(
            id,
            title,
            EventTime::from_utc(start),
            EventTime::from_utc(start + chrono::Duration::minutes(30)),
            MEMORY_PRIMARY_ID,
        )
    }

    fn january() -> DateWindow {
        DateWindow::new(utc(2025, 1, 1, 0), utc(2025, 2, 1, 0)).unwrap()
    }

    #[tokio::test]
    async fn resolves_primary_and_explicit_ids() {
        let provider = MemoryProvider::new()
            .with_calendar(CalendarInfo::new("work", "Work").with_timezone("Europe/Paris"));

        let primary = provider.resolve_calendar(CalendarRef::Primary).await.unwrap();
        assert_eq!(primary.id, MEMORY_PRIMARY_ID);
        assert!(primary.is_primary);

        let work = provider
            .resolve_calendar(CalendarRef::Id("work".into()))
            .await
            .unwrap();
        assert_eq!(work.name, "Work");
    }

    #[tokio::test]
    async fn unknown_calendar_is_not_found() {
        let provider = MemoryProvider::new();
        let err = provider
            .resolve_calendar(CalendarRef::Id("nope".into()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::CalendarNotFound);

        let err = MemoryProvider::empty()
            .resolve_calendar(CalendarRef::Primary)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::CalendarNotFound);
    }

    #[tokio::test]
    async fn fetch_filters_by_window_and_search() {
        let provider = MemoryProvider::new()
            .with_event(event("late", "Kindle SRS Review — B", utc(2025, 1, 20, 9)))
            .with_event(event("early", "Kindle SRS Review — A", utc(2025, 1, 5, 9)))
            .with_event(event("mid", "Re: Kindle SRS Review — C", utc(2025, 1, 10, 9)))
            .with_event(event("lunch", "Lunch", utc(2025, 1, 5, 12)))
            .with_event(event("outside", "Kindle SRS Review — D", utc(2025, 2, 3, 9)));

        let events = provider
            .fetch_events(EventQuery::new(
                MEMORY_PRIMARY_ID,
                january(),
                "Kindle SRS Review — ",
            ))
            .await
            .unwrap();

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "mid", "late"]);
        assert_eq!(provider.fetch_count(), 1);
    }

    #[tokio::test]
    async fn search_also_matches_descriptions() {
        let provider = MemoryProvider::new()
            .with_event(
                event("other", "Other", utc(2025, 1, 6, 9)).with_description("SRS_DATE=2025-01-06"),
            )
            .with_event(event("lunch", "Lunch", utc(2025, 1, 7, 12)))
            .with_event(event("lower", "kindle srs review — x", utc(2025, 1, 8, 9)));

        let events = provider
            .fetch_events(EventQuery::new(
                MEMORY_PRIMARY_ID,
                january(),
                "Kindle SRS Review — ",
            ))
            .await
            .unwrap();

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["other", "lower"]);
    }

    #[tokio::test]
    async fn empty_search_matches_everything_in_window() {
        let provider = MemoryProvider::new()
            .with_event(event("a", "A", utc(2025, 1, 5, 9)))
            .with_event(event("b", "B", utc(2025, 1, 6, 9)));

        let events = provider
            .fetch_events(EventQuery::new(MEMORY_PRIMARY_ID, january(), ""))
            .await
            .unwrap();
        assert_eq!(events.len(), 2);

        let events = provider
            .fetch_events(EventQuery::new(MEMORY_PRIMARY_ID, january(), "—"))
            .await
            .unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_event() {
        let provider = MemoryProvider::new().with_event(event("a", "A", utc(2025, 1, 5, 9)));

        provider
            .delete_event(MEMORY_PRIMARY_ID.into(), "a".into())
            .await
            .unwrap();
        assert!(provider.events(MEMORY_PRIMARY_ID).is_empty());

        let err = provider
            .delete_event(MEMORY_PRIMARY_ID.into(), "a".into())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::NotFound);
        assert_eq!(provider.delete_calls(), vec!["a", "a"]);
    }

    #[tokio::test]
    async fn injected_delete_failure_keeps_event() {
        let provider = MemoryProvider::new().with_event(event("a", "A", utc(2025, 1, 5, 9)));
        provider.fail_deletes_for("a", ProviderErrorCode::AuthorizationFailed, "read-only");

        let err = provider
            .delete_event(MEMORY_PRIMARY_ID.into(), "a".into())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::AuthorizationFailed);
        assert_eq!(err.message(), "read-only");
        assert_eq!(provider.events(MEMORY_PRIMARY_ID).len(), 1);
    }

    #[test]
    fn insert_into_unknown_calendar_is_rejected() {
        let provider = MemoryProvider::new();
        let mut orphan = event("x", "X", utc(2025, 1, 5, 9));
        orphan.calendar_id = "missing".into();
        assert!(!provider.insert(orphan));
    }
}
