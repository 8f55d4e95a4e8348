//! Google Calendar provider implementation.
//!
//! This module implements the [`CalendarProvider`] trait for Google Calendar.

use srsclean_core::{CalendarEvent, CalendarRef};
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, CalendarInfo, CalendarProvider, EventQuery};

use super::client::GoogleCalendarClient;
use super::config::GoogleConfig;

/// Google Calendar provider.
///
/// Talks to the Calendar API v3 with a bearer token supplied by the caller.
#[derive(Debug)]
pub struct GoogleProvider {
    display_name: String,
    client: GoogleCalendarClient,
}

impl GoogleProvider {
    /// Creates a new Google provider with the given configuration.
    pub fn new(config: GoogleConfig) -> ProviderResult<Self> {
        config.validate().map_err(ProviderError::configuration)?;

        let display_name = config.provider_name();
        let client = GoogleCalendarClient::new(&config)?;

        Ok(Self {
            display_name,
            client,
        })
    }

    async fn resolve(&self, calendar: CalendarRef) -> ProviderResult<CalendarInfo> {
        let resource = self
            .client
            .get_calendar(calendar.as_str())
            .await
            .map_err(|e| e.with_provider(&self.display_name))?;

        debug!(
            requested = %calendar,
            resolved = %resource.id,
            "resolved Google calendar"
        );

        // Keep querying with the requested identifier: `primary` stays valid
        // even if the account email changes.
        let mut info = CalendarInfo::new(calendar.as_str(), resource.summary)
            .with_primary(calendar.is_primary());
        if let Some(tz) = resource.time_zone {
            info = info.with_timezone(tz);
        }
        Ok(info)
    }

    async fn fetch(&self, query: EventQuery) -> ProviderResult<Vec<CalendarEvent>> {
        info!(
            provider = %self.display_name,
            calendar_id = %query.calendar_id,
            start = %query.window.start,
            end = %query.window.end,
            "fetching events"
        );

        self.client
            .list_events(&query.calendar_id, &query.window, &query.search)
            .await
            .map_err(|e| e.with_provider(&self.display_name))
    }
}

impl CalendarProvider for GoogleProvider {
    fn name(&self) -> &str {
        &self.display_name
    }

    fn resolve_calendar(&self, calendar: CalendarRef) -> BoxFuture<'_, ProviderResult<CalendarInfo>> {
        Box::pin(self.resolve(calendar))
    }

    fn fetch_events(&self, query: EventQuery) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>> {
        Box::pin(self.fetch(query))
    }

    fn delete_event(
        &self,
        calendar_id: String,
        event_id: String,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        Box::pin(async move {
            self.client
                .delete_event(&calendar_id, &event_id)
                .await
                .map_err(|e| e.with_provider(&self.display_name))
        })
    }
}
