//! Google Calendar API client.
//!
//! This module provides a low-level HTTP client for the Google Calendar API,
//! handling authentication, request building, and response parsing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use srsclean_core::{CalendarEvent, DateWindow, EventTime};
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};

use super::config::GoogleConfig;

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    access_token: String,
    api_base: String,
    page_size: usize,
}

impl GoogleCalendarClient {
    /// Creates a new client from the provider configuration.
    pub fn new(config: &GoogleConfig) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            http_client,
            access_token: config.access_token.clone(),
            api_base: config.api_base.clone(),
            page_size: config.page_size,
        })
    }

    fn calendar_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}",
            self.api_base,
            urlencoding::encode(calendar_id)
        )
    }

    /// Fetches calendar metadata.
    ///
    /// A 404 means the calendar does not exist or the token cannot see it.
    pub async fn get_calendar(&self, calendar_id: &str) -> ProviderResult<CalendarResource> {
        let response = self
            .http_client
            .get(self.calendar_url(calendar_id))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::calendar_not_found(calendar_id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse calendar: {}", e))
        })
    }

    /// Lists events overlapping the window that match the free-text search.
    ///
    /// Recurring events are expanded into instances and results are ordered
    /// by start time. Cancelled events are skipped.
    pub async fn list_events(
        &self,
        calendar_id: &str,
        window: &DateWindow,
        search: &str,
    ) -> ProviderResult<Vec<CalendarEvent>> {
        let mut all_events = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .list_events_page(calendar_id, window, search, page_token.as_deref())
                .await?;
            pages += 1;

            all_events.extend(
                page.items
                    .into_iter()
                    .filter_map(|event| convert_event(event, calendar_id)),
            );

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(
            calendar_id,
            pages,
            count = all_events.len(),
            "fetched events from Google Calendar"
        );
        Ok(all_events)
    }

    /// Fetches a single page of events.
    async fn list_events_page(
        &self,
        calendar_id: &str,
        window: &DateWindow,
        search: &str,
        page_token: Option<&str>,
    ) -> ProviderResult<EventListResponse> {
        let url = format!("{}/events", self.calendar_url(calendar_id));

        let mut request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", window.start.to_rfc3339()),
                ("timeMax", window.end.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
                ("maxResults", self.page_size.to_string()),
            ]);

        if !search.is_empty() {
            request = request.query(&[("q", search)]);
        }

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await.map_err(request_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::calendar_not_found(calendar_id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
        })
    }

    /// Deletes a single event.
    ///
    /// Attendees are not notified (`sendUpdates=none`).
    pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> ProviderResult<()> {
        let url = format!(
            "{}/events/{}",
            self.calendar_url(calendar_id),
            urlencoding::encode(event_id)
        );

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(&self.access_token)
            .query(&[("sendUpdates", "none")])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::GONE {
            return Err(ProviderError::not_found(format!(
                "event {} was already deleted",
                event_id
            )));
        }
        Err(status_error(status, &body))
    }
}

/// Maps a transport-level reqwest failure.
fn request_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::network("request timeout")
    } else if e.is_connect() {
        ProviderError::network(format!("connection failed: {}", e))
    } else {
        ProviderError::network(format!("request failed: {}", e))
    }
}

/// Maps a non-success HTTP status.
fn status_error(status: reqwest::StatusCode, body: &str) -> ProviderError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED => {
            ProviderError::authentication("access token expired or invalid")
        }
        reqwest::StatusCode::FORBIDDEN => ProviderError::authorization(format!(
            "access denied to calendar: {}",
            api_error_message(body)
        )),
        reqwest::StatusCode::NOT_FOUND => ProviderError::not_found(api_error_message(body)),
        reqwest::StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited("rate limit exceeded"),
        reqwest::StatusCode::BAD_REQUEST => ProviderError::bad_request(api_error_message(body)),
        _ => ProviderError::server(format!("API error ({}): {}", status, api_error_message(body))),
    }
}

/// Extracts `error.message` from a Google error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .map(|r| r.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Converts a Google Calendar API event to a CalendarEvent.
fn convert_event(event: ApiEvent, calendar_id: &str) -> Option<CalendarEvent> {
    if event.status.as_deref() == Some("cancelled") {
        return None;
    }

    let id = event.id?;
    let start = parse_time(&event.start)
        .map_err(|e| warn!(event_id = %id, "failed to parse start time: {}", e))
        .ok()?;
    let end = parse_time(&event.end)
        .map_err(|e| warn!(event_id = %id, "failed to parse end time: {}", e))
        .ok()?;

    Some(
        CalendarEvent::new(
            id,
            event.summary.unwrap_or_default(),
            start,
            end,
            calendar_id,
        )
        .with_description(event.description.unwrap_or_default()),
    )
}

fn parse_time(time: &ApiEventTime) -> Result<EventTime, String> {
    match (&time.date_time, &time.date) {
        (Some(dt), _) => DateTime::parse_from_rfc3339(dt)
            .map(|parsed| EventTime::from_utc(parsed.with_timezone(&Utc)))
            .map_err(|e| e.to_string()),
        (None, Some(date)) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(EventTime::from_date)
            .map_err(|e| e.to_string()),
        (None, None) => Err("no dateTime or date".to_string()),
    }
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
    next_page_token: Option<String>,
}

/// A single event from the Google Calendar API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    #[serde(default)]
    start: ApiEventTime,
    #[serde(default)]
    end: ApiEventTime,
    status: Option<String>,
}

/// Event time from the API.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventTime {
    date: Option<String>,
    date_time: Option<String>,
}

/// Error envelope returned by Google APIs.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Calendar metadata from the calendars.get endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResource {
    /// The calendar ID. For `primary` this is the account email.
    pub id: String,
    /// The calendar summary (name).
    #[serde(default)]
    pub summary: String,
    /// The calendar timezone.
    pub time_zone: Option<String>,
}
