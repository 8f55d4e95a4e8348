//! Event types for calendar events.
//!
//! [`CalendarEvent`] is the provider-agnostic view of an event: just the
//! fields needed to classify it and to delete it again.

use serde::{Deserialize, Serialize};

use crate::classify::{Classification, classify};
use crate::time::EventTime;

/// A calendar event as returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Provider-specific event identifier.
    pub id: String,
    /// The calendar this event lives in.
    pub calendar_id: String,
    /// Event title. Empty when the provider has none.
    pub title: String,
    /// Event description. Empty when the provider has none.
    #[serde(default)]
    pub description: String,
    /// Start time.
    pub start: EventTime,
    /// End time.
    pub end: EventTime,
}

impl CalendarEvent {
    /// Creates a new event with an empty description.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: EventTime,
        end: EventTime,
        calendar_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            calendar_id: calendar_id.into(),
            title: title.into(),
            description: String::new(),
            start,
            end,
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Classifies this event.
    pub fn classification(&self) -> Classification {
        classify(&self.title, &self.description)
    }

    /// Returns true if this event looks SRS-managed.
    pub fn is_srs_event(&self) -> bool {
        self.classification().is_srs_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(h: u32) -> EventTime {
        EventTime::from_utc(Utc.with_ymd_and_hms(2025, 1, 1, h, 0, 0).unwrap())
    }

    #[test]
    fn builder_sets_fields() {
        let event = CalendarEvent::new("evt-1", "Lunch", at(12), at(13), "primary")
            .with_description("sandwiches");
        assert_eq!(event.id, "evt-1");
        assert_eq!(event.calendar_id, "primary");
        assert_eq!(event.title, "Lunch");
        assert_eq!(event.description, "sandwiches");
        assert!(!event.is_srs_event());
    }

    #[test]
    fn classification_uses_title_and_description() {
        let by_title = CalendarEvent::new("a", "Kindle SRS Review — Book A", at(9), at(10), "c");
        assert_eq!(by_title.classification(), Classification::TitlePrefix);

        let by_marker = CalendarEvent::new("b", "Other", at(9), at(10), "c")
            .with_description("SRS_DATE=2025-01-01");
        assert_eq!(by_marker.classification(), Classification::DateMarker);
    }

    #[test]
    fn missing_description_deserializes_empty() {
        let json = r#"{
            "id": "evt",
            "calendar_id": "primary",
            "title": "T",
            "start": {"type": "DateTime", "value": "2025-01-01T09:00:00Z"},
            "end": {"type": "DateTime", "value": "2025-01-01T10:00:00Z"}
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.description, "");
    }
}
