//! Google Calendar provider implementation.
//!
//! This module provides a [`GoogleProvider`] that resolves, searches and
//! deletes events through the Google Calendar API v3.
//!
//! # Features
//!
//! - Bearer token authentication (the token is supplied by the caller)
//! - Paginated event listing with server-side recurring event expansion
//! - Free-text search (`q`) as a pre-filter
//! - Deletion without notifying attendees
//!
//! # Example
//!
//! ```ignore
//! use srsclean_core::CalendarRef;
//! use srsclean_providers::CalendarProvider;
//! use srsclean_providers::google::{GoogleConfig, GoogleProvider};
//!
//! let provider = GoogleProvider::new(GoogleConfig::new(token))?;
//! let calendar = provider.resolve_calendar(CalendarRef::Primary).await?;
//! ```

mod client;
mod config;
mod provider;

pub use client::{CalendarResource, GoogleCalendarClient};
pub use config::{DEFAULT_API_BASE, GoogleConfig, MAX_PAGE_SIZE};
pub use provider::GoogleProvider;
