//! CalendarProvider trait and implementations.
//!
//! This crate provides the abstraction layer for calendar backends:
//!
//! - [`CalendarProvider`] - The capability a cleanup run needs from a backend
//! - [`EventQuery`] - A windowed free-text search over one calendar
//! - [`MemoryProvider`] - An in-process calendar for tests and dry runs
//! - [`ProviderError`] - Error types for provider operations
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │  Google API     │    │ process memory  │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐    ┌─────────────────┐
//! │ GoogleProvider  │    │ MemoryProvider  │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          │   CalendarProvider   │
//!          └──────────┬───────────┘
//!                     │
//!                     ▼
//!              ┌───────────────┐
//!              │ CalendarEvent │
//!              └───────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use srsclean_core::{CalendarRef, DateWindow, SRS_TITLE_PREFIX};
//! use srsclean_providers::{CalendarProvider, EventQuery};
//!
//! async fn candidates(provider: &dyn CalendarProvider, window: DateWindow) -> ProviderResult<Vec<CalendarEvent>> {
//!     let calendar = provider.resolve_calendar(CalendarRef::Primary).await?;
//!     provider.fetch_events(EventQuery::new(calendar.id, window, SRS_TITLE_PREFIX)).await
//! }
//! ```

pub mod error;
#[cfg(feature = "google")]
pub mod google;
pub mod memory;
pub mod provider;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use memory::{MEMORY_PRIMARY_ID, MemoryProvider};
pub use provider::{BoxFuture, CalendarInfo, CalendarProvider, ErrorProvider, EventQuery};
