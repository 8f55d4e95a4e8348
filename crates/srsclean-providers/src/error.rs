//! Calendar backend failures.
//!
//! A [`ProviderError`] carries a [`ProviderErrorCode`] that ends up in the
//! `failures` list of a cleanup report, so the codes serialize as stable
//! snake_case strings. Resolving or fetching errors abort a run; delete
//! errors are recorded per event and the run moves on.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong talking to a calendar backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorCode {
    /// The access token was rejected (HTTP 401).
    AuthenticationFailed,
    /// The token is valid but cannot touch this calendar or event (HTTP 403).
    AuthorizationFailed,
    /// The request never got an HTTP answer.
    NetworkError,
    /// HTTP 429.
    RateLimited,
    /// Any other non-success status.
    ServerError,
    /// A body that does not decode as the expected JSON.
    InvalidResponse,
    /// The event to delete is gone (HTTP 404 or 410).
    NotFound,
    /// HTTP 400, usually a malformed time bound or search text.
    BadRequest,
    /// The backend could not be set up from the given settings.
    ConfigurationError,
    /// The configured calendar does not exist or is not shared with the account.
    CalendarNotFound,
}

impl ProviderErrorCode {
    /// The snake_case name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::AuthorizationFailed => "authorization_failed",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::ConfigurationError => "configuration_error",
            Self::CalendarNotFound => "calendar_not_found",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed calendar lookup, fetch or delete.
///
/// Displays as `[backend] code: message`; the backend tag is attached by the
/// provider once it knows its own name.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// e.g. `google:default` or `memory`.
    provider: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            source: None,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthenticationFailed, message)
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthorizationFailed, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::RateLimited, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ServerError, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// An event that was listed but no longer exists when deleted.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::BadRequest, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Fatal for every operation: nothing is fetched or deleted.
    pub fn calendar_not_found(calendar_id: impl AsRef<str>) -> Self {
        Self::new(
            ProviderErrorCode::CalendarNotFound,
            format!("calendar {:?} not found or not accessible", calendar_id.as_ref()),
        )
    }

    /// Tags the error with the backend that produced it.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{provider}] ")?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
