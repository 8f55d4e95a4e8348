//! Google Calendar provider configuration.

use std::fmt;
use std::time::Duration;

/// Base URL for Google Calendar API v3.
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Largest page size the events.list endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 2500;

/// Configuration for the Google Calendar provider.
///
/// The access token is obtained by the hosting environment (a service
/// account, `gcloud auth print-access-token`, an OAuth helper); this crate
/// never runs an authorization flow itself.
#[derive(Clone)]
pub struct GoogleConfig {
    /// Account name, used to tell providers apart in logs.
    ///
    /// Defaults to `"default"`.
    pub account_name: String,

    /// OAuth 2.0 bearer token with the `calendar.events` scope.
    pub access_token: String,

    /// API base URL. Overridable for tests and proxies.
    pub api_base: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Events requested per page.
    pub page_size: usize,
}

impl GoogleConfig {
    /// Creates a new configuration with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            account_name: "default".to_string(),
            access_token: access_token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            page_size: 250,
        }
    }

    /// Builder method to set the account name.
    pub fn with_account_name(mut self, name: impl Into<String>) -> Self {
        self.account_name = name.into();
        self
    }

    /// Builder method to set the API base URL.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method to set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Returns the provider display name (e.g., `google:work`).
    pub fn provider_name(&self) -> String {
        format!("google:{}", self.account_name)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.access_token.trim().is_empty() {
            return Err("access_token is required");
        }
        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err("api_base must be an http(s) URL");
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err("page_size must be between 1 and 2500");
        }
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero");
        }
        Ok(())
    }
}

impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("account_name", &self.account_name)
            .field("access_token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .finish()
    }
}
