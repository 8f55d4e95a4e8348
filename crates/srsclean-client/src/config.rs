//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/srsclean/config.toml` by default:
//!
//! ```toml
//! calendar_id = "primary"
//! timezone = "Europe/Paris"
//!
//! [google]
//! access_token = "env::GOOGLE_CALENDAR_TOKEN"
//! timeout_secs = 30
//! ```
//!
//! Command-line flags (and their environment variables) take precedence over
//! the file. The access token supports secret references, see
//! [`crate::secret`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use srsclean_core::{CalendarRef, CleanupOptions, PRIMARY_CALENDAR, parse_timezone};
use srsclean_providers::google::GoogleConfig;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Token reference used when `[google].access_token` is not set.
pub const DEFAULT_ACCESS_TOKEN_REF: &str = "env::GOOGLE_CALENDAR_TOKEN";

/// Configuration for the srsclean client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Calendar to clean: a calendar ID or `"primary"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,

    /// IANA timezone used for "tomorrow" and for range dates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Google Calendar settings.
    pub google: GoogleSettings,
}

/// Google Calendar provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// Account label used in logs.
    pub account_name: String,

    /// Bearer token (supports `env::` and `pass::` prefixes).
    pub access_token: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// API base URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            account_name: "default".to_string(),
            access_token: DEFAULT_ACCESS_TOKEN_REF.to_string(),
            timeout_secs: 30,
            api_base: None,
        }
    }
}

impl GoogleSettings {
    /// Converts to provider configuration, resolving the token reference.
    pub fn to_provider_config(&self) -> Result<GoogleConfig, String> {
        let token = crate::secret::resolve(&self.access_token)
            .map_err(|e| format!("failed to resolve google.access_token: {}", e))?;

        let mut config = GoogleConfig::new(token)
            .with_account_name(&self.account_name)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(ref base) = self.api_base {
            config = config.with_api_base(base);
        }

        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// The token value safe for display: references are shown, literal
    /// tokens are masked.
    pub fn display_token(&self) -> &str {
        if crate::secret::is_reference(&self.access_token) {
            &self.access_token
        } else {
            "<redacted>"
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("srsclean")
    }

    /// Applies command-line overrides on top of the file values.
    pub fn with_overrides(mut self, calendar_id: Option<String>, timezone: Option<String>) -> Self {
        if calendar_id.is_some() {
            self.calendar_id = calendar_id;
        }
        if timezone.is_some() {
            self.timezone = timezone;
        }
        self
    }

    /// Builds the options passed into every cleanup run.
    ///
    /// Missing values default to the primary calendar and the system timezone.
    /// An explicitly configured timezone must be a valid IANA name.
    pub fn to_options(&self) -> ClientResult<CleanupOptions> {
        let calendar = match self.calendar_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => CalendarRef::parse(id),
            _ => CalendarRef::parse(PRIMARY_CALENDAR),
        };

        let timezone = match self.timezone.as_deref() {
            Some(name) => parse_timezone(name)?,
            None => system_timezone(),
        };

        Ok(CleanupOptions::new(calendar, timezone))
    }
}

/// Returns the system timezone, or UTC when it cannot be determined.
pub fn system_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => parse_timezone(&name).unwrap_or_else(|e| {
            debug!("system timezone unusable, falling back to UTC: {}", e);
            Tz::UTC
        }),
        Err(e) => {
            debug!("system timezone unknown, falling back to UTC: {}", e);
            Tz::UTC
        }
    }
}
