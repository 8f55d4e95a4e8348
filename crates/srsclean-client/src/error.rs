//! Client error types.

use srsclean_core::TimeError;
use srsclean_providers::ProviderError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
///
/// All of these abort a run. Failures to delete a single event are not
/// errors; they are collected in the run summary.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Bad date, timezone or window.
    #[error(transparent)]
    Time(#[from] TimeError),

    /// Calendar lookup or fetch failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Report serialization failed.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use srsclean_providers::ProviderErrorCode;

    #[test]
    fn time_errors_are_transparent() {
        let err: ClientError = TimeError::InvalidDateFormat {
            input: "2025/01/01".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            TimeError::InvalidDateFormat {
                input: "2025/01/01".into()
            }
            .to_string()
        );
    }

    #[test]
    fn provider_errors_keep_their_code() {
        let err: ClientError = ProviderError::calendar_not_found("nope").into();
        match err {
            ClientError::Provider(ref e) => {
                assert_eq!(e.code(), ProviderErrorCode::CalendarNotFound)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("calendar_not_found"));
    }

    #[test]
    fn config_error_display() {
        let err = ClientError::Config("missing access token".into());
        assert_eq!(err.to_string(), "configuration error: missing access token");
    }

    #[test]
    fn json_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClientError = source.into();
        assert!(matches!(err, ClientError::Json(_)));
        assert!(err.to_string().starts_with("failed to serialize report: "));
    }
}
