//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the effective configuration to stdout.
///
/// `path` is the file the configuration was read from, `--config` included.
/// Literal access tokens are masked; secret references are shown as-is.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    println!("{}", dump_header(path));
    println!("{}", render(config)?);
    Ok(())
}

fn dump_header(path: &Path) -> String {
    format!("# config.toml ({})", path.display())
}

fn render(config: &ClientConfig) -> ClientResult<String> {
    let mut shown = config.clone();
    shown.google.access_token = config.google.display_token().to_string();
    toml::to_string_pretty(&shown)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))
}

/// Validate the configuration: timezone, calendar and access token.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    let options = config.to_options()?;
    config
        .google
        .to_provider_config()
        .map_err(|e| ClientError::Config(format!("invalid [google] settings: {}", e)))?;

    println!("calendar: {}", options.calendar);
    println!("timezone: {}", options.timezone.name());
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path in effect.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_masks_literal_token() {
        let mut config = ClientConfig {
            calendar_id: Some("primary".into()),
            timezone: Some("Europe/Paris".into()),
            ..Default::default()
        };
        config.google.access_token = "ya29.very-secret".into();

        let rendered = render(&config).unwrap();
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("timezone = \"Europe/Paris\""));
    }

    #[test]
    fn dump_header_names_the_given_file() {
        let header = dump_header(Path::new("/tmp/srsclean-alt.toml"));
        assert_eq!(header, "# config.toml (/tmp/srsclean-alt.toml)");
    }

    #[test]
    fn render_keeps_references() {
        let rendered = render(&ClientConfig::default()).unwrap();
        assert!(rendered.contains("env::GOOGLE_CALENDAR_TOKEN"));
    }

    #[test]
    fn validate_rejects_unknown_timezone() {
        let config = ClientConfig {
            timezone: Some("Nowhere/Special".into()),
            ..Default::default()
        };
        assert!(matches!(validate(&config), Err(ClientError::Time(_))));
    }

    #[test]
    fn validate_rejects_missing_token() {
        let mut config = ClientConfig {
            timezone: Some("UTC".into()),
            ..Default::default()
        };
        config.google.access_token = "env::_SRSCLEAN_VALIDATE_UNSET_1".into();
        assert!(matches!(validate(&config), Err(ClientError::Config(_))));
    }
}
