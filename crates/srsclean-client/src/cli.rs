//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use srsclean_core::{TracingConfig, TracingOutputFormat};

/// srsclean - remove Kindle SRS review events from a calendar
#[derive(Debug, Parser)]
#[command(name = "srsclean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "SRSCLEAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print the run summary as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Calendar ID to clean ("primary" for the account's main calendar)
    #[arg(long, global = true, env = "CALENDAR_ID")]
    pub calendar_id: Option<String>,

    /// IANA timezone for "tomorrow" and range dates (defaults to the system zone)
    #[arg(long, global = true, env = "TIMEZONE")]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns the tracing configuration selected by the flags.
    pub fn tracing_config(&self) -> TracingConfig {
        let config = if self.debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::cli()
        };
        if self.log_json {
            config.with_format(TracingOutputFormat::Json)
        } else {
            config
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List SRS events from tomorrow on that a cleanup would delete
    Preview,

    /// Delete SRS events from tomorrow on
    Cleanup,

    /// Delete SRS events between two dates
    CleanupRange {
        /// First day, inclusive (YYYY-MM-DD, local midnight)
        start: String,

        /// Last boundary, exclusive (YYYY-MM-DD, local midnight)
        end: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::tracing::Level;

    #[test]
    fn parses_range_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "srsclean",
            "cleanup-range",
            "2025-01-01",
            "2025-01-02",
            "--timezone",
            "Europe/Paris",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.timezone.as_deref(), Some("Europe/Paris"));
        match cli.command {
            Command::CleanupRange { start, end } => {
                assert_eq!(start, "2025-01-01");
                assert_eq!(end, "2025-01-02");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn range_requires_both_dates() {
        assert!(Cli::try_parse_from(["srsclean", "cleanup-range", "2025-01-01"]).is_err());
    }

    #[test]
    fn parses_config_actions() {
        let cli = Cli::try_parse_from(["srsclean", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Path
            }
        ));
    }

    #[test]
    fn tracing_config_follows_flags() {
        let cli = Cli::try_parse_from(["srsclean", "preview"]).unwrap();
        assert_eq!(cli.tracing_config().default_level, Level::WARN);

        let cli = Cli::try_parse_from(["srsclean", "-v", "--log-json", "cleanup"]).unwrap();
        let config = cli.tracing_config();
        assert_eq!(config.default_level, Level::DEBUG);
        assert_eq!(config.output_format, TracingOutputFormat::Json);
    }
}
