//! CLI, configuration, cleanup runner and report rendering
//!
//! This crate provides the `srsclean` command-line interface. The cleanup
//! operations themselves live in [`runner`] and work against any
//! [`srsclean_providers::CalendarProvider`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod secret;

pub use cli::Cli;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use runner::{
    DeletionFailure, RunMode, RunSummary, cleanup_from_tomorrow, cleanup_in_range, preview,
};
