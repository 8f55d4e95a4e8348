//! Secret reference resolver.
//!
//! The access token in `config.toml` does not have to be stored in clear.
//! A value can point at where the token lives instead:
//!
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - `pass::path/in/store` runs `pass show path/in/store` and keeps the first line
//! - anything else is the token itself

use std::process::Command;

use thiserror::Error;

/// Prefix for environment variable references.
pub const ENV_PREFIX: &str = "env::";

/// Prefix for password-store references.
pub const PASS_PREFIX: &str = "pass::";

/// Errors raised while resolving a secret reference.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The referenced environment variable is unset or not unicode.
    #[error("environment variable `{0}` is not set")]
    MissingEnv(String),

    /// `pass` could not be started.
    #[error("failed to run `pass show {path}`: {source}")]
    PassSpawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `pass` ran but exited with an error.
    #[error("`pass show {path}` failed ({status}): {stderr}")]
    PassFailed {
        path: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The resolved value is empty.
    #[error("secret reference `{0}` resolved to an empty value")]
    Empty(String),
}

/// Resolves a value that may be a secret reference.
pub fn resolve(value: &str) -> Result<String, SecretError> {
    let resolved = if let Some(var) = value.strip_prefix(ENV_PREFIX) {
        std::env::var(var).map_err(|_| SecretError::MissingEnv(var.to_string()))?
    } else if let Some(path) = value.strip_prefix(PASS_PREFIX) {
        resolve_pass(path)?
    } else {
        return Ok(value.to_string());
    };

    let resolved = resolved.trim().to_string();
    if resolved.is_empty() {
        return Err(SecretError::Empty(value.to_string()));
    }
    Ok(resolved)
}

/// Returns true if the value points somewhere instead of holding the secret.
pub fn is_reference(value: &str) -> bool {
    value.starts_with(ENV_PREFIX) || value.starts_with(PASS_PREFIX)
}

fn resolve_pass(path: &str) -> Result<String, SecretError> {
    let output = Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|source| SecretError::PassSpawn {
            path: path.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(SecretError::PassFailed {
            path: path.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string())
}
