// Error types for the fatal precondition failures. Everything that can
// only be reported (transport failures, malformed JSON) travels as an
// `anyhow::Error` with context instead.

use std::path::PathBuf;

use thiserror::Error;

/// Problems with the environment-provided configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("collection name template {0:?} must contain the {{index}} placeholder")]
    InvalidTemplate(String),
    #[error("batch size must be at least 1")]
    ZeroBatchSize,
}

/// Problems reading the host list.
#[derive(Debug, Error)]
pub enum HostsError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures that stop the run after configuration was accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("authentication failed with status {status}")]
    Auth { status: u16 },
}
