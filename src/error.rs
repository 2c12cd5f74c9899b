use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the dashboard library
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dashboard data in {path}: {source}")]
    DataFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed session file {path}: {source}")]
    Session {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no view registered for route {0}")]
    UnknownRoute(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
