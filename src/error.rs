//! Errors raised at the persistence edges. The layout and gesture core is
//! infallible and saturates instead.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing the task store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access task store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("task store {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure reading or writing user settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
