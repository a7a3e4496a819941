//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for firmrank operations.
///
/// Only failures that make the whole session unusable are errors. Missing
/// review fields, absent theme summaries and empty rankings are modelled as
/// `None` or empty values in the derived data instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The snapshot file could not be read
    #[error("Failed to read snapshot {}: {source}", path.display())]
    SnapshotLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file is not a valid snapshot document
    #[error("Failed to parse snapshot {}: {source}", path.display())]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No `source_*.json` inputs were found for the build step
    #[error("No inputs found in {} (expected: source_*.json)", dir.display())]
    NoSources { dir: PathBuf },

    /// Every build input failed to parse
    #[error("All {count} inputs failed to parse as JSON")]
    AllSourcesInvalid { count: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested firm does not exist in the snapshot
    #[error("Firm not found: {0}")]
    FirmNotFound(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Glob pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias for firmrank operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_load_message_names_the_path() {
        let err = Error::SnapshotLoad {
            path: PathBuf::from("public/meta.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().starts_with("Failed to read snapshot public/meta.json"));
    }

    #[test]
    fn config_message_is_prefixed() {
        assert_eq!(
            Error::config("bad").to_string(),
            "Configuration error: bad"
        );
    }
}
