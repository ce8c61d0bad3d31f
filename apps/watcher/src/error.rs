use capability_core::error::config::ConfigError;

use common::ErrorLocation;

use thiserror::Error;

/// Top-level failures of the watcher binary.
///
/// Only startup can fail; once the pump loop runs, everything degrades to
/// logged defaults inside the client.
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("Watcher Error: {message} {location}")]
    Watcher {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WatcherError {
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        WatcherError::Watcher {
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }
}
