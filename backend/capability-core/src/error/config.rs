use common::ErrorLocation;

use std::io::Error as IoError;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("Read Error: {path}: {source} {location}")]
    Read {
        path: PathBuf,
        source: IoError,
        location: ErrorLocation,
    },

    #[error("Parse Error: {path}: {reason} {location}")]
    Parse {
        path: PathBuf,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Serialize Error: {reason} {location}")]
    Serialize {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Write Error: {path}: {source} {location}")]
    Write {
        path: PathBuf,
        source: IoError,
        location: ErrorLocation,
    },

    #[error("Validation Error: {reason} {location}")]
    Validation {
        reason: String,
        location: ErrorLocation,
    },
}

impl ConfigError {
    fn path_buf(path: &std::path::Path) -> PathBuf {
        path.to_path_buf()
    }

    #[track_caller]
    pub fn read(path: &std::path::Path, source: IoError) -> Self {
        ConfigError::Read {
            path: Self::path_buf(path),
            source,
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn parse(path: &std::path::Path, reason: impl Into<String>) -> Self {
        ConfigError::Parse {
            path: Self::path_buf(path),
            reason: reason.into(),
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn serialize(reason: impl Into<String>) -> Self {
        ConfigError::Serialize {
            reason: reason.into(),
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn write(path: &std::path::Path, source: IoError) -> Self {
        ConfigError::Write {
            path: Self::path_buf(path),
            source,
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn validation(reason: impl Into<String>) -> Self {
        ConfigError::Validation {
            reason: reason.into(),
            location: ErrorLocation::capture(),
        }
    }
}
