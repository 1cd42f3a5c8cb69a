//! Logger error types

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while constructing, writing to, or closing a logger
#[derive(Error, Debug)]
pub enum LogError {
    /// Directory creation, file open, write or flush failed
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sink was already closed
    #[error("Log sink already closed: {}", path.display())]
    Closed { path: PathBuf },

    /// Writing the console rendering failed
    #[error("Console write failed: {0}")]
    Console(#[source] io::Error),

    /// A formatting argument's `Display` impl reported an error
    #[error("Failed to format log message")]
    Format(#[from] fmt::Error),

    /// Level name that does not match any known level
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),
}

impl LogError {
    /// Create an IO error bound to the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a closed-sink error
    pub fn closed(path: impl Into<PathBuf>) -> Self {
        Self::Closed { path: path.into() }
    }

    /// Whether this error belongs to the I/O category (file, console, or closed handle)
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Closed { .. } | Self::Console(_))
    }
}

pub type LogResult<T> = Result<T, LogError>;
