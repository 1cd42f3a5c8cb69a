//! No-op logger implementation

use super::level::Level;
use super::location::CallerLocation;
use super::traits::Logger;
use crate::error::LogResult;

/// A logger that does nothing
///
/// Useful for testing or when logging is not needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    /// Create a new no-op logger
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _level: Level, _location: &CallerLocation, _message: &str) -> LogResult<()> {
        Ok(())
    }
}
