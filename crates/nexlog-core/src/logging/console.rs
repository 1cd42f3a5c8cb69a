//! Console logger implementation

use std::io::{self, Write};

use super::clock::{Clock, SystemClock};
use super::level::Level;
use super::location::CallerLocation;
use super::render::Record;
use super::traits::Logger;
use crate::error::{LogError, LogResult};

/// A logger that outputs to the console (stdout/stderr) only
///
/// Records use the same layout as `LeveledLogger`, but no `log/` tree is created.
/// Info and success go to stdout; warning, error and critical go to stderr.
pub struct ConsoleLogger {
    color: bool,
    label_width: usize,
    clock: Box<dyn Clock>,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConsoleLogger {
    /// Create a console logger, styled when `color` is set
    pub fn new(color: bool) -> Self {
        Self {
            color,
            label_width: Level::label_width(),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// The line this logger would print for a record
    pub fn render(&self, level: Level, location: &CallerLocation, message: &str) -> String {
        Record::new(self.clock.now(), level, self.label_width, location, message).console(self.color)
    }

    fn uses_stderr(level: Level) -> bool {
        matches!(level, Level::Critical | Level::Error | Level::Warning)
    }
}

impl std::fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("color", &self.color)
            .field("label_width", &self.label_width)
            .finish()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, location: &CallerLocation, message: &str) -> LogResult<()> {
        let line = self.render(level, location, message);
        let result = if Self::uses_stderr(level) {
            writeln!(io::stderr().lock(), "{}", line)
        } else {
            writeln!(io::stdout().lock(), "{}", line)
        };
        result.map_err(LogError::Console)
    }
}
