//! Logger trait definition

use std::fmt;
use std::sync::Arc;

use super::level::Level;
use super::location::CallerLocation;
use super::render::render_message;
use crate::error::LogResult;

/// Leveled logger abstraction
///
/// Implementations:
/// - `LeveledLogger`: console plus per-level and aggregate files
/// - `ConsoleLogger`: console only
/// - `NoOpLogger`: Silent logger for testing
pub trait Logger: Send + Sync {
    /// Emit one record attributed to `location`
    fn log(&self, level: Level, location: &CallerLocation, message: &str) -> LogResult<()>;
}

/// Type alias for a boxed logger
pub type BoxedLogger = Box<dyn Logger>;

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, level: Level, location: &CallerLocation, message: &str) -> LogResult<()> {
        (**self).log(level, location, message)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: Level, location: &CallerLocation, message: &str) -> LogResult<()> {
        (**self).log(level, location, message)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, level: Level, location: &CallerLocation, message: &str) -> LogResult<()> {
        (**self).log(level, location, message)
    }
}

/// Per-level operations, plain and formatted.
///
/// Every method is `#[track_caller]`: the record names the file and line of the
/// caller. Wrap them only in helpers that are `#[track_caller]` too.
/// The function column reads `<unknown>`; use the `log_*!` macros to fill it.
pub trait LoggerExt: Logger {
    /// Log pre-formatted arguments at `level` with an explicit location
    fn log_fmt(
        &self,
        level: Level,
        location: &CallerLocation,
        args: fmt::Arguments<'_>,
    ) -> LogResult<()> {
        let message = render_message(args)?;
        self.log(level, location, &message)
    }

    #[track_caller]
    fn critical(&self, message: &str) -> LogResult<()> {
        self.log(Level::Critical, &CallerLocation::caller(), message)
    }

    #[track_caller]
    fn error(&self, message: &str) -> LogResult<()> {
        self.log(Level::Error, &CallerLocation::caller(), message)
    }

    #[track_caller]
    fn warning(&self, message: &str) -> LogResult<()> {
        self.log(Level::Warning, &CallerLocation::caller(), message)
    }

    #[track_caller]
    fn success(&self, message: &str) -> LogResult<()> {
        self.log(Level::Success, &CallerLocation::caller(), message)
    }

    #[track_caller]
    fn info(&self, message: &str) -> LogResult<()> {
        self.log(Level::Info, &CallerLocation::caller(), message)
    }

    /// e.g. `logger.criticalf(format_args!("lost {} peers", n))`
    #[track_caller]
    fn criticalf(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log_fmt(Level::Critical, &CallerLocation::caller(), args)
    }

    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log_fmt(Level::Error, &CallerLocation::caller(), args)
    }

    #[track_caller]
    fn warningf(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log_fmt(Level::Warning, &CallerLocation::caller(), args)
    }

    #[track_caller]
    fn successf(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log_fmt(Level::Success, &CallerLocation::caller(), args)
    }

    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log_fmt(Level::Info, &CallerLocation::caller(), args)
    }
}

// Implement LoggerExt for all Logger implementations
impl<T: Logger + ?Sized> LoggerExt for T {}

/// Convenience macros for logging.
///
/// Unlike the `LoggerExt` methods these also record the enclosing function name.
/// Each evaluates to `LogResult<()>`.
#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logging::LoggerExt::log_fmt(
            &$logger,
            $crate::logging::Level::Critical,
            &$crate::caller!(),
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logging::LoggerExt::log_fmt(
            &$logger,
            $crate::logging::Level::Error,
            &$crate::caller!(),
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logging::LoggerExt::log_fmt(
            &$logger,
            $crate::logging::Level::Warning,
            &$crate::caller!(),
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logging::LoggerExt::log_fmt(
            &$logger,
            $crate::logging::Level::Success,
            &$crate::caller!(),
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logging::LoggerExt::log_fmt(
            &$logger,
            $crate::logging::Level::Info,
            &$crate::caller!(),
            format_args!($($arg)*),
        )
    };
}
