//! Nexlog Core
//!
//! Leveled logging for long-running servers. Every record is printed to the
//! console (optionally colorized) and appended to a per-level file plus an
//! aggregate `all.log` under `<base>/log/`.
//!
//! ## Full attribution: the `log_*!` macros
//!
//! `log_critical!`, `log_error!`, `log_warning!`, `log_success!` and `log_info!`
//! record file, line *and* enclosing function. They accept a logger by value,
//! by reference, or behind `Arc`/`Box`.
//!
//! ```rust,no_run
//! use nexlog_core::{log_info, log_critical, LeveledLogger, LoggerConfig};
//!
//! fn accept(logger: &LeveledLogger, peer: &str) -> nexlog_core::LogResult<()> {
//!     // [func accept] main.rs/main.rs:<line> : peer 10.0.0.7 connected
//!     log_info!(logger, "peer {} connected", peer)
//! }
//!
//! let config = LoggerConfig::load("logger.yaml")?;
//! let logger = LeveledLogger::from_config(&config)?;
//! accept(&logger, "10.0.0.7")?;
//! log_critical!(logger, "lost {} peers", 3)?;
//! logger.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Method form
//!
//! `LoggerExt` offers `critical`..`info` and `criticalf`..`infof`. They capture
//! file and line through `#[track_caller]`, but Rust gives them no function
//! name, so their records carry `[func <unknown>]`.
//!
//! ```rust,no_run
//! use nexlog_core::{LeveledLogger, LoggerExt};
//!
//! let logger = LeveledLogger::open_default(".")?;
//! logger.success("listening")?;
//! logger.infof(format_args!("count={0}", 42))?;
//! # Ok::<(), nexlog_core::LogError>(())
//! ```
//!
//! Records look like:
//!
//! ```text
//! [2024-05-06T07:08:09] [ERROR]     [func login] auth.rs/auth.rs:12 : bad ticket
//! ```

pub mod error;
pub mod logging;
pub mod config;

// Re-export commonly used types
pub use error::{LogError, LogResult};

pub use logging::{
    Logger, LoggerExt, BoxedLogger, SharedLogger,
    LeveledLogger, ConsoleLogger, NoOpLogger,
    Level, CallerLocation, Record,
    Clock, SystemClock, FixedClock,
};

pub use config::{LoggerConfig, ColorMode, ConfigError, ConfigResult};
