//! Leveled logging: console plus per-level and aggregate files

mod traits;
mod noop;
mod console;
mod clock;
mod level;
mod leveled;
mod render;
mod sinks;
pub mod location;

pub use traits::{Logger, LoggerExt, BoxedLogger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use clock::{Clock, SystemClock, FixedClock};
pub use level::Level;
pub use leveled::LeveledLogger;
pub use location::{CallerLocation, UNKNOWN_FUNCTION};
pub use render::{Record, TIMESTAMP_FORMAT, format_timestamp, padding, render_message};
pub use sinks::{LogSinks, LOG_DIR_NAME, AGGREGATE_FILE_NAME};
