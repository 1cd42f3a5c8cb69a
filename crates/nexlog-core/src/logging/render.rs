//! Record rendering
//!
//! Every record follows one template:
//!
//! ```text
//! [<timestamp>] [<LEVEL>] <padding>[func <function>] <package>/<file>:<line> : <message>
//! ```
//!
//! The plain form goes to the level file, the aggregate file and an uncolored
//! console. The styled form is the same text with ANSI attributes per segment.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Utc};
use colored::Colorize;

use super::level::Level;
use super::location::CallerLocation;
use crate::error::LogResult;

/// UTC, second precision, no zone suffix
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format a timestamp the way records carry it
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Spaces placed after `[LEVEL]` so the `[func ...]` column lines up
pub fn padding(label_width: usize, level: Level) -> String {
    " ".repeat(label_width.saturating_sub(level.label().len()) + 1)
}

/// Substitute formatting arguments into a message.
///
/// A `Display` impl that returns `Err` surfaces as `LogError::Format`.
pub fn render_message(args: fmt::Arguments<'_>) -> LogResult<String> {
    if let Some(s) = args.as_str() {
        return Ok(s.to_string());
    }
    let mut out = String::new();
    out.write_fmt(args)?;
    Ok(out)
}

/// One log record, ready to render
#[derive(Debug, Clone)]
pub struct Record<'a> {
    timestamp: String,
    level: Level,
    padding: String,
    location: &'a CallerLocation,
    message: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(
        at: DateTime<Utc>,
        level: Level,
        label_width: usize,
        location: &'a CallerLocation,
        message: &'a str,
    ) -> Self {
        Self {
            timestamp: format_timestamp(at),
            level,
            padding: padding(label_width, level),
            location,
            message,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Rendering without ANSI codes
    pub fn plain(&self) -> String {
        format!(
            "[{}] [{}] {}[func {}] {}/{}:{} : {}",
            self.timestamp,
            self.level.label(),
            self.padding,
            self.location.function(),
            self.location.package(),
            self.location.file(),
            self.location.line(),
            self.message,
        )
    }

    /// Rendering with the level label and each segment styled
    pub fn styled(&self) -> String {
        let func = format!("func {}", self.location.function());
        let line = self.location.line().to_string();
        format!(
            "[{}] [{}] {}[{}] {}/{}:{} : {}",
            self.timestamp.bright_black(),
            self.level.styled_label(),
            self.padding,
            func.magenta(),
            self.location.package().green(),
            self.location.file().yellow(),
            line.yellow(),
            self.message.bold(),
        )
    }

    /// Console rendering, styled only when `color` is set
    pub fn console(&self, color: bool) -> String {
        if color {
            self.styled()
        } else {
            self.plain()
        }
    }
}
