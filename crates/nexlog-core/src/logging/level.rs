//! Log levels

use std::fmt;
use std::str::FromStr;

use colored::{ColoredString, Colorize};

use crate::error::LogError;

/// Severity of a log record
///
/// Each level owns one sink file under `log/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Critical,
    Error,
    Warning,
    Success,
    Info,
}

impl Level {
    /// Every level, in sink-opening order
    pub const ALL: [Level; 5] = [
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Success,
        Level::Info,
    ];

    /// Label printed between brackets in each record
    pub fn label(&self) -> &'static str {
        match self {
            Level::Critical => "CRITICAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Success => "SUCCESS",
            Level::Info => "INFO",
        }
    }

    /// File name of this level's sink
    pub fn file_name(&self) -> &'static str {
        match self {
            Level::Critical => "critical.log",
            Level::Error => "error.log",
            Level::Warning => "warning.log",
            Level::Success => "success.log",
            Level::Info => "info.log",
        }
    }

    /// Length of the longest label, used to align the `[func ...]` column
    pub fn label_width() -> usize {
        Self::ALL.iter().map(|l| l.label().len()).max().unwrap_or(0)
    }

    /// Console rendering of the label
    pub fn styled_label(&self) -> ColoredString {
        let label = self.label();
        match self {
            Level::Critical => label.white().bold().reversed(),
            Level::Error => label.red().bold(),
            Level::Warning => label.yellow().bold(),
            Level::Success => label.green().bold(),
            Level::Info => label.cyan().bold(),
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| LogError::UnknownLevel(s.to_string()))
    }
}
