//! Logger settings

use std::io::IsTerminal;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// When console output is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Always style console output
    #[default]
    Always,
    /// Never style console output
    Never,
    /// Style only when stdout is a terminal
    Auto,
}

impl ColorMode {
    /// Resolve to a plain flag.
    ///
    /// `Auto` probes stdout each time it is called; loggers call this once at
    /// construction and keep the result.
    pub fn resolve(&self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Always => "always",
            ColorMode::Never => "never",
            ColorMode::Auto => "auto",
        }
    }
}

impl From<bool> for ColorMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            ColorMode::Always
        } else {
            ColorMode::Never
        }
    }
}

/// Settings used to construct a `LeveledLogger`
///
/// ```yaml
/// base_directory: /var/lib/nex
/// color: auto
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Directory under which `log/` is created
    pub base_directory: PathBuf,

    /// Console styling
    pub color: ColorMode,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("."),
            color: ColorMode::Always,
        }
    }
}

impl LoggerConfig {
    /// Create a config rooted at `base_directory` with default color handling
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            ..Self::default()
        }
    }

    /// Set the color mode
    pub fn with_color(mut self, color: impl Into<ColorMode>) -> Self {
        self.color = color.into();
        self
    }
}
