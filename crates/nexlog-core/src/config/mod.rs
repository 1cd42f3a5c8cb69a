//! Logger configuration
//!
//! - `LoggerConfig`: base directory and color mode
//! - YAML loading/saving via `LoggerConfig::load` / `LoggerConfig::save`

mod settings;
mod file;

pub use settings::{LoggerConfig, ColorMode};
pub use file::{ConfigError, ConfigResult};
