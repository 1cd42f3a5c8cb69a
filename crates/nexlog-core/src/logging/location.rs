//! Call-site attribution for log records
//!
//! Two capture paths exist:
//! - `CallerLocation::caller()` relies on `#[track_caller]` and yields file and line.
//!   Rust exposes no function name through it, so the function is recorded as `<unknown>`.
//! - The `caller!()` macro expands at the call site and also resolves the enclosing
//!   function from a marker item's type name.
//!
//! Neither path walks the stack, so there is no frame-depth constant to keep in sync.
//! Helpers that wrap the logging methods must themselves be `#[track_caller]`,
//! otherwise the helper becomes the reported location.

use std::fmt;
use std::panic::Location;

/// Function name used when the call site cannot name its function
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

const MARKER_SUFFIX: &str = "::__nexlog_marker";
const CLOSURE_SEGMENT: &str = "{{closure}}";

/// Where a logging call was issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerLocation {
    file: String,
    line: u32,
    function: String,
}

impl CallerLocation {
    /// Build a location; `file` may be a full path, only its basename is kept
    pub fn new(file: &str, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: basename(file).to_string(),
            line,
            function: function.into(),
        }
    }

    /// Location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Self::new(loc.file(), loc.line(), UNKNOWN_FUNCTION)
    }

    /// Source file basename
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The package column of a record.
    ///
    /// This is the file basename, not the module path.
    pub fn package(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> &str {
        &self.function
    }
}

impl fmt::Display for CallerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.package(), self.file, self.line)
    }
}

/// Last path component, accepting both `/` and `\` separators
pub fn basename(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

/// Recover the enclosing function name from the type name of a marker fn
/// declared inside it (see `caller!`).
#[doc(hidden)]
pub fn function_from_marker(type_name: &str) -> &str {
    let path = type_name.strip_suffix(MARKER_SUFFIX).unwrap_or(type_name);
    path.rsplit("::")
        .find(|segment| !segment.is_empty() && *segment != CLOSURE_SEGMENT)
        .unwrap_or(UNKNOWN_FUNCTION)
}

/// Capture the current file, line and enclosing function as a `CallerLocation`
///
/// # Example
///
/// ```
/// fn handler() -> nexlog_core::CallerLocation {
///     nexlog_core::caller!()
/// }
///
/// assert_eq!(handler().function(), "handler");
/// ```
#[macro_export]
macro_rules! caller {
    () => {{
        fn __nexlog_marker() {}
        fn __nexlog_type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::logging::CallerLocation::new(
            file!(),
            line!(),
            $crate::logging::location::function_from_marker(__nexlog_type_name_of(__nexlog_marker)),
        )
    }};
}
