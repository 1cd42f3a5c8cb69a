//! Leveled logger: console plus per-level and aggregate files
//!
//! Layout under the base directory:
//!
//! ```text
//! <base>/log/all.log
//! <base>/log/critical.log
//! <base>/log/error.log
//! <base>/log/warning.log
//! <base>/log/success.log
//! <base>/log/info.log
//! ```
//!
//! Each record is printed to the console, then appended to its level file and to
//! `all.log`. One mutex guards the whole operation, so records from concurrent
//! threads never interleave.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::clock::{Clock, SystemClock};
use super::level::Level;
use super::location::CallerLocation;
use super::render::Record;
use super::sinks::LogSinks;
use super::traits::Logger;
use crate::config::LoggerConfig;
use crate::error::{LogError, LogResult};

struct State {
    sinks: LogSinks,
    console: Box<dyn Write + Send>,
}

/// Multi-sink leveled logger
///
/// # Example
///
/// ```no_run
/// use nexlog_core::{LeveledLogger, LoggerExt};
///
/// let logger = LeveledLogger::new("/var/lib/nex", true)?;
/// logger.info("server started")?;
/// logger.warningf(format_args!("{} clients pending", 3))?;
/// nexlog_core::log_error!(logger, "handshake failed: {}", "timeout")?;
/// logger.close()?;
/// # Ok::<(), nexlog_core::LogError>(())
/// ```
pub struct LeveledLogger {
    log_dir: PathBuf,
    color: bool,
    label_width: usize,
    clock: Box<dyn Clock>,
    state: Mutex<State>,
}

impl LeveledLogger {
    /// Create `<base_dir>/log` and open all six sinks in append mode
    ///
    /// `color` requests styled console output. `colored` still has the last
    /// word: with no TTY on stdout, `NO_COLOR` set, or `CLICOLOR=0` the console
    /// stays plain, and `CLICOLOR_FORCE` turns styling on regardless of a TTY.
    pub fn new(base_dir: impl AsRef<Path>, color: bool) -> LogResult<Self> {
        let sinks = LogSinks::open(base_dir)?;
        Ok(Self {
            log_dir: sinks.log_dir().to_path_buf(),
            color,
            label_width: Level::label_width(),
            clock: Box::new(SystemClock),
            state: Mutex::new(State {
                sinks,
                console: Box::new(io::stdout()),
            }),
        })
    }

    /// Create a logger from settings; `ColorMode::Auto` is resolved here, once
    pub fn from_config(config: &LoggerConfig) -> LogResult<Self> {
        Self::new(&config.base_directory, config.color.resolve())
    }

    /// Logger rooted at `root` with color enabled
    pub fn open_default(root: impl AsRef<Path>) -> LogResult<Self> {
        Self::new(root, true)
    }

    /// Send console output to `writer` instead of stdout
    pub fn with_console(mut self, writer: impl Write + Send + 'static) -> Self {
        self.state.get_mut().console = Box::new(writer);
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The `log/` directory holding the sinks
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Width of the longest level label
    pub fn label_width(&self) -> usize {
        self.label_width
    }

    /// Path of the file a level's records are appended to
    pub fn path_for(&self, level: Level) -> PathBuf {
        self.log_dir.join(level.file_name())
    }

    /// Flush and release all six file handles.
    ///
    /// Call once. Later `close` calls and logging calls fail with `LogError::Closed`.
    /// Dropping the logger releases the handles too.
    pub fn close(&self) -> LogResult<()> {
        let mut state = self.state.lock();
        let files = state.sinks.close();
        let console = state.console.flush().map_err(LogError::Console);
        files.and(console)
    }
}

impl Logger for LeveledLogger {
    fn log(&self, level: Level, location: &CallerLocation, message: &str) -> LogResult<()> {
        let mut state = self.state.lock();
        // Stamp under the lock so all.log stays in timestamp order
        let record = Record::new(self.clock.now(), level, self.label_width, location, message);
        let console_line = record.console(self.color);
        let file_line = record.plain();

        let console = writeln!(state.console, "{}", console_line)
            .and_then(|_| state.console.flush())
            .map_err(LogError::Console);
        // Files are written even when the console failed
        let files = state.sinks.write(level, &file_line);
        console.and(files)
    }
}

impl Drop for LeveledLogger {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if !state.sinks.is_closed() {
            let _ = state.sinks.close();
        }
    }
}

impl std::fmt::Debug for LeveledLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeveledLogger")
            .field("log_dir", &self.log_dir)
            .field("color", &self.color)
            .field("label_width", &self.label_width)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorMode;
    use crate::logging::clock::FixedClock;
    use crate::logging::traits::LoggerExt;
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use std::fs;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    /// Console capture shared between the logger and the test
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenConsole;

    impl Write for BrokenConsole {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "console gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn fixed_clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap())
    }

    fn quiet_logger(base: &Path) -> (LeveledLogger, SharedBuffer) {
        let console = SharedBuffer::default();
        let logger = LeveledLogger::new(base, false)
            .unwrap()
            .with_console(console.clone())
            .with_clock(fixed_clock());
        (logger, console)
    }

    fn read(path: impl AsRef<Path>) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    /// SGR parameters of the escape sequence right before `text`
    fn sgr_codes_before(line: &str, text: &str) -> Vec<String> {
        let head = &line[..line.find(text).unwrap()];
        let start = head.rfind("\u{1b}[").unwrap();
        head[start + 2..]
            .trim_end_matches('m')
            .split(';')
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LeveledLogger>();
    }

    #[test]
    fn test_new_creates_log_tree() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("srv");
        let (logger, _) = quiet_logger(&base);

        assert_eq!(logger.log_dir(), base.join("log"));
        assert!(logger.log_dir().join("all.log").exists());
        for level in Level::ALL {
            assert!(logger.path_for(level).exists());
        }
        assert_eq!(logger.label_width(), 8);
    }

    #[test]
    fn test_each_level_writes_one_record_to_its_file_and_aggregate() {
        let dir = tempdir().unwrap();
        let (logger, _) = quiet_logger(dir.path());

        logger.critical("m-critical").unwrap();
        logger.error("m-error").unwrap();
        logger.warning("m-warning").unwrap();
        logger.success("m-success").unwrap();
        logger.info("m-info").unwrap();

        let all = read(logger.log_dir().join("all.log"));
        assert_eq!(all.lines().count(), 5);

        for level in Level::ALL {
            let content = read(logger.path_for(level));
            assert!(content.ends_with('\n'));
            let lines: Vec<_> = content.lines().collect();
            assert_eq!(lines.len(), 1, "{} should hold exactly one record", level);

            let expected_message = format!(": m-{}", level.label().to_lowercase());
            assert!(lines[0].ends_with(&expected_message));
            assert!(lines[0].contains(&format!("[{}]", level.label())));
            assert_eq!(all.lines().filter(|l| *l == lines[0]).count(), 1);
        }
    }

    #[test]
    fn test_record_order_follows_call_order() {
        let dir = tempdir().unwrap();
        let (logger, _) = quiet_logger(dir.path());

        for i in 0..10 {
            logger.infof(format_args!("seq {}", i)).unwrap();
        }

        let info = read(logger.path_for(Level::Info));
        let seen: Vec<_> = info
            .lines()
            .map(|l| l.rsplit(": ").next().unwrap().to_string())
            .collect();
        let expected: Vec<_> = (0..10).map(|i| format!("seq {}", i)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_exact_line_and_padding() {
        let dir = tempdir().unwrap();
        let (logger, _) = quiet_logger(dir.path());

        let loc = CallerLocation::new("src/nex/auth.rs", 12, "login");
        logger.log(Level::Error, &loc, "bad ticket").unwrap();
        logger.log(Level::Critical, &loc, "db down").unwrap();

        let error = read(logger.path_for(Level::Error));
        assert_eq!(
            error,
            "[2024-05-06T07:08:09] [ERROR]     [func login] auth.rs/auth.rs:12 : bad ticket\n"
        );
        let critical = read(logger.path_for(Level::Critical));
        assert_eq!(
            critical,
            "[2024-05-06T07:08:09] [CRITICAL]  [func login] auth.rs/auth.rs:12 : db down\n"
        );
    }

    #[test]
    fn test_system_clock_timestamp_shape() {
        let dir = tempdir().unwrap();
        let logger = LeveledLogger::new(dir.path(), false)
            .unwrap()
            .with_console(SharedBuffer::default());
        logger.success("now").unwrap();

        let line = read(logger.path_for(Level::Success));
        let ts = &line[1..20];
        assert_eq!(&line[20..21], "]");
        assert!(NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S").is_ok());
    }

    #[test]
    fn test_infof_substitutes_arguments() {
        let dir = tempdir().unwrap();
        let (logger, _) = quiet_logger(dir.path());

        logger.infof(format_args!("count={0}", 42)).unwrap();

        let info = read(logger.path_for(Level::Info));
        assert!(info.trim_end().ends_with(" : count=42"));
    }

    #[test]
    fn test_method_reports_user_call_site() {
        let dir = tempdir().unwrap();
        let (logger, _) = quiet_logger(dir.path());

        let expected_line = line!() + 1;
        logger.warning("here").unwrap();

        let warning = read(logger.path_for(Level::Warning));
        let site = format!("leveled.rs/leveled.rs:{} : here", expected_line);
        assert!(warning.contains(&site), "{}", warning);
    }

    #[test]
    fn test_macro_reports_function() {
        let dir = tempdir().unwrap();
        let (logger, _) = quiet_logger(dir.path());

        crate::log_error!(logger, "code {}", 7).unwrap();

        let error = read(logger.path_for(Level::Error));
        assert!(error.contains("[func test_macro_reports_function] leveled.rs/leveled.rs:"));
        assert!(error.trim_end().ends_with(" : code 7"));
    }

    #[test]
    fn test_log_after_close_fails_with_io_error() {
        let dir = tempdir().unwrap();
        let (logger, _) = quiet_logger(dir.path());

        logger.info("before").unwrap();
        logger.close().unwrap();

        let err = logger.info("after").unwrap_err();
        assert!(err.is_io());
        assert!(matches!(err, LogError::Closed { .. }));
        assert!(logger.close().unwrap_err().is_io());

        assert!(!read(logger.path_for(Level::Info)).contains("after"));
    }

    #[test]
    fn test_two_loggers_append_to_same_files() {
        let dir = tempdir().unwrap();
        let (first, _) = quiet_logger(dir.path());
        first.error("from first").unwrap();
        first.close().unwrap();

        let (second, _) = quiet_logger(dir.path());
        second.error("from second").unwrap();
        second.close().unwrap();

        let error = read(dir.path().join("log").join("error.log"));
        let lines: Vec<_> = error.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("from first"));
        assert!(lines[1].ends_with("from second"));
        assert_eq!(read(dir.path().join("log").join("all.log")).lines().count(), 2);
    }

    #[test]
    fn test_uncolored_console_matches_file() {
        let dir = tempdir().unwrap();
        let (logger, console) = quiet_logger(dir.path());

        logger.success("deployed").unwrap();
        logger.critical("halt").unwrap();

        let printed = console.contents();
        assert!(!printed.contains('\u{1b}'));
        assert_eq!(printed, read(logger.log_dir().join("all.log")));
    }

    #[test]
    fn test_colored_console_has_same_text() {
        let dir = tempdir().unwrap();
        let console = SharedBuffer::default();
        let logger = LeveledLogger::new(dir.path(), true)
            .unwrap()
            .with_console(console.clone())
            .with_clock(fixed_clock());
        assert!(logger.color_enabled());
        // No TTY under the test harness; force styling on
        colored::control::set_override(true);

        logger.critical("halt").unwrap();
        logger.error("styled").unwrap();

        let printed = console.contents();
        let mut lines = printed.lines();
        let critical_codes = sgr_codes_before(lines.next().unwrap(), "CRITICAL");
        for code in ["1", "7", "37"] {
            assert!(critical_codes.contains(&code.to_string()), "{:?}", critical_codes);
        }
        assert!(lines.next().unwrap().contains("\u{1b}[1;31mERROR"));

        let all = read(logger.log_dir().join("all.log"));
        assert!(!all.contains('\u{1b}'));
        assert_eq!(strip_ansi(&printed), all);
    }

    /// Clock that advances one second per reading
    struct SteppingClock(AtomicI64);

    impl Clock for SteppingClock {
        fn now(&self) -> chrono::DateTime<Utc> {
            let step = self.0.fetch_add(1, Ordering::SeqCst);
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(step)
        }
    }

    #[test]
    fn test_concurrent_records_keep_timestamp_order() {
        let dir = tempdir().unwrap();
        let logger = LeveledLogger::new(dir.path(), false)
            .unwrap()
            .with_console(SharedBuffer::default())
            .with_clock(SteppingClock(AtomicI64::new(0)));
        let logger = Arc::new(logger);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for i in 0..25 {
                        logger.warningf(format_args!("worker {} step {}", t, i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let all = read(logger.log_dir().join("all.log"));
        let stamps: Vec<&str> = all.lines().map(|l| &l[1..20]).collect();
        assert_eq!(stamps.len(), 100);
        assert!(stamps.windows(2).all(|w| w[0] < w[1]), "{:?}", stamps);
    }

    #[test]
    fn test_console_failure_still_writes_files() {
        let dir = tempdir().unwrap();
        let logger = LeveledLogger::new(dir.path(), false)
            .unwrap()
            .with_console(BrokenConsole);

        let err = logger.info("kept").unwrap_err();
        assert!(matches!(err, LogError::Console(_)));
        assert!(read(logger.path_for(Level::Info)).contains("kept"));
        assert!(read(logger.log_dir().join("all.log")).contains("kept"));
    }

    #[test]
    fn test_construction_error_propagates() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = LeveledLogger::new(&blocker, false).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_from_config() {
        let dir = tempdir().unwrap();
        let config = LoggerConfig::new(dir.path()).with_color(ColorMode::Never);
        let logger = LeveledLogger::from_config(&config).unwrap();
        assert!(!logger.color_enabled());
        assert_eq!(logger.log_dir(), dir.path().join("log"));

        let logger = LeveledLogger::open_default(dir.path()).unwrap();
        assert!(logger.color_enabled());
    }

    #[test]
    fn test_drop_releases_handles() {
        let dir = tempdir().unwrap();
        {
            let (logger, _) = quiet_logger(dir.path());
            logger.info("scoped").unwrap();
        }
        assert!(read(dir.path().join("log").join("info.log")).contains("scoped"));
    }

    #[test]
    fn test_concurrent_records_do_not_interleave() {
        let dir = tempdir().unwrap();
        let (logger, _) = quiet_logger(dir.path());
        let logger = Arc::new(logger);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for i in 0..50 {
                        logger.infof(format_args!("thread {} line {}", t, i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let all = read(logger.log_dir().join("all.log"));
        let lines: Vec<_> = all.lines().collect();
        assert_eq!(lines.len(), 200);
        for line in lines {
            assert!(line.starts_with("[2024-05-06T07:08:09] [INFO]"), "{}", line);
            assert!(line.contains(" : thread "), "{}", line);
        }
    }
}
