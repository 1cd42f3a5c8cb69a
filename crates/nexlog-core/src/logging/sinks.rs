//! Append-only file sinks under `<base>/log/`

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::level::Level;
use crate::error::{LogError, LogResult};

/// Directory created under the base directory
pub const LOG_DIR_NAME: &str = "log";

/// File receiving every record regardless of level
pub const AGGREGATE_FILE_NAME: &str = "all.log";

/// One append-mode file handle
#[derive(Debug)]
struct Sink {
    path: PathBuf,
    file: Option<File>,
}

impl Sink {
    fn open(path: PathBuf) -> LogResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LogError::io(&path, e))?;
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    /// Append `line` plus a newline in a single write
    fn write_line(&mut self, line: &str) -> LogResult<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LogError::closed(&self.path))?;
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        file.write_all(buf.as_bytes())
            .map_err(|e| LogError::io(&self.path, e))
    }

    fn close(&mut self) -> LogResult<()> {
        let mut file = self.file.take().ok_or_else(|| LogError::closed(&self.path))?;
        file.flush().map_err(|e| LogError::io(&self.path, e))
    }
}

/// The aggregate sink plus one sink per level, opened eagerly
#[derive(Debug)]
pub struct LogSinks {
    log_dir: PathBuf,
    aggregate: Sink,
    levels: Vec<Sink>,
}

impl LogSinks {
    /// Create `<base_dir>/log` if needed and open all six files in append mode
    pub fn open(base_dir: impl AsRef<Path>) -> LogResult<Self> {
        let log_dir = base_dir.as_ref().join(LOG_DIR_NAME);
        fs::create_dir_all(&log_dir).map_err(|e| LogError::io(&log_dir, e))?;

        let aggregate = Sink::open(log_dir.join(AGGREGATE_FILE_NAME))?;
        let levels = Level::ALL
            .iter()
            .map(|level| Sink::open(log_dir.join(level.file_name())))
            .collect::<LogResult<Vec<_>>>()?;

        Ok(Self {
            log_dir,
            aggregate,
            levels,
        })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn aggregate_path(&self) -> &Path {
        &self.aggregate.path
    }

    pub fn path_for(&self, level: Level) -> &Path {
        &self.levels[level.index()].path
    }

    /// Append a record to its level file, then to the aggregate file
    pub fn write(&mut self, level: Level, line: &str) -> LogResult<()> {
        self.levels[level.index()].write_line(line)?;
        self.aggregate.write_line(line)
    }

    pub fn is_closed(&self) -> bool {
        self.aggregate.file.is_none()
    }

    /// Flush and release every handle.
    ///
    /// All six handles are released even when one fails; the first error is returned.
    pub fn close(&mut self) -> LogResult<()> {
        let mut first_err = None;
        for sink in self.levels.iter_mut().chain(std::iter::once(&mut self.aggregate)) {
            if let Err(e) = sink.close() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
