use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

use crate::common::project_data_dir;

/// Default log file name inside the project data directory.
pub const LOG_FILE_NAME: &str = "promptline.log";

/// Configures `env_logger` for the binary.
///
/// Logs go to stderr unless a file is set. Prompts own the terminal while
/// they run, so the binary logs to a file by default.
#[derive(Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    debug_mode: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: None,
            debug_mode: false,
        }
    }

    /// Sends logs to `file_name`. Relative names resolve against the project data directory.
    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn with_debug_mode(mut self, enable: bool) -> Self {
        self.debug_mode = enable;
        self
    }

    fn level(&self) -> LevelFilter {
        if self.debug_mode {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn start(&self) -> Result<()> {
        let mut b = env_logger::builder();
        b.filter_level(self.level());
        // RUST_LOG still wins when set
        b.parse_default_env();

        if let Some(file_name) = &self.file_name {
            let log_file = resolve_log_file(file_name)?;
            let fd = open_log_file(&log_file)?;
            b.target(Target::Pipe(Box::new(fd)));
        }

        b.try_init().context("Logging was already initialized")?;

        Ok(())
    }
}

fn resolve_log_file(file_name: &Path) -> Result<PathBuf> {
    if file_name.is_absolute() {
        return Ok(file_name.to_path_buf());
    }
    Ok(project_data_dir()?.join(file_name))
}

/// Truncates or creates the log file, owner read/write only on Unix.
fn open_log_file(path: &Path) -> Result<File> {
    let mut options = fs::OpenOptions::new();
    options.create(true).write(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    options
        .open(path)
        .with_context(|| format!("Unable to open {} for writing", path.display()))
}
