//! Runtime settings
//!
//! Everything is derived from the executable's location and the CLI; the
//! launcher persists nothing of its own.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::CONFIG_FILE_NAME;

/// Directory holding the tile icons, relative to the base directory
pub const ICON_DIR_NAME: &str = "ico";
/// Log file, relative to the base directory
pub const LOG_FILE_NAME: &str = "pimenu.log";
/// Input wait per UI loop iteration, also the output drain cadence
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Window mode viewport, in terminal cells
pub const WINDOW_SIZE: (u16, u16) = (60, 20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_dir: PathBuf,
    pub fullscreen: bool,
    pub poll_interval: Duration,
}

impl Settings {
    pub fn new(base_dir: impl Into<PathBuf>, fullscreen: bool) -> Self {
        Self {
            base_dir: base_dir.into(),
            fullscreen,
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Settings rooted at the directory of the running executable
    pub fn from_current_exe(fullscreen: bool) -> std::io::Result<Self> {
        let exe = std::env::current_exe()?.canonicalize()?;
        let base_dir = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::new(base_dir, fullscreen))
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE_NAME)
    }

    pub fn icon_dir(&self) -> PathBuf {
        self.base_dir.join(ICON_DIR_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.base_dir.join(LOG_FILE_NAME)
    }
}
