//! Resolve where quickstart keeps its files.
//!
//! An explicit directory wins, otherwise the platform data directory from the
//! `directories` crate is used. The command line fills the explicit directory
//! from `--data-dir` or `QUICKSTART_DATA_DIR`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::ProjectDirs;

const QUALIFIER: &str = "app";
const ORGANIZATION: &str = "quickstart";
const APPLICATION: &str = "quickstart";

pub const DATA_DIR_ENV: &str = "QUICKSTART_DATA_DIR";
pub const SNAPSHOT_FILE: &str = "snapshot.v1.json";
pub const WIDGET_DIR: &str = "widget";

fn platform_data_dir() -> Result<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .ok_or_else(|| anyhow!("unable to determine a data directory for quickstart"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    data_dir: PathBuf,
}

impl AppConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        // An empty override counts as unset.
        let data_dir = match explicit.filter(|dir| !dir.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => platform_data_dir()?,
        };
        Ok(Self::new(data_dir))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    pub fn widget_dir(&self) -> PathBuf {
        self.data_dir.join(WIDGET_DIR)
    }
}
