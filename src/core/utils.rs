use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".economy_core";
const STATE_FILE: &str = "economy.json";
const BACKUP_DIR: &str = "backups";
const CONFIG_FILE: &str = "config.json";

/// Resolves where the economy keeps its files.
pub struct PathResolver;

impl PathResolver {
    /// `ECONOMY_CORE_HOME` when set, otherwise `~/.economy_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os("ECONOMY_CORE_HOME") {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    pub fn state_file_in(base: &Path) -> PathBuf {
        base.join(STATE_FILE)
    }

    pub fn backup_dir_in(base: &Path) -> PathBuf {
        base.join(BACKUP_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
