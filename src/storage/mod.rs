pub mod json_backend;

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::{economy::EconomyData, errors::Result};

/// A dated snapshot on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub day: NaiveDate,
    pub path: PathBuf,
}

/// Abstraction over where the economy document and its daily backups live.
pub trait StorageBackend: Send + Sync {
    /// Loads the primary document, `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<EconomyData>>;
    fn save(&self, data: &EconomyData) -> Result<()>;
    /// Writes the snapshot for `data.current_day`, replacing an existing one.
    fn backup(&self, data: &EconomyData) -> Result<PathBuf>;
    /// Backups ordered by day, oldest first.
    fn list_backups(&self) -> Result<Vec<BackupInfo>>;
    fn load_backup(&self, info: &BackupInfo) -> Result<EconomyData>;
}

pub use json_backend::{load_economy_from_path, save_economy_to_path, JsonStorage};
