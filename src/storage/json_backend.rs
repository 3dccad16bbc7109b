use chrono::NaiveDate;
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    core::utils::{ensure_dir, PathResolver},
    economy::{EconomyData, CURRENT_SCHEMA_VERSION},
    errors::{EconomyError, Result},
};

use super::{BackupInfo, StorageBackend};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_DAY_FORMAT: &str = "%Y-%m-%d";
const TMP_SUFFIX: &str = "tmp";

/// File-backed storage: one primary JSON document plus `backups/<day>.json`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    state_file: PathBuf,
    backups_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        Ok(Self {
            state_file: PathResolver::state_file_in(&root),
            backups_dir: PathResolver::backup_dir_in(&root),
            root,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    pub fn backup_path(&self, day: NaiveDate) -> PathBuf {
        self.backups_dir
            .join(format!("{}.{}", day.format(BACKUP_DAY_FORMAT), BACKUP_EXTENSION))
    }

    fn ensure_backup_dir(&self) -> Result<()> {
        if self.backups_dir.is_file() {
            return Err(EconomyError::Storage(format!(
                "`{}` is a file; the backup directory cannot be created there",
                self.backups_dir.display()
            )));
        }
        ensure_dir(&self.backups_dir)
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<EconomyData>> {
        if !self.state_file.exists() {
            return Ok(None);
        }
        load_economy_from_path(&self.state_file).map(Some)
    }

    fn save(&self, data: &EconomyData) -> Result<()> {
        save_economy_to_path(data, &self.state_file)?;
        debug!(path = %self.state_file.display(), "economy saved");
        Ok(())
    }

    fn backup(&self, data: &EconomyData) -> Result<PathBuf> {
        self.ensure_backup_dir()?;
        let path = self.backup_path(data.current_day);
        save_economy_to_path(data, &path)?;
        debug!(path = %path.display(), "backup written");
        Ok(path)
    }

    fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        if !self.backups_dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let Some(day) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| NaiveDate::parse_from_str(stem, BACKUP_DAY_FORMAT).ok())
            else {
                continue;
            };
            entries.push(BackupInfo { day, path });
        }
        entries.sort_by_key(|info| info.day);
        Ok(entries)
    }

    fn load_backup(&self, info: &BackupInfo) -> Result<EconomyData> {
        load_economy_from_path(&info.path)
    }
}

/// Writes the document atomically by staging it next to the target.
pub fn save_economy_to_path(data: &EconomyData, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_economy_from_path(path: &Path) -> Result<EconomyData> {
    let raw = fs::read_to_string(path)?;
    let data: EconomyData = serde_json::from_str(&raw)?;
    if data.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(EconomyError::Storage(format!(
            "`{}` uses schema v{}, newer than supported v{}",
            path.display(),
            data.schema_version,
            CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(data)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (storage, temp)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 10, d).unwrap()
    }

    #[test]
    fn empty_store_loads_nothing() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load().unwrap().is_none());
        assert!(storage.list_backups().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let data = EconomyData::seeded(day(10), 40000.0);
        storage.save(&data).expect("save");
        let loaded = storage.load().expect("load").expect("document present");
        assert_eq!(loaded, data);
    }

    #[test]
    fn backups_overwrite_the_same_day() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut data = EconomyData::seeded(day(10), 40000.0);
        let first = storage.backup(&data).unwrap();
        data.transactions
            .append(crate::ledger::Transaction::manual(day(10), 5.0, "tip"));
        let second = storage.backup(&data).unwrap();
        assert_eq!(first, second);

        data.current_day = day(12);
        storage.backup(&data).unwrap();

        let backups = storage.list_backups().unwrap();
        let days: Vec<_> = backups.iter().map(|info| info.day).collect();
        assert_eq!(days, vec![day(10), day(12)]);
        let restored = storage.load_backup(&backups[0]).unwrap();
        assert_eq!(restored.transactions.len(), 2);
    }

    #[test]
    fn backup_dir_shadowed_by_file_is_an_error() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.backups_dir(), "oops").unwrap();
        let data = EconomyData::seeded(day(10), 1.0);
        let err = storage.backup(&data).unwrap_err();
        assert!(matches!(err, EconomyError::Storage(ref msg) if msg.contains("is a file")));
    }

    #[test]
    fn rejects_documents_with_invalid_building_sizes() {
        use crate::catalog::BuildingKind;
        use crate::economy::Building;

        let (storage, _guard) = storage_with_temp_dir();
        let mut data = EconomyData::seeded(day(10), 40000.0);
        data.regions.add_region("North").unwrap();
        let house = Building::new(BuildingKind::House, Some(4), day(10), 1.0).unwrap();
        data.regions.buildings_mut("North").unwrap().push(house);
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"size\":4"));
        fs::write(storage.state_file(), json.replace("\"size\":4", "\"size\":3")).unwrap();

        let err = storage.load().unwrap_err();
        assert!(matches!(err, EconomyError::Storage(ref msg) if msg.contains("Invalid size")));
    }

    #[test]
    fn rejects_future_schema_versions() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut data = EconomyData::seeded(day(10), 1.0);
        data.schema_version = CURRENT_SCHEMA_VERSION + 3;
        fs::write(storage.state_file(), serde_json::to_string(&data).unwrap()).unwrap();
        let err = storage.load().unwrap_err();
        assert!(matches!(err, EconomyError::Storage(ref msg) if msg.contains("newer")));
    }
}
