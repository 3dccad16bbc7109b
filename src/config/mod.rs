use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    currency::MoneyFormat,
    economy::GrowthCurve,
    errors::{EconomyError, Result},
};

const TMP_SUFFIX: &str = "tmp";

/// Tuning constants of the simulated economy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyConfig {
    pub initial_balance: f64,
    /// First simulated day of a fresh economy; today when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Fraction of a negative balance charged as overdraft interest per day.
    pub overdraft_rate: f64,
    pub un_loan_rate_percent: f64,
    #[serde(default)]
    pub money: MoneyFormat,
    #[serde(default)]
    pub growth: GrowthCurve,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            initial_balance: 40000.0,
            start_date: None,
            overdraft_rate: 0.05,
            un_loan_rate_percent: 2.5,
            money: MoneyFormat::default(),
            growth: GrowthCurve::default(),
        }
    }
}

impl EconomyConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_balance.is_finite() {
            return Err(EconomyError::Config("initial_balance must be finite".into()));
        }
        if !(0.0..=1.0).contains(&self.overdraft_rate) {
            return Err(EconomyError::Config(format!(
                "overdraft_rate {} must be between 0 and 1",
                self.overdraft_rate
            )));
        }
        if !self.un_loan_rate_percent.is_finite() || self.un_loan_rate_percent < 0.0 {
            return Err(EconomyError::Config(
                "un_loan_rate_percent must be a non-negative number".into(),
            ));
        }
        if let GrowthCurve::Lorentz { saturation_income } = self.growth {
            if !saturation_income.is_finite() || saturation_income <= 0.0 {
                return Err(EconomyError::Config(
                    "growth saturation_income must be positive".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Loads and saves `config.json` in the application directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Returns the stored configuration, or the defaults when none was saved.
    pub fn load(&self) -> Result<EconomyConfig> {
        if !self.path.exists() {
            return Ok(EconomyConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: EconomyConfig = serde_json::from_str(&data)
            .map_err(|err| EconomyError::Config(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &EconomyConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
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
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
