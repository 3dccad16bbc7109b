#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use economy_core::{
    config::EconomyConfig,
    core::{EconomyState, FixedClock},
    economy::GrowthCurve,
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn start_day() -> NaiveDate {
    day(2022, 10, 10)
}

/// A unique directory kept alive until the test binary exits.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Flat growth so prices stay at catalog values.
pub fn test_config() -> EconomyConfig {
    EconomyConfig {
        start_date: Some(start_day()),
        growth: GrowthCurve::Flat,
        ..EconomyConfig::default()
    }
}

pub fn open_state(base: &PathBuf, today: NaiveDate, config: EconomyConfig) -> EconomyState {
    let storage = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    EconomyState::open(Box::new(storage), Box::new(FixedClock(today)), config)
        .expect("open economy state")
}

/// Fresh economy in an isolated directory; the real day is `today`.
pub fn setup_state(today: NaiveDate) -> (EconomyState, PathBuf) {
    let base = temp_base();
    let state = open_state(&base, today, test_config());
    (state, base)
}
