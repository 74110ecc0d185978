#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;
use weekly_budget::{
    config::ConfigManager,
    core::{ledger_manager::LedgerManager, time::FixedClock},
    storage::JsonFileSlot,
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 31).unwrap()
}

/// A fresh data directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a manager on a file slot under `base`, frozen on [`today`].
pub fn open_manager(base: &Path) -> LedgerManager {
    let slot = JsonFileSlot::new(base.join("slot")).expect("create file slot");
    LedgerManager::open(Box::new(slot), Box::new(FixedClock::on(today())))
}

/// Creates isolated managers backed by unique directories for each test.
pub fn setup_test_env() -> (LedgerManager, ConfigManager, PathBuf) {
    let base = temp_base();
    let manager = open_manager(&base);
    let config_manager = ConfigManager::with_base_dir(base.clone());
    (manager, config_manager, base)
}
