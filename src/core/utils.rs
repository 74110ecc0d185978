use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::core::errors::BudgetError;

const DEFAULT_DIR_NAME: &str = ".weekly_budget";
const SLOT_DIR: &str = "slot";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the application data directory.
pub const HOME_ENV: &str = "WEEKLY_BUDGET_HOME";

/// Resolves filesystem locations under the application data directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns the data directory, defaulting to `~/.weekly_budget`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    /// Uses `custom` when provided, otherwise [`PathResolver::base_dir`].
    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    /// Directory holding one file per persistence key.
    pub fn slot_dir_in(base: &Path) -> PathBuf {
        base.join(SLOT_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

/// Creates `path` and its parents when missing.
pub fn ensure_dir(path: &Path) -> Result<(), BudgetError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_base_prefers_explicit_path() {
        let custom = PathBuf::from("/tmp/weekly-budget-test");
        assert_eq!(PathResolver::resolve_base(Some(custom.clone())), custom);
        assert_eq!(
            PathResolver::slot_dir_in(&custom),
            custom.join("slot")
        );
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
