use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::core::{
    errors::BudgetError,
    utils::{ensure_dir, PathResolver},
};
use crate::currency::DEFAULT_SYMBOL;
use crate::ledger::PeriodKind;

const TMP_SUFFIX: &str = "tmp";

/// Keys accepted by [`Config::set`], in display order.
pub const CONFIG_KEYS: [&str; 3] = ["currency_symbol", "default_period", "plain_output"];

/// User preferences for the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub default_period: PeriodKind,
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_SYMBOL.into(),
            default_period: PeriodKind::Weekly,
            plain_output: false,
        }
    }
}

impl Config {
    /// Updates one preference from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), BudgetError> {
        let value = value.trim();
        match key {
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(BudgetError::Config("currency symbol must not be empty".into()));
                }
                self.currency_symbol = value.to_string();
            }
            "default_period" => self.default_period = value.parse()?,
            "plain_output" => {
                self.plain_output = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(BudgetError::Config(format!(
                            "`{other}` is not a boolean (use true or false)"
                        )))
                    }
                };
            }
            other => {
                return Err(BudgetError::Config(format!(
                    "unknown setting `{other}` (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_symbol", self.currency_symbol.clone()),
            ("default_period", self.default_period.to_string()),
            ("plain_output", self.plain_output.to_string()),
        ]
    }
}

/// Reads and writes `config.json` in the data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// The directory is created on the first save.
    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: PathResolver::config_file_in(&base),
        }
    }

    pub fn load(&self) -> Result<Config, BudgetError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            BudgetError::Config(format!("{} is not valid: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), BudgetError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(format!("json.{TMP_SUFFIX}"));
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), BudgetError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_returns_defaults_when_missing() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        assert_eq!(manager.load().unwrap(), Config::default());
        assert!(!manager.path().exists());
    }

    #[test]
    fn save_and_reload() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        let mut config = Config::default();
        config.set("currency_symbol", "€").unwrap();
        config.set("default_period", "monthly").unwrap();
        config.set("plain_output", "yes").unwrap();
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        fs::write(manager.path(), r#"{"plain_output": true}"#).unwrap();
        let config = manager.load().unwrap();
        assert!(config.plain_output);
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.default_period, PeriodKind::Weekly);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        fs::write(manager.path(), "{plain_output").unwrap();
        assert!(matches!(manager.load(), Err(BudgetError::Config(_))));
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(matches!(config.set("theme", "dark"), Err(BudgetError::Config(_))));
        assert!(matches!(config.set("plain_output", "maybe"), Err(BudgetError::Config(_))));
        assert!(matches!(
            config.set("default_period", "yearly"),
            Err(BudgetError::InvalidPeriod(_))
        ));
        assert!(config.set("currency_symbol", "  ").is_err());
        assert_eq!(config, Config::default());
    }
}
