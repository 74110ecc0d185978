use crate::{
    config::{Config, ConfigManager},
    core::ledger_manager::LedgerManager,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// State shared by every command handler for the lifetime of the shell.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub running: bool,
}

impl ShellContext {
    pub fn symbol(&self) -> &str {
        &self.config.currency_symbol
    }

    pub fn prompt(&self) -> String {
        let summary = self.manager.weekly_summary();
        format!(
            "weekly-budget ({} left)> ",
            summary.balance.display_with(self.symbol())
        )
    }
}
