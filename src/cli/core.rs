//! Shell construction, dispatch and error reporting.

use std::io;

use strsim::levenshtein;
use tracing::{debug, warn};

use crate::{
    config::{Config, ConfigManager},
    core::errors::BudgetError,
    core::ledger_manager::LedgerManager,
    core::time::SystemClock,
    core::utils::PathResolver,
    storage::{JsonFileSlot, LoadSource},
};

pub use crate::core::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    /// Opens the ledger and config in the resolved data directory.
    ///
    /// An unusable data directory does not stop the shell: the ledger starts
    /// from the examples and every save reports its failure.
    pub fn new(mode: CliMode) -> Self {
        let base = PathResolver::base_dir();
        let slot = JsonFileSlot::in_base(Some(base.clone())).unwrap_or_else(|err| {
            warn!(%err, base = %base.display(), "data directory unavailable");
            cli_io::print_warning(format!("Data directory unavailable, changes will not be saved: {err}"));
            JsonFileSlot::at(PathResolver::slot_dir_in(&base))
        });
        let config_manager = ConfigManager::with_base_dir(base);
        let manager = LedgerManager::open(Box::new(slot), Box::new(SystemClock));
        Self::with_parts(mode, manager, config_manager)
    }

    /// Falls back to the default configuration when the stored one is unreadable.
    pub fn with_parts(
        mode: CliMode,
        manager: LedgerManager,
        config_manager: ConfigManager,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load().unwrap_or_else(|err| {
            warn!(%err, "using default configuration");
            cli_io::print_warning(format!("Configuration ignored, using defaults: {err}"));
            Config::default()
        });
        let context = ShellContext {
            mode,
            registry,
            manager,
            config_manager,
            config,
            running: true,
        };
        context.apply_output_preferences();
        context.report_load();
        context
    }

    /// Script mode always prints plain text.
    pub(crate) fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            plain: self.config.plain_output || self.mode == CliMode::Script,
        });
    }

    fn report_load(&self) {
        let report = self.manager.load_report();
        for warning in &report.warnings {
            cli_io::print_warning(warning);
        }
        if report.source == LoadSource::Seeded && report.warnings.is_empty() {
            cli_io::print_info("No saved expenses found; starting with example data.");
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            debug!(command, ?args, "dispatching");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    /// Closest registered name within edit distance 3, if any.
    pub(crate) fn closest_command(&self, input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        self.registry
            .names()
            .map(|name| (levenshtein(name, &input), name))
            .filter(|(distance, _)| *distance <= 3)
            .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)))
            .map(|(_, name)| name)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action("Exit shell?").map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_info("Use `help <command>` for usage details.");
            }
            CommandError::Core(BudgetError::Storage(message)) => {
                cli_io::print_error(format!("Changes were applied but could not be saved: {message}"));
            }
            other => cli_io::print_error(other.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    context: &mut ShellContext,
    lines: &[&str],
) -> Result<(), CommandError> {
    for line in lines {
        match context.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::script_context;
    use super::*;
    use crate::currency::Money;
    use tempfile::tempdir;

    #[test]
    fn suggests_nearby_commands() {
        let temp = tempdir().unwrap();
        let context = script_context(&temp);
        assert_eq!(context.closest_command("budgte"), Some("budget"));
        assert_eq!(context.closest_command("SUMARY"), Some("summary"));
        assert_eq!(context.closest_command("transactions-report"), None);
    }

    #[test]
    fn script_applies_commands_in_order() {
        let temp = tempdir().unwrap();
        let mut context = script_context(&temp);
        process_script(
            &mut context,
            &["budget 300", "add 12.50 Food 2025-10-30", "view weekly W44-2025"],
        )
        .unwrap();
        assert_eq!(context.manager.ledger().weekly_budget(), Money::from_cents(30_000));
        assert_eq!(context.manager.ledger().expense_count(), 4);
    }

    #[test]
    fn exit_stops_processing() {
        let temp = tempdir().unwrap();
        let mut context = script_context(&temp);
        process_script(&mut context, &["exit", "budget 10"]).unwrap();
        assert!(!context.running);
        assert_eq!(context.manager.ledger().weekly_budget(), Money::ZERO);
    }

    #[test]
    fn invalid_input_surfaces_as_core_error() {
        let temp = tempdir().unwrap();
        let mut context = script_context(&temp);
        let err = context.process_line("add -5 Food").unwrap_err();
        assert!(matches!(err, CommandError::Core(BudgetError::InvalidAmount(_))));
        let err = context.process_line("add 5").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert_eq!(context.manager.ledger().expense_count(), 3);
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("config.json"), "{currency_symbol").unwrap();
        let mut context = script_context(&temp);
        assert_eq!(context.config, Config::default());
        process_script(&mut context, &["budget 25"]).unwrap();
        assert_eq!(context.manager.ledger().weekly_budget(), Money::from_cents(2_500));
    }

    #[test]
    fn unknown_commands_and_bad_quotes_keep_running() {
        let temp = tempdir().unwrap();
        let mut context = script_context(&temp);
        assert_eq!(context.process_line("frobnicate").unwrap(), LoopControl::Continue);
        assert_eq!(context.process_line("add \"unterminated").unwrap(), LoopControl::Continue);
        assert_eq!(context.process_line("   ").unwrap(), LoopControl::Continue);
    }
}
