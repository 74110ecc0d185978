use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::core::errors::{BudgetError, Result};
use crate::core::services::{
    Breakdown, BudgetService, ExpenseService, PeriodService, SummaryService, WeeklySummary,
};
use crate::core::time::Clock;
use crate::currency::Money;
use crate::ledger::{Expense, Ledger, PeriodKey, PeriodKind};
use crate::storage::{load_ledger, save_ledger, LoadReport, PersistenceSlot};

/// The three user actions the input surface can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetBudget {
        amount: String,
    },
    AddExpense {
        amount: String,
        category: String,
        date: Option<String>,
    },
    SelectPeriod {
        kind: PeriodKind,
        key: Option<PeriodKey>,
    },
}

/// Refreshed derived state returned after a [`Command`] is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    BudgetSet {
        previous: Money,
        summary: WeeklySummary,
    },
    ExpenseAdded {
        expense: Expense,
        summary: WeeklySummary,
    },
    PeriodSelected {
        periods: Vec<PeriodKey>,
        breakdown: Breakdown,
    },
}

/// Owns the ledger and coordinates validation, persistence and recomputation.
pub struct LedgerManager {
    ledger: Ledger,
    slot: Box<dyn PersistenceSlot>,
    clock: Box<dyn Clock>,
    load_report: LoadReport,
}

impl LedgerManager {
    /// Loads the ledger from `slot`, falling back to the seed dataset.
    pub fn open(slot: Box<dyn PersistenceSlot>, clock: Box<dyn Clock>) -> Self {
        let (ledger, load_report) = load_ledger(slot.as_ref());
        Self {
            ledger,
            slot,
            clock,
            load_report,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome> {
        debug!(?command, "applying command");
        match command {
            Command::SetBudget { amount } => {
                let (previous, summary) = self.set_budget(&amount)?;
                Ok(CommandOutcome::BudgetSet { previous, summary })
            }
            Command::AddExpense {
                amount,
                category,
                date,
            } => {
                let expense = self.add_expense(&amount, &category, date.as_deref())?;
                Ok(CommandOutcome::ExpenseAdded {
                    expense,
                    summary: self.weekly_summary(),
                })
            }
            Command::SelectPeriod { kind, key } => {
                let breakdown = self.select_period(kind, key)?;
                Ok(CommandOutcome::PeriodSelected {
                    periods: self.periods(kind),
                    breakdown,
                })
            }
        }
    }

    /// Replaces the weekly budget and persists. Returns the previous budget and
    /// the refreshed footer summary.
    ///
    /// A failed save is reported after the in-memory change has been made.
    pub fn set_budget(&mut self, amount: &str) -> Result<(Money, WeeklySummary)> {
        let budget = ExpenseService::parse_budget(amount)?;
        let previous = ExpenseService::set_budget(&mut self.ledger, budget)?;
        self.save()?;
        Ok((previous, self.weekly_summary()))
    }

    /// Validates and appends an expense, then persists.
    pub fn add_expense(
        &mut self,
        amount: &str,
        category: &str,
        date: Option<&str>,
    ) -> Result<Expense> {
        let draft = ExpenseService::draft(amount, category, date, self.today())?;
        let expense = ExpenseService::add(&mut self.ledger, draft, self.clock.as_ref())?;
        self.save()?;
        Ok(expense)
    }

    /// Breakdown for `key`, or for the first available period of `kind` when no
    /// key is given. A ledger with no expenses yields [`Breakdown::empty`].
    pub fn select_period(&self, kind: PeriodKind, key: Option<PeriodKey>) -> Result<Breakdown> {
        let key = match key {
            Some(key) if key.kind() != kind => {
                return Err(BudgetError::InvalidPeriod(format!(
                    "`{key}` is not a {kind} period"
                )))
            }
            Some(key) => Some(key),
            None => PeriodService::default_selection(self.ledger.expenses(), kind),
        };
        Ok(match key {
            Some(key) => SummaryService::breakdown(&self.ledger, key),
            None => Breakdown::empty(),
        })
    }

    pub fn periods(&self, kind: PeriodKind) -> Vec<PeriodKey> {
        PeriodService::available(self.ledger.expenses(), kind)
    }

    pub fn weekly_summary(&self) -> WeeklySummary {
        BudgetService::weekly_summary(&self.ledger, self.today())
    }

    pub fn save(&self) -> Result<()> {
        save_ledger(self.slot.as_ref(), &self.ledger).map_err(|err| {
            warn!(error = %err, "failed to persist ledger");
            err
        })
    }
}
