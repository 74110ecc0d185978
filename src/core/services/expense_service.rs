//! Boundary validation for the two mutating user actions.

use chrono::NaiveDate;
use tracing::debug;

use crate::core::errors::{BudgetError, Result};
use crate::core::time::Clock;
use crate::currency::Money;
use crate::ledger::{period::ensure_not_future, parse_date, Expense, ExpenseDraft, Ledger};

/// Validates and applies `setBudget` / `addExpense`. Nothing is mutated unless
/// every check passes.
pub struct ExpenseService;

impl ExpenseService {
    /// Builds a draft from raw form input. A missing date defaults to `today`.
    pub fn draft(
        amount: &str,
        category: &str,
        date: Option<&str>,
        today: NaiveDate,
    ) -> Result<ExpenseDraft> {
        let amount = Money::parse_non_negative(amount)?;
        let date = match date {
            Some(raw) => parse_date(raw, today)?,
            None => today,
        };
        let draft = ExpenseDraft::new(amount, category, date);
        Self::validate(&draft, today)?;
        Ok(draft)
    }

    /// Checks the invariants every stored expense must satisfy.
    pub fn validate(draft: &ExpenseDraft, today: NaiveDate) -> Result<()> {
        draft.amount.ensure_recordable()?;
        if draft.category.trim().is_empty() {
            return Err(BudgetError::InvalidCategory(
                "category must not be empty".into(),
            ));
        }
        ensure_not_future(draft.date, today)
    }

    /// Appends a validated expense and returns it with its assigned id.
    pub fn add(ledger: &mut Ledger, draft: ExpenseDraft, clock: &dyn Clock) -> Result<Expense> {
        Self::validate(&draft, clock.today())?;
        let id = ledger.next_expense_id(clock.now().timestamp_millis());
        let expense = draft.into_expense(id);
        ledger.push_expense(expense.clone());
        debug!(id, amount = %expense.amount, category = %expense.category, "expense added");
        Ok(expense)
    }

    /// Parses a budget amount from raw input.
    pub fn parse_budget(input: &str) -> Result<Money> {
        Money::parse_non_negative(input)
    }

    /// Replaces the weekly budget, returning the previous value.
    pub fn set_budget(ledger: &mut Ledger, budget: Money) -> Result<Money> {
        budget.ensure_recordable()?;
        let previous = ledger.weekly_budget();
        ledger.replace_weekly_budget(budget);
        debug!(%previous, %budget, "weekly budget replaced");
        Ok(previous)
    }

    /// All expenses, newest date first. Expenses sharing a date keep insertion order.
    pub fn list(ledger: &Ledger) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = ledger.expenses().iter().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }
}
