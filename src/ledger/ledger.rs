use chrono::NaiveDate;

use crate::currency::Money;

use super::expense::Expense;

/// In-memory ledger: the recorded expenses plus the current weekly budget.
///
/// Mutations go through [`crate::core::services::ExpenseService`], which validates
/// input before anything reaches the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    expenses: Vec<Expense>,
    weekly_budget: Money,
}

const SEED_EXPENSES: [(i64, i64, &str, (i32, u32, u32)); 3] = [
    (1678888800000, 5000, "Food", (2025, 10, 29)),
    (1678888800001, 3500, "Transport", (2025, 10, 30)),
    (1678888800002, 15000, "Bills", (2025, 10, 31)),
];

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from already validated parts, e.g. a decoded snapshot.
    pub fn from_parts(expenses: Vec<Expense>, weekly_budget: Money) -> Self {
        Self {
            expenses,
            weekly_budget,
        }
    }

    /// The example dataset used when nothing has been persisted yet.
    pub fn seed() -> Self {
        let expenses = SEED_EXPENSES
            .iter()
            .filter_map(|(id, cents, category, (y, m, d))| {
                NaiveDate::from_ymd_opt(*y, *m, *d)
                    .map(|date| Expense::new(*id, Money::from_cents(*cents), *category, date))
            })
            .collect();
        Self::from_parts(expenses, Money::ZERO)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn weekly_budget(&self) -> Money {
        self.weekly_budget
    }

    /// Returns an id derived from `timestamp_millis` that is strictly greater
    /// than every id already in the ledger.
    pub fn next_expense_id(&self, timestamp_millis: i64) -> i64 {
        match self.expenses.iter().map(|expense| expense.id).max() {
            Some(max) if timestamp_millis <= max => max + 1,
            _ => timestamp_millis,
        }
    }

    pub(crate) fn push_expense(&mut self, expense: Expense) -> i64 {
        let id = expense.id;
        self.expenses.push(expense);
        id
    }

    pub(crate) fn replace_weekly_budget(&mut self, budget: Money) {
        self.weekly_budget = budget;
    }
}
