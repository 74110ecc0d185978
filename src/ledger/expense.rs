use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::Money;

/// Category labels offered by the entry form. The core accepts any non-empty label.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Bills",
    "Entertainment",
    "Shopping",
    "Health",
    "Other",
];

/// A single recorded expense.
///
/// `id` is derived from the creation timestamp in milliseconds and is never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(id: i64, amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            amount,
            category: category.into(),
            date,
        }
    }
}

/// User input for a new expense, before an id is assigned and validation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
        }
    }

    pub(crate) fn into_expense(self, id: i64) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category.trim().to_string(),
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_iso_date_and_numeric_amount() {
        let expense = Expense::new(
            1678888800000,
            Money::from_cents(5000),
            "Food",
            NaiveDate::from_ymd_opt(2025, 10, 29).unwrap(),
        );
        let json = serde_json::to_string(&expense).unwrap();
        assert_eq!(
            json,
            r#"{"id":1678888800000,"amount":50.0,"category":"Food","date":"2025-10-29"}"#
        );
    }

    #[test]
    fn draft_trims_category_on_conversion() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let expense = ExpenseDraft::new(Money::from_cents(100), "  Health ", date).into_expense(7);
        assert_eq!(expense.category, "Health");
        assert_eq!(expense.id, 7);
    }
}
