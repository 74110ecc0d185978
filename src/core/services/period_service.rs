use std::{cmp::Ordering, collections::HashSet};

use crate::ledger::{Expense, PeriodKey, PeriodKind};

/// Enumerates the periods that actually hold expenses.
pub struct PeriodService;

impl PeriodService {
    /// Distinct periods of `kind` present in `expenses`, in display order.
    ///
    /// Recomputed from scratch on every call.
    pub fn available(expenses: &[Expense], kind: PeriodKind) -> Vec<PeriodKey> {
        let unique: HashSet<PeriodKey> = expenses
            .iter()
            .map(|expense| PeriodKey::of(kind, expense.date))
            .collect();
        let mut periods: Vec<PeriodKey> = unique.into_iter().collect();
        periods.sort_by(Self::display_order);
        periods
    }

    /// The period a picker selects when the user has not chosen one.
    pub fn default_selection(expenses: &[Expense], kind: PeriodKind) -> Option<PeriodKey> {
        Self::available(expenses, kind).into_iter().next()
    }

    /// Newest year first. Within a year weeks run newest first, while months are
    /// ordered alphabetically by their formatted key (`April` before `March`).
    pub fn display_order(a: &PeriodKey, b: &PeriodKey) -> Ordering {
        b.year().cmp(&a.year()).then_with(|| match (a, b) {
            (PeriodKey::Week { week: left, .. }, PeriodKey::Week { week: right, .. }) => {
                right.cmp(left)
            }
            _ => a.to_string().cmp(&b.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Money;
    use chrono::NaiveDate;

    fn expense(id: i64, y: i32, m: u32, d: u32) -> Expense {
        Expense::new(
            id,
            Money::from_cents(1000),
            "Food",
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    #[test]
    fn empty_ledger_has_no_periods() {
        assert!(PeriodService::available(&[], PeriodKind::Weekly).is_empty());
        assert!(PeriodService::available(&[], PeriodKind::Monthly).is_empty());
        assert!(PeriodService::default_selection(&[], PeriodKind::Weekly).is_none());
    }

    #[test]
    fn same_week_collapses_to_one_entry() {
        let expenses = [
            expense(1, 2025, 10, 27),
            expense(2, 2025, 10, 29),
            expense(3, 2025, 11, 2),
        ];
        let periods = PeriodService::available(&expenses, PeriodKind::Weekly);
        assert_eq!(periods, [PeriodKey::Week { week: 44, year: 2025 }]);
    }

    #[test]
    fn weekly_periods_sort_by_year_then_week_descending() {
        let expenses = [
            expense(1, 2024, 3, 5),
            expense(2, 2025, 1, 8),
            expense(3, 2025, 10, 29),
            expense(4, 2024, 12, 31),
        ];
        let labels: Vec<String> = PeriodService::available(&expenses, PeriodKind::Weekly)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, ["W44-2025", "W2-2025", "W1-2025", "W10-2024"]);
    }

    #[test]
    fn monthly_periods_sort_alphabetically_within_a_year() {
        let expenses = [
            expense(1, 2025, 3, 1),
            expense(2, 2025, 4, 1),
            expense(3, 2025, 12, 1),
            expense(4, 2024, 1, 1),
            expense(5, 2025, 3, 9),
        ];
        let labels: Vec<String> = PeriodService::available(&expenses, PeriodKind::Monthly)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            labels,
            ["April-2025", "December-2025", "March-2025", "January-2024"]
        );
    }
}
