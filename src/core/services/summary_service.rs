//! Period aggregation: totals, per-category sums and the detail view.

use chrono::NaiveDate;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::currency::Money;
use crate::ledger::{Expense, Ledger, PeriodKey, PeriodKind};

/// Per-category sums in the order each category was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    entries: Vec<(String, Money)>,
}

impl CategoryBreakdown {
    fn accumulate(&mut self, category: &str, amount: Money) {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, sum)) => *sum += amount,
            None => self.entries.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.entries
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> Money {
        self.entries.iter().map(|(_, amount)| *amount).sum()
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, amount) in &self.entries {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }
}

/// `{total, categoryBreakdown}` for one period; this is what the chart consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub total: Money,
    pub category_breakdown: CategoryBreakdown,
}

/// One row of the category table.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub amount: Money,
    pub percentage: f64,
}

/// Everything the report view shows for a selected period.
///
/// `period` is `None` when there was nothing to select; the aggregate is then zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub period: Option<PeriodKey>,
    pub aggregate: AggregateResult,
    pub rows: Vec<CategoryRow>,
    pub transactions: Vec<Expense>,
}

impl Breakdown {
    pub fn empty() -> Self {
        Self {
            period: None,
            aggregate: AggregateResult::default(),
            rows: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Sums the expenses whose classified period equals `target`.
    ///
    /// Categories that sum to zero are left out so the breakdown only carries
    /// positive slices.
    pub fn aggregate<F>(expenses: &[Expense], classify: F, target: &PeriodKey) -> AggregateResult
    where
        F: Fn(NaiveDate) -> PeriodKey,
    {
        let mut result = AggregateResult::default();
        for expense in expenses.iter().filter(|e| classify(e.date) == *target) {
            result.total += expense.amount;
            result
                .category_breakdown
                .accumulate(&expense.category, expense.amount);
        }
        result
            .category_breakdown
            .entries
            .retain(|(_, amount)| !amount.is_zero());
        result
    }

    /// [`SummaryService::aggregate`] with the classifier matching `target`'s kind.
    pub fn aggregate_period(expenses: &[Expense], target: &PeriodKey) -> AggregateResult {
        let kind = target.kind();
        Self::aggregate(expenses, |date| PeriodKey::of(kind, date), target)
    }

    /// Aggregate for the ISO week containing `today`.
    pub fn current_week(ledger: &Ledger, today: NaiveDate) -> (PeriodKey, AggregateResult) {
        let key = PeriodKey::of(PeriodKind::Weekly, today);
        let aggregate = Self::aggregate_period(ledger.expenses(), &key);
        (key, aggregate)
    }

    /// Expenses inside `period`, newest date first.
    pub fn transactions_in(expenses: &[Expense], period: &PeriodKey) -> Vec<Expense> {
        let mut selected: Vec<Expense> = expenses
            .iter()
            .filter(|expense| period.contains(expense.date))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.date.cmp(&a.date));
        selected
    }

    pub fn category_rows(aggregate: &AggregateResult) -> Vec<CategoryRow> {
        aggregate
            .category_breakdown
            .iter()
            .map(|(category, amount)| CategoryRow {
                category: category.to_string(),
                amount,
                percentage: amount.percentage_of(aggregate.total),
            })
            .collect()
    }

    /// Full report for `period`.
    pub fn breakdown(ledger: &Ledger, period: PeriodKey) -> Breakdown {
        let aggregate = Self::aggregate_period(ledger.expenses(), &period);
        Breakdown {
            period: Some(period),
            rows: Self::category_rows(&aggregate),
            transactions: Self::transactions_in(ledger.expenses(), &period),
            aggregate,
        }
    }
}
