//! Text encoding of a [`Ledger`] into the two persistence keys.
//!
//! Loading never fails: an absent or unreadable expense list falls back to the
//! seed dataset and an unreadable budget falls back to zero. Each fallback is
//! recorded in the returned [`LoadReport`] and logged.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::core::errors::{BudgetError, Result};
use crate::currency::Money;
use crate::ledger::{Expense, Ledger};

use super::{PersistenceSlot, BUDGET_KEY, EXPENSES_KEY};

/// Where the loaded expense list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Seeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source: LoadSource,
    pub warnings: Vec<String>,
}

/// Reads both keys from `slot` and rebuilds the ledger.
pub fn load_ledger(slot: &dyn PersistenceSlot) -> (Ledger, LoadReport) {
    let mut warnings = Vec::new();

    let budget = match slot.load(BUDGET_KEY) {
        Ok(Some(raw)) => decode_budget(&raw).unwrap_or_else(|err| {
            warnings.push(format!("weekly budget reset to zero: {err}"));
            Money::ZERO
        }),
        Ok(None) => Money::ZERO,
        Err(err) => {
            warnings.push(format!("weekly budget unavailable: {err}"));
            Money::ZERO
        }
    };

    let (expenses, source) = match slot.load(EXPENSES_KEY) {
        Ok(Some(raw)) => match decode_expenses(&raw) {
            Ok(expenses) => (Some(expenses), LoadSource::Persisted),
            Err(err) => {
                warnings.push(format!("stored expenses unreadable, using examples: {err}"));
                (None, LoadSource::Seeded)
            }
        },
        Ok(None) => (None, LoadSource::Seeded),
        Err(err) => {
            warnings.push(format!("stored expenses unavailable, using examples: {err}"));
            (None, LoadSource::Seeded)
        }
    };

    for warning in &warnings {
        warn!("{warning}");
    }

    let ledger = match expenses {
        Some(expenses) => Ledger::from_parts(expenses, budget),
        None => Ledger::from_parts(Ledger::seed().expenses().to_vec(), budget),
    };
    info!(
        expenses = ledger.expense_count(),
        budget = %ledger.weekly_budget(),
        seeded = source == LoadSource::Seeded,
        "ledger loaded"
    );
    (ledger, LoadReport { source, warnings })
}

/// Writes both keys for `ledger`.
pub fn save_ledger(slot: &dyn PersistenceSlot, ledger: &Ledger) -> Result<()> {
    slot.save(BUDGET_KEY, &encode_budget(ledger.weekly_budget()))?;
    slot.save(EXPENSES_KEY, &encode_expenses(ledger.expenses())?)?;
    info!(expenses = ledger.expense_count(), "ledger saved");
    Ok(())
}

pub fn encode_budget(budget: Money) -> String {
    format!("{:.2}", budget.as_f64())
}

pub fn decode_budget(raw: &str) -> Result<Money> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| BudgetError::InvalidAmount(format!("`{}` is not a number", raw.trim())))?;
    let budget = Money::from_f64(value)
        .ok_or_else(|| BudgetError::InvalidAmount(format!("`{}` is out of range", raw.trim())))?;
    budget
        .ensure_recordable()
        .map_err(|err| BudgetError::InvalidAmount(format!("stored budget rejected: {err}")))
}

pub fn encode_expenses(expenses: &[Expense]) -> Result<String> {
    Ok(serde_json::to_string(expenses)?)
}

/// Parses the stored expense array and checks the per-record invariants.
pub fn decode_expenses(raw: &str) -> Result<Vec<Expense>> {
    let expenses: Vec<Expense> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    for expense in &expenses {
        expense.amount.ensure_recordable().map_err(|err| {
            BudgetError::InvalidAmount(format!("expense {} rejected: {err}", expense.id))
        })?;
        if !seen.insert(expense.id) {
            return Err(BudgetError::Storage(format!(
                "expense id {} appears more than once",
                expense.id
            )));
        }
    }
    Ok(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlot;

    #[test]
    fn empty_slot_loads_seed_and_zero_budget() {
        let slot = MemorySlot::new();
        let (ledger, report) = load_ledger(&slot);
        assert_eq!(report.source, LoadSource::Seeded);
        assert!(report.warnings.is_empty());
        assert_eq!(ledger, Ledger::seed());
    }

    #[test]
    fn round_trip_preserves_ledger() {
        let slot = MemorySlot::new();
        let original = Ledger::from_parts(Ledger::seed().expenses().to_vec(), Money::from_cents(12_550));
        save_ledger(&slot, &original).unwrap();
        assert_eq!(slot.get(BUDGET_KEY).as_deref(), Some("125.50"));
        let (loaded, report) = load_ledger(&slot);
        assert_eq!(report.source, LoadSource::Persisted);
        assert_eq!(loaded, original);
    }

    #[test]
    fn corrupt_expenses_fall_back_to_seed_with_warning() {
        let slot = MemorySlot::with_entries([(EXPENSES_KEY, "{not json"), (BUDGET_KEY, "80")]);
        let (ledger, report) = load_ledger(&slot);
        assert_eq!(report.source, LoadSource::Seeded);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(ledger.expenses(), Ledger::seed().expenses());
        assert_eq!(ledger.weekly_budget(), Money::from_cents(8_000));
    }

    #[test]
    fn negative_amounts_and_duplicate_ids_are_corrupt() {
        let negative = r#"[{"id":1,"amount":-5.0,"category":"Food","date":"2025-10-29"}]"#;
        assert!(decode_expenses(negative).is_err());
        let duplicate = r#"[{"id":1,"amount":5.0,"category":"Food","date":"2025-10-29"},
                            {"id":1,"amount":6.0,"category":"Food","date":"2025-10-30"}]"#;
        assert!(decode_expenses(duplicate).is_err());
        let bad_date = r#"[{"id":1,"amount":5.0,"category":"Food","date":"2025-13-01"}]"#;
        assert!(decode_expenses(bad_date).is_err());
    }

    #[test]
    fn oversized_stored_amounts_are_corrupt() {
        let huge = r#"[{"id":1,"amount":90000000000000000.0,"category":"Food","date":"2025-10-29"}]"#;
        assert!(decode_expenses(huge).is_err());
        assert!(decode_budget("90000000000000000").is_err());
        assert_eq!(decode_budget("10000000000").unwrap(), Money::MAX);
    }

    #[test]
    fn unreadable_budget_resets_to_zero() {
        for raw in ["NaN", "abc", "-10", "1e17", ""] {
            let slot = MemorySlot::with_entries([(EXPENSES_KEY, "[]"), (BUDGET_KEY, raw)]);
            let (ledger, report) = load_ledger(&slot);
            assert_eq!(ledger.weekly_budget(), Money::ZERO, "{raw}");
            assert!(ledger.is_empty());
            assert_eq!(report.warnings.len(), 1, "{raw}");
        }
    }

    #[test]
    fn reads_legacy_two_decimal_json() {
        let raw = r#"[{"id":1678888800000,"amount":50.00,"category":"Food","date":"2025-10-29"}]"#;
        let expenses = decode_expenses(raw).unwrap();
        assert_eq!(expenses[0].amount, Money::from_cents(5000));
    }
}
