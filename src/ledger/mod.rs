//! Ledger domain models and the date/period classifier.

pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod period;

pub use expense::{Expense, ExpenseDraft, DEFAULT_CATEGORIES};
pub use ledger::Ledger;
pub use period::{month_of, parse_date, week_of, PeriodKey, PeriodKind, MONTH_NAMES};
