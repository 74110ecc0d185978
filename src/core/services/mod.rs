//! Stateless services operating on an explicitly passed [`crate::ledger::Ledger`].

pub mod budget_service;
pub mod expense_service;
pub mod period_service;
pub mod summary_service;

pub use budget_service::{BudgetEvaluation, BudgetService, BudgetStatus, WeeklySummary};
pub use expense_service::ExpenseService;
pub use period_service::PeriodService;
pub use summary_service::{AggregateResult, Breakdown, CategoryBreakdown, CategoryRow, SummaryService};
