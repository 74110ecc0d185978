use chrono::NaiveDate;

use crate::currency::Money;
use crate::ledger::{Ledger, PeriodKey};

use super::summary_service::SummaryService;

/// Three-way classification of the weekly balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    NoBudgetSet,
    OnTrack,
    Overspent { by: Money },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetEvaluation {
    pub balance: Money,
    pub status: BudgetStatus,
}

/// The footer summary for one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySummary {
    pub period: PeriodKey,
    pub spent: Money,
    pub budget: Money,
    pub balance: Money,
    pub status: BudgetStatus,
}

impl WeeklySummary {
    /// `Week 44, 2025`
    pub fn period_label(&self) -> String {
        match self.period {
            PeriodKey::Week { week, year } => format!("Week {week}, {year}"),
            other => other.display_label(),
        }
    }

    pub fn comment(&self, symbol: &str) -> String {
        match self.status {
            BudgetStatus::NoBudgetSet => "Set a budget to start tracking your success!".into(),
            BudgetStatus::OnTrack => "Excellent! You are on track this week.".into(),
            BudgetStatus::Overspent { by } => format!(
                "Warning: You have overspent by {}.",
                by.display_with(symbol)
            ),
        }
    }

    /// Alert text shown next to the budget form; hidden until a budget exists.
    pub fn alert(&self, symbol: &str) -> Option<String> {
        if self.status == BudgetStatus::NoBudgetSet {
            return None;
        }
        let comment = self.comment(symbol);
        let trimmed = comment
            .strip_prefix("Warning: ")
            .or_else(|| comment.strip_prefix("Excellent! "))
            .unwrap_or(&comment);
        Some(trimmed.to_string())
    }
}

pub struct BudgetService;

impl BudgetService {
    pub fn evaluate(weekly_budget: Money, spent: Money) -> BudgetEvaluation {
        let balance = weekly_budget - spent;
        let status = if weekly_budget <= Money::ZERO {
            BudgetStatus::NoBudgetSet
        } else if balance.is_negative() {
            BudgetStatus::Overspent { by: balance.abs() }
        } else {
            BudgetStatus::OnTrack
        };
        BudgetEvaluation { balance, status }
    }

    /// Evaluates the ledger's budget against spending in the week containing `today`.
    pub fn weekly_summary(ledger: &Ledger, today: NaiveDate) -> WeeklySummary {
        let (period, aggregate) = SummaryService::current_week(ledger, today);
        let budget = ledger.weekly_budget();
        let evaluation = Self::evaluate(budget, aggregate.total);
        WeeklySummary {
            period,
            spent: aggregate.total,
            budget,
            balance: evaluation.balance,
            status: evaluation.status,
        }
    }
}
