//! Pure text renderers for the shell. Every function here turns aggregator or
//! ledger output into strings; printing and colouring happen in the commands.

use std::fmt::Write as _;

use crate::core::services::{AggregateResult, Breakdown, BudgetStatus, WeeklySummary};
use crate::currency::Money;
use crate::ledger::{Expense, PeriodKey};

pub const CHART_TITLE: &str = "Spending by Category";

/// Slice colours, cycled when there are more categories than entries.
pub const PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

const BAR_GLYPH: &str = "█";
const DEFAULT_CHART_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSlice {
    pub label: String,
    pub color: &'static str,
    pub bar_len: usize,
}

/// Text rendition of the category doughnut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    pub title: &'static str,
    pub width: usize,
    pub slices: Vec<ChartSlice>,
}

impl Chart {
    /// Renders one line per slice; `paint` receives the bar and its colour.
    pub fn lines<F>(&self, paint: F) -> Vec<String>
    where
        F: Fn(&str, &str) -> String,
    {
        let mut lines = vec![self.title.to_string()];
        for slice in &self.slices {
            let bar = BAR_GLYPH.repeat(slice.bar_len);
            let padding = " ".repeat(self.width.saturating_sub(slice.bar_len));
            lines.push(format!("{}{} {}", paint(&bar, slice.color), padding, slice.label));
        }
        lines
    }

    pub fn to_plain_string(&self) -> String {
        self.lines(|bar, _| bar.to_string()).join("\n")
    }
}

/// `Food: $50.00 (21.3%)`
pub fn slice_label(category: &str, amount: Money, total: Money, symbol: &str) -> String {
    format!(
        "{category}: {} ({:.1}%)",
        amount.display_with(symbol),
        amount.percentage_of(total)
    )
}

/// Builds the chart for an aggregate, or `None` when there is nothing to draw.
pub fn chart(aggregate: &AggregateResult, symbol: &str) -> Option<Chart> {
    chart_with_width(aggregate, symbol, DEFAULT_CHART_WIDTH)
}

pub fn chart_with_width(aggregate: &AggregateResult, symbol: &str, width: usize) -> Option<Chart> {
    if aggregate.total.cents() <= 0 || width == 0 {
        return None;
    }
    let total = aggregate.total.cents() as f64;
    let slices = aggregate
        .category_breakdown
        .iter()
        .zip(PALETTE.iter().copied().cycle())
        .map(|((category, amount), color)| {
            let share = amount.cents() as f64 / total;
            let bar_len = ((share * width as f64).round() as usize).clamp(1, width);
            ChartSlice {
                label: slice_label(category, amount, aggregate.total, symbol),
                color,
                bar_len,
            }
        })
        .collect();
    Some(Chart {
        title: CHART_TITLE,
        width,
        slices,
    })
}

/// The "Report for ..." page: total, category table and the transactions.
pub fn report(breakdown: &Breakdown, symbol: &str) -> String {
    let Some(period) = breakdown.period else {
        return "No expenses found for any period. Log an expense first.".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "Report for {}", period.heading());
    let _ = writeln!(
        out,
        "Total Spending: {}",
        breakdown.aggregate.total.display_with(symbol)
    );

    if breakdown.rows.is_empty() && breakdown.transactions.is_empty() {
        out.push_str("\nNo expenses recorded in this period.");
        return out;
    }

    let amounts: Vec<String> = breakdown
        .rows
        .iter()
        .map(|row| row.amount.display_with(symbol))
        .collect();
    let category_width = breakdown
        .rows
        .iter()
        .map(|row| row.category.chars().count())
        .chain(std::iter::once("Category".len()))
        .max()
        .unwrap_or_default();
    let amount_width = amounts
        .iter()
        .map(|amount| amount.chars().count())
        .chain(std::iter::once("Amount".len()))
        .max()
        .unwrap_or_default();

    out.push_str("\nDetails by Category:\n");
    let _ = writeln!(
        out,
        "{:<category_width$}  {:>amount_width$}  {:>10}",
        "Category", "Amount", "Percentage"
    );
    for (row, amount) in breakdown.rows.iter().zip(&amounts) {
        let percentage = format!("{:.1}%", row.percentage);
        let _ = writeln!(
            out,
            "{:<category_width$}  {:>amount_width$}  {:>10}",
            row.category, amount, percentage
        );
    }

    out.push_str("\nIndividual Transactions:\n");
    for expense in &breakdown.transactions {
        let _ = writeln!(out, "{}", transaction_line(expense, symbol));
    }
    trim_lines(&out)
}

/// `[Food] 2025-10-29: $50.00`
pub fn transaction_line(expense: &Expense, symbol: &str) -> String {
    format!(
        "[{}] {}: {}",
        expense.category,
        expense.date,
        expense.amount.display_with(symbol)
    )
}

/// The selector contents, newest first, with the selection marked.
pub fn period_list(periods: &[PeriodKey], selected: Option<&PeriodKey>) -> String {
    if periods.is_empty() {
        return "No periods available.".to_string();
    }
    periods
        .iter()
        .map(|period| {
            let marker = if Some(period) == selected { '>' } else { ' ' };
            format!("{marker} {:<14} {}", period.display_label(), period)
        })
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Footer block for the current week.
pub fn summary(summary: &WeeklySummary, symbol: &str) -> String {
    [
        format!("Period:  {}", summary.period_label()),
        format!("Spent:   {}", summary.spent.display_with(symbol)),
        format!("Budget:  {}", summary.budget.display_with(symbol)),
        format!("Balance: {}", summary.balance.display_with(symbol)),
        summary.comment(symbol),
    ]
    .join("\n")
}

/// `Current Weekly Budget: $200.00`
pub fn budget_line(budget: Money, symbol: &str) -> String {
    format!("Current Weekly Budget: {}", budget.display_with(symbol))
}

/// Whether the alert should be shown as a warning rather than a success.
pub fn alert_is_warning(summary: &WeeklySummary) -> bool {
    matches!(summary.status, BudgetStatus::Overspent { .. })
}

fn trim_lines(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::{BudgetService, SummaryService};
    use crate::ledger::Ledger;
    use chrono::NaiveDate;

    fn week_44() -> PeriodKey {
        PeriodKey::Week { week: 44, year: 2025 }
    }

    #[test]
    fn seed_report() {
        let breakdown = SummaryService::breakdown(&Ledger::seed(), week_44());
        insta::assert_snapshot!(report(&breakdown, "$"), @r###"
        Report for Week 44
        Total Spending: $235.00

        Details by Category:
        Category    Amount  Percentage
        Food        $50.00       21.3%
        Transport   $35.00       14.9%
        Bills      $150.00       63.8%

        Individual Transactions:
        [Bills] 2025-10-31: $150.00
        [Transport] 2025-10-30: $35.00
        [Food] 2025-10-29: $50.00
        "###);
    }

    #[test]
    fn empty_selection_report() {
        assert_eq!(
            report(&Breakdown::empty(), "$"),
            "No expenses found for any period. Log an expense first."
        );
        let breakdown = SummaryService::breakdown(&Ledger::seed(), PeriodKey::Week { week: 2, year: 2021 });
        assert_eq!(
            report(&breakdown, "$"),
            "Report for Week 2\nTotal Spending: $0.00\n\nNo expenses recorded in this period."
        );
    }

    #[test]
    fn seed_chart() {
        let aggregate = SummaryService::aggregate_period(Ledger::seed().expenses(), &week_44());
        let chart = chart(&aggregate, "$").unwrap();
        let colors: Vec<_> = chart.slices.iter().map(|slice| slice.color).collect();
        assert_eq!(colors, ["#FF6384", "#36A2EB", "#FFCE56"]);
        insta::assert_snapshot!(chart.to_plain_string(), @r###"
        Spending by Category
        ████                 Food: $50.00 (21.3%)
        ███                  Transport: $35.00 (14.9%)
        █████████████        Bills: $150.00 (63.8%)
        "###);
    }

    #[test]
    fn chart_hidden_for_zero_total() {
        assert!(chart(&AggregateResult::default(), "$").is_none());
    }

    #[test]
    fn chart_hidden_for_zero_width() {
        let aggregate = SummaryService::aggregate_period(Ledger::seed().expenses(), &week_44());
        assert!(chart_with_width(&aggregate, "$", 0).is_none());
        let narrow = chart_with_width(&aggregate, "$", 1).unwrap();
        assert!(narrow.slices.iter().all(|slice| slice.bar_len == 1));
    }

    #[test]
    fn palette_cycles_after_six_categories() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 29).unwrap();
        let expenses: Vec<Expense> = (0..8)
            .map(|i| Expense::new(i, Money::from_cents(100), format!("C{i}"), date))
            .collect();
        let aggregate = SummaryService::aggregate_period(&expenses, &week_44());
        let chart = chart(&aggregate, "$").unwrap();
        assert_eq!(chart.slices[6].color, PALETTE[0]);
        assert_eq!(chart.slices[7].color, PALETTE[1]);
        assert!(chart.slices.iter().all(|slice| slice.bar_len >= 1));
    }

    #[test]
    fn period_list_marks_selection() {
        let periods = [week_44(), PeriodKey::Week { week: 3, year: 2025 }];
        insta::assert_snapshot!(period_list(&periods, Some(&week_44())), @r###"
        > Week 44-2025   W44-2025
          Week 3-2025    W3-2025
        "###);
    }

    #[test]
    fn footer_summary() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
        let summary_value = BudgetService::weekly_summary(&Ledger::seed(), today);
        insta::assert_snapshot!(summary(&summary_value, "$"), @r###"
        Period:  Week 44, 2025
        Spent:   $235.00
        Budget:  $0.00
        Balance: -$235.00
        Set a budget to start tracking your success!
        "###);
        assert!(!alert_is_warning(&summary_value));
    }
}
