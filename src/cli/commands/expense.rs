use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::core::ledger_manager::{Command, CommandOutcome};
use crate::core::services::ExpenseService;

use super::budget::print_alert;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an expense (date defaults to today)",
            "add <amount> <category> [YYYY-MM-DD]",
            cmd_add,
        ),
        CommandEntry::new(
            "expenses",
            "List every recorded expense, newest first",
            "expenses",
            cmd_expenses,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (amount, category, date) = match args {
        [amount, category] => (*amount, *category, None),
        [amount, category, date] => (*amount, *category, Some(*date)),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: add <amount> <category> [YYYY-MM-DD]".into(),
            ))
        }
    };
    let outcome = context.manager.apply(Command::AddExpense {
        amount: amount.to_string(),
        category: category.to_string(),
        date: date.map(str::to_string),
    })?;
    if let CommandOutcome::ExpenseAdded { expense, summary } = outcome {
        io::print_success(format!(
            "Expense added: {}",
            render::transaction_line(&expense, context.symbol())
        ));
        print_alert(context, &summary);
    }
    Ok(())
}

fn cmd_expenses(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: expenses".into()));
    }
    let expenses = ExpenseService::list(context.manager.ledger());
    if expenses.is_empty() {
        io::print_info("No expenses recorded.");
        return Ok(());
    }
    output::section(format!("Expenses ({})", expenses.len()));
    let lines: Vec<String> = expenses
        .iter()
        .map(|expense| render::transaction_line(expense, context.symbol()))
        .collect();
    output::block(&lines.join("\n"));
    Ok(())
}
