use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::core::ledger_manager::{Command, CommandOutcome};
use crate::core::services::WeeklySummary;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "budget",
            "Show or replace the weekly budget",
            "budget [amount]",
            cmd_budget,
        ),
        CommandEntry::new(
            "summary",
            "Show spending against the budget for the current week",
            "summary",
            cmd_summary,
        ),
    ]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let budget = context.manager.ledger().weekly_budget();
            io::print_info(render::budget_line(budget, context.symbol()));
            print_alert(context, &context.manager.weekly_summary());
            Ok(())
        }
        [amount] => {
            let outcome = context.manager.apply(Command::SetBudget {
                amount: (*amount).to_string(),
            })?;
            if let CommandOutcome::BudgetSet { summary, .. } = outcome {
                io::print_success("Weekly budget has been set!");
                io::print_info(render::budget_line(summary.budget, context.symbol()));
                print_alert(context, &summary);
            }
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments("usage: budget [amount]".into())),
    }
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: summary".into()));
    }
    let summary = context.manager.weekly_summary();
    output::section("Weekly Summary");
    output::block(&render::summary(&summary, context.symbol()));
    Ok(())
}

/// Budget alert shown after every change; silent while no budget is set.
pub(crate) fn print_alert(context: &ShellContext, summary: &WeeklySummary) {
    let Some(alert) = summary.alert(context.symbol()) else {
        return;
    };
    if render::alert_is_warning(summary) {
        io::print_warning(alert);
    } else {
        io::print_success(alert);
    }
}
