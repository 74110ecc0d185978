use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::core::ledger_manager::{Command, CommandOutcome};
use crate::ledger::{PeriodKey, PeriodKind};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "periods",
            "List the weeks or months that hold expenses",
            "periods [weekly|monthly]",
            cmd_periods,
        ),
        CommandEntry::new(
            "view",
            "Show the spending report and chart for a period",
            "view [weekly|monthly] [W44-2025|October-2025]",
            cmd_view,
        ),
        CommandEntry::new(
            "chart",
            "Show the category chart for a period",
            "chart [weekly|monthly] [period] [--json]",
            cmd_chart,
        ),
    ]
}

/// Resolves `[kind] [key]` arguments; the kind falls back to the key's kind,
/// then to the configured default.
pub(crate) fn parse_selection(
    context: &ShellContext,
    args: &[&str],
) -> Result<(PeriodKind, Option<PeriodKey>), CommandError> {
    let mut kind = None;
    let mut key = None;
    for arg in args {
        if kind.is_none() && key.is_none() {
            if let Ok(parsed) = arg.parse::<PeriodKind>() {
                kind = Some(parsed);
                continue;
            }
        }
        if key.is_some() {
            return Err(CommandError::InvalidArguments(format!(
                "unexpected argument `{arg}`"
            )));
        }
        key = Some(arg.parse::<PeriodKey>()?);
    }
    let kind = kind
        .or_else(|| key.map(|key: PeriodKey| key.kind()))
        .unwrap_or(context.config.default_period);
    Ok((kind, key))
}

fn cmd_periods(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = match args {
        [] => context.config.default_period,
        [kind] => kind.parse::<PeriodKind>()?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: periods [weekly|monthly]".into(),
            ))
        }
    };
    let periods = context.manager.periods(kind);
    output::section(format!("Available {kind} periods"));
    output::block(&render::period_list(&periods, periods.first()));
    Ok(())
}

fn cmd_view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, key) = parse_selection(context, args)?;
    let outcome = context.manager.apply(Command::SelectPeriod { kind, key })?;
    let CommandOutcome::PeriodSelected { breakdown, .. } = outcome else {
        return Ok(());
    };
    output::section("Spending Breakdown");
    output::block(&render::report(&breakdown, context.symbol()));
    if let Some(chart) = render::chart(&breakdown.aggregate, context.symbol()) {
        output::section(chart.title);
        for line in chart.lines(output::swatch).into_iter().skip(1) {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let json = args.iter().any(|arg| *arg == "--json");
    let rest: Vec<&str> = args.iter().copied().filter(|arg| *arg != "--json").collect();
    let (kind, key) = parse_selection(context, &rest)?;
    let breakdown = context.manager.select_period(kind, key)?;

    if json {
        println!("{}", serde_json::to_string(&breakdown.aggregate)?);
        return Ok(());
    }
    match render::chart(&breakdown.aggregate, context.symbol()) {
        Some(chart) => {
            output::section(chart.title);
            for line in chart.lines(output::swatch).into_iter().skip(1) {
                println!("{line}");
            }
        }
        None => io::print_info("Nothing to chart for this period."),
    }
    Ok(())
}
