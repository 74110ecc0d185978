use std::{
    io::Write,
    thread,
    time::{Duration, Instant},
};

use crate::cli::clock::{format_display, ClockTicker};
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

const MAX_CLOCK_SECONDS: u64 = 600;
const CLOCK_POLL: Duration = Duration::from_millis(200);

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "clock",
            "Show the current date and time, optionally ticking for N seconds",
            "clock [seconds]",
            cmd_clock,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_clock(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let seconds = match args {
        [] => 0,
        [raw] => raw
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs <= MAX_CLOCK_SECONDS)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "seconds must be a whole number up to {MAX_CLOCK_SECONDS}"
                ))
            })?,
        _ => return Err(CommandError::InvalidArguments("usage: clock [seconds]".into())),
    };

    if seconds == 0 || context.mode == CliMode::Script {
        io::print_info(format_display(&context.manager.clock().now()));
        return Ok(());
    }

    let mut ticker = ClockTicker::new();
    let deadline = Instant::now() + Duration::from_secs(seconds);
    let mut stdout = std::io::stdout();
    while Instant::now() < deadline {
        if let Some(display) = ticker.poll(&context.manager.clock().now()) {
            write!(stdout, "\r{display}")?;
            stdout.flush()?;
        }
        thread::sleep(CLOCK_POLL);
    }
    writeln!(stdout)?;
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section("Version");
    io::print_info(meta.summary());
    io::print_info(format!("  Rustc: {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
