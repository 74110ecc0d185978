pub mod budget;
pub mod config;
pub mod expense;
pub mod report;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let definitions = budget::definitions()
        .into_iter()
        .chain(expense::definitions())
        .chain(report::definitions())
        .chain(config::definitions())
        .chain(system::definitions());
    for entry in definitions {
        registry.register(entry);
    }
    registry.alias("list", "expenses");
    registry.alias("report", "view");
    registry.alias("quit", "exit");
}
