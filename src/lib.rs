#![doc(test(attr(deny(warnings))))]

//! Weekly Budget tracks a weekly spending limit and dated expenses, buckets them
//! into ISO weeks or calendar months, and derives the balance, category
//! breakdown and chart data shown by the shell.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Weekly Budget tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
