//! Ledger store facade, business services, and shared core types.

pub mod errors;
pub mod ledger_manager;
pub mod services;
pub mod time;
pub mod utils;
