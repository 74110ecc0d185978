//! Key-value persistence slots and the ledger codec that targets them.

pub mod codec;
pub mod json_backend;
pub mod memory;

use crate::core::errors::Result;

/// Key holding the JSON array of expenses.
pub const EXPENSES_KEY: &str = "expenses";
/// Key holding the weekly budget as decimal text.
pub const BUDGET_KEY: &str = "weeklyBudget";

/// A string-valued key-value store.
///
/// `save` must replace the value of one key atomically.
pub trait PersistenceSlot: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

pub use codec::{load_ledger, save_ledger, LoadReport, LoadSource};
pub use json_backend::JsonFileSlot;
pub use memory::MemorySlot;
